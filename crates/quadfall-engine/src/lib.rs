//! Falling-block puzzle engine.
//!
//! A headless, deterministic game core: a 10x20 board of colored cells, the
//! seven classic tetromino shapes, a fair 7-bag sequencer, gravity with
//! per-level speedup, line clearing with level-scaled scoring, and a small
//! state machine (`Ready -> Playing <-> Paused -> GameOver`). There is no
//! rendering and no input handling; a host feeds commands and the current
//! time, and renders from [`Snapshot`]s.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use quadfall_engine::{DropSpeed, GameEngine, GameState, PlayerStats};
//!
//! let mut engine = GameEngine::new(DropSpeed::Normal, PlayerStats::new());
//! let now = Instant::now();
//! engine.start(now);
//! assert_eq!(engine.state(), GameState::Playing);
//!
//! engine.move_left();
//! engine.rotate();
//! engine.hard_drop(now);
//!
//! // The event loop drives gravity by reporting the passage of time.
//! engine.advance(now);
//! let frame = engine.snapshot(now);
//! assert_eq!(frame.level, 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
