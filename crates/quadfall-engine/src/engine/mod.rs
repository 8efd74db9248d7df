//! Game orchestration: state machine, sequencing, scoring, and timing.
//!
//! This module builds the playable game on top of the core data structures:
//!
//! - [`GameEngine`] - The state machine driving a game from start to top-out
//! - [`PieceBag`] - 7-bag piece sequencer
//! - [`FallTimer`] / [`SessionClock`] - Deadline-based timing primitives
//! - [`DifficultySource`] / [`StatsSink`] - Host collaborator seams
//! - [`Snapshot`] - Serializable frame for rendering and persistence
//!
//! # Game Flow
//!
//! 1. Construct a [`GameEngine`] with a difficulty source and a stats sink
//! 2. Call [`GameEngine::start`] to begin a session
//! 3. Feed player commands (move, rotate, drop) as they arrive
//! 4. Call [`GameEngine::advance`] from the event loop so gravity ticks fire;
//!    [`GameEngine::next_fall_deadline`] says how long the host may sleep
//! 5. Render from [`GameEngine::snapshot`]
//! 6. On top-out the engine reports the final score and played time to the
//!    stats sink and enters [`GameState::GameOver`]
//!
//! All timing is explicit: commands take the current [`std::time::Instant`],
//! so the engine owns no threads or timers and behaves identically under
//! test and in production.

pub use self::{clock::*, game_engine::*, piece_bag::*, settings::*, snapshot::*, stats::*};

pub(crate) mod clock;
pub(crate) mod game_engine;
pub(crate) mod piece_bag;
pub(crate) mod settings;
pub(crate) mod snapshot;
pub(crate) mod stats;
