use std::collections::VecDeque;

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::core::tetromino::TetrominoKind;

/// Fair piece sequencer using the 7-bag system.
///
/// When the queue runs out it is refilled with all seven piece types in a
/// uniformly random permutation, so every 7 consecutive draws from a bag
/// boundary contain each type exactly once and no type can ever appear more
/// than twice in a row (last of one bag, first of the next).
///
/// The generator is a [`Pcg64Mcg`] so a sequence can be reproduced from a
/// seed; see [`PieceBag::from_seed`].
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg64Mcg,
    queue: VecDeque<TetrominoKind>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a bag seeded from the OS random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(Pcg64Mcg::from_os_rng())
    }

    /// Creates a bag with a fixed seed, for deterministic sequences.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(rng: Pcg64Mcg) -> Self {
        Self {
            rng,
            queue: VecDeque::with_capacity(TetrominoKind::COUNT),
        }
    }

    /// Removes and returns the next piece type, refilling the bag first if
    /// it is empty.
    pub fn next(&mut self) -> TetrominoKind {
        if self.queue.is_empty() {
            let mut bag = TetrominoKind::ALL;
            bag.shuffle(&mut self.rng);
            self.queue.extend(bag);
        }
        self.queue.pop_front().expect("bag was just refilled")
    }

    /// Returns the pieces still queued in the current bag, in draw order.
    pub fn upcoming(&self) -> impl Iterator<Item = TetrominoKind> + '_ {
        self.queue.iter().copied()
    }

    /// Discards the queued pieces. The next draw starts a fresh bag.
    pub fn reset(&mut self) {
        self.queue.clear();
    }
}
