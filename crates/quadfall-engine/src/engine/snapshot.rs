use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::{
    board::Cell,
    tetromino::{BlockMask, PieceColor, TetrominoKind},
};

use super::{
    game_engine::{GameEngine, GameState},
    settings::DifficultySource,
    stats::StatsSink,
};

/// Serializable point-in-time view of a running game.
///
/// Everything a renderer needs in one value: the merged grid (locked cells
/// with the falling piece overlaid), the scoreboard, the preview piece, and
/// the session clock already formatted. Hosts can also persist or transmit
/// it; it carries no engine internals, so it cannot be loaded back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    pub grid: Vec<Vec<Cell>>,
    pub score: u64,
    pub level: u32,
    pub lines_cleared: u32,
    pub state: GameState,
    pub next_kind: TetrominoKind,
    pub next_blocks: BlockMask,
    pub next_color: PieceColor,
    /// Session clock as `m:ss`.
    pub clock: String,
}

impl<D: DifficultySource, S: StatsSink> GameEngine<D, S> {
    /// Captures the current frame for rendering or persistence.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        Snapshot {
            grid: self.merged_view(),
            score: self.score(),
            level: self.level(),
            lines_cleared: self.lines_cleared(),
            state: self.state(),
            next_kind: self.next_kind(),
            next_blocks: self.next_blocks(),
            next_color: self.next_color(),
            clock: self.formatted_session_time(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::board::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::engine::stats::PlayerStats;

    #[test]
    fn snapshot_reflects_the_engine() {
        let mut engine = GameEngine::from_seed(1.0, PlayerStats::new(), 11);
        let now = Instant::now();
        engine.start(now);
        let later = now + Duration::from_secs(83);

        let snapshot = engine.snapshot(later);
        assert_eq!(snapshot.grid.len(), BOARD_HEIGHT);
        assert_eq!(snapshot.grid[0].len(), BOARD_WIDTH);
        assert_eq!(snapshot.state, GameState::Playing);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.next_kind, engine.next_kind());
        assert_eq!(snapshot.next_color, engine.next_kind().color());
        assert_eq!(snapshot.clock, "1:23");

        // The falling piece is overlaid in the grid.
        let filled = snapshot
            .grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut engine = GameEngine::from_seed(1.0, PlayerStats::new(), 3);
        let now = Instant::now();
        engine.start(now);
        engine.hard_drop(now);

        let snapshot = engine.snapshot(now);
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
