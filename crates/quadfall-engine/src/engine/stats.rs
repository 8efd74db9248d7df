use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::format_played;

/// Write-only stats collaborator.
///
/// The engine reports to this sink at game over, at cleanup, and when a
/// restart discards an unfinished session - never mid-session. Persistence
/// is the implementor's concern.
pub trait StatsSink {
    /// Offers a final score; implementors keep the maximum.
    fn update_high_score(&mut self, score: u64);

    /// Adds played time to the cumulative total.
    fn add_time_played(&mut self, duration: Duration);
}

/// In-memory [`StatsSink`] with the usual read surface.
///
/// Serializable so a host can store it wherever it likes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerStats {
    high_score: u64,
    total_time_played: Duration,
}

impl PlayerStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    #[must_use]
    pub fn total_time_played(&self) -> Duration {
        self.total_time_played
    }

    /// Total played time as `5h 23m` / `45m 12s` / `9s`.
    #[must_use]
    pub fn formatted_time_played(&self) -> String {
        format_played(self.total_time_played)
    }
}

impl StatsSink for PlayerStats {
    fn update_high_score(&mut self, score: u64) {
        self.high_score = self.high_score.max(score);
    }

    fn add_time_played(&mut self, duration: Duration) {
        self.total_time_played += duration;
    }
}

/// A sink that discards everything, for hosts that do not track stats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStats;

impl StatsSink for NullStats {
    fn update_high_score(&mut self, _score: u64) {}

    fn add_time_played(&mut self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_keeps_the_maximum() {
        let mut stats = PlayerStats::new();
        stats.update_high_score(500);
        stats.update_high_score(300);
        assert_eq!(stats.high_score(), 500);
        stats.update_high_score(900);
        assert_eq!(stats.high_score(), 900);
    }

    #[test]
    fn time_played_accumulates() {
        let mut stats = PlayerStats::new();
        stats.add_time_played(Duration::from_secs(40));
        stats.add_time_played(Duration::from_secs(32));
        assert_eq!(stats.total_time_played(), Duration::from_secs(72));
        assert_eq!(stats.formatted_time_played(), "1m 12s");
    }
}
