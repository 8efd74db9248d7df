use serde::{Deserialize, Serialize};

/// Read-only difficulty collaborator.
///
/// The engine samples [`speed_multiplier`](Self::speed_multiplier) on every
/// fall-interval computation, so a host can change the setting mid-game and
/// the next re-arm picks it up. Values are expected around `0.6..=1.5`.
pub trait DifficultySource {
    fn speed_multiplier(&self) -> f64;
}

/// Drop-speed presets a host can offer in its settings screen.
///
/// How the chosen value is persisted is the host's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum DropSpeed {
    /// Relaxed pace.
    Slow,
    /// Classic pace.
    #[default]
    Normal,
    /// Quick thinking required.
    Fast,
}

impl DropSpeed {
    /// Base multiplier for the fall interval; lower is faster.
    #[must_use]
    pub const fn speed_multiplier(self) -> f64 {
        match self {
            DropSpeed::Slow => 1.5,
            DropSpeed::Normal => 1.0,
            DropSpeed::Fast => 0.6,
        }
    }
}

impl DifficultySource for DropSpeed {
    fn speed_multiplier(&self) -> f64 {
        Self::speed_multiplier(*self)
    }
}

/// A bare multiplier is a valid difficulty source; handy in tests.
impl DifficultySource for f64 {
    fn speed_multiplier(&self) -> f64 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_multipliers() {
        assert!((DropSpeed::Slow.speed_multiplier() - 1.5).abs() < f64::EPSILON);
        assert!((DropSpeed::Normal.speed_multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((DropSpeed::Fast.speed_multiplier() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn f64_is_its_own_source() {
        let source: &dyn DifficultySource = &0.75;
        assert!((source.speed_multiplier() - 0.75).abs() < f64::EPSILON);
    }
}
