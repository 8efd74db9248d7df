use std::time::{Duration, Instant};

/// Floor for the descent interval; fast-drop runs at exactly this rate.
pub const MIN_FALL_INTERVAL: Duration = Duration::from_millis(50);

const BASE_FALL_SECS: f64 = 1.0;
const LEVEL_STEP_SECS: f64 = 0.08;

/// Computes the descent interval for a level and difficulty setting.
///
/// With fast-drop active the interval is pinned to [`MIN_FALL_INTERVAL`].
/// Otherwise it is `base * m - (level - 1) * 0.08 * m` seconds with
/// `base = 1.0`, clamped to the floor - the multiplier `m` scales both the
/// base and the per-level reduction, so changing difficulty keeps the level
/// progression proportional.
#[must_use]
pub fn fall_interval(level: u32, fast_drop: bool, speed_multiplier: f64) -> Duration {
    if fast_drop {
        return MIN_FALL_INTERVAL;
    }
    let base = BASE_FALL_SECS * speed_multiplier;
    let reduction = f64::from(level.saturating_sub(1)) * LEVEL_STEP_SECS * speed_multiplier;
    let secs = (base - reduction).max(MIN_FALL_INTERVAL.as_secs_f64());
    Duration::from_secs_f64(secs)
}

/// Recurring deadline for timed descent.
///
/// The engine owns one of these instead of a callback timer: the host's
/// event loop reports the current time and the timer says whether a tick is
/// due. Cancelling clears the deadline, so once disarmed no stale tick can
/// ever fire - the deterministic-cancellation requirement falls out of the
/// representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallTimer {
    deadline: Option<Instant>,
}

impl FallTimer {
    /// Schedules the next tick a full interval after `now`, replacing any
    /// pending deadline. Used on start, resume, and interval changes.
    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.deadline = Some(now + interval);
    }

    /// Clears the pending deadline. No tick fires until re-armed.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consumes one due tick, stepping the deadline forward by `interval`.
    ///
    /// Returns `false` when disarmed or not yet due. Deadlines step from the
    /// previous deadline rather than from `now`, so a host that reports time
    /// late still gets every elapsed tick on repeated calls.
    pub fn fire(&mut self, now: Instant, interval: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = Some(deadline + interval);
                true
            }
            _ => false,
        }
    }
}

/// Pause-aware accumulator for time actually spent playing.
///
/// Time accrues only between [`resume`](Self::resume) and
/// [`pause`](Self::pause); [`take`](Self::take) drains the accumulated total
/// so a session is committed to the stats collaborator exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionClock {
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl SessionClock {
    /// Discards any previous total and starts accruing from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        self.resumed_at = Some(now);
    }

    /// Begins accruing from `now`. No-op if already running.
    pub fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }

    /// Stops accruing, folding the open span into the total.
    pub fn pause(&mut self, now: Instant) {
        if let Some(resumed_at) = self.resumed_at.take() {
            self.accumulated += now.saturating_duration_since(resumed_at);
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Total played time, including the currently open span.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        let open = self
            .resumed_at
            .map_or(Duration::ZERO, |t| now.saturating_duration_since(t));
        self.accumulated + open
    }

    /// Stops the clock and drains the total, leaving it at zero.
    pub fn take(&mut self, now: Instant) -> Duration {
        self.pause(now);
        std::mem::take(&mut self.accumulated)
    }
}

/// Formats an in-game clock as `m:ss`, e.g. `3:07`.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats a cumulative played duration as `5h 23m`, `45m 12s`, or `9s`.
#[must_use]
pub fn format_played(total: Duration) -> String {
    let total = total.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(interval: Duration) -> f64 {
        interval.as_secs_f64()
    }

    #[test]
    fn fall_interval_at_level_one() {
        assert!((secs(fall_interval(1, false, 1.0)) - 1.0).abs() < 1e-9);
        assert!((secs(fall_interval(1, false, 0.6)) - 0.6).abs() < 1e-9);
        assert!((secs(fall_interval(1, false, 1.5)) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn fall_interval_shrinks_with_level() {
        // Level 2 at normal speed: 1.0 - 0.08 = 0.92s.
        assert!((secs(fall_interval(2, false, 1.0)) - 0.92).abs() < 1e-9);
        // Multiplier scales the reduction too: 0.6 - 0.048 = 0.552s.
        assert!((secs(fall_interval(2, false, 0.6)) - 0.552).abs() < 1e-9);
        for level in 1..30 {
            assert!(fall_interval(level + 1, false, 1.0) <= fall_interval(level, false, 1.0));
        }
    }

    #[test]
    fn fall_interval_clamps_at_the_floor() {
        // Level 13 at normal speed would be 0.04s without the clamp.
        assert_eq!(fall_interval(13, false, 1.0), MIN_FALL_INTERVAL);
        assert_eq!(fall_interval(100, false, 1.5), MIN_FALL_INTERVAL);
    }

    #[test]
    fn fast_drop_pins_the_interval() {
        assert_eq!(fall_interval(1, true, 1.5), MIN_FALL_INTERVAL);
        assert_eq!(fall_interval(20, true, 0.6), MIN_FALL_INTERVAL);
    }

    #[test]
    fn fall_timer_fires_once_per_elapsed_interval() {
        let interval = Duration::from_secs(1);
        let t0 = Instant::now();
        let mut timer = FallTimer::default();
        timer.arm(t0, interval);

        assert!(!timer.fire(t0, interval));
        let t1 = t0 + Duration::from_millis(1500);
        assert!(timer.fire(t1, interval));
        assert!(!timer.fire(t1, interval));

        // Three intervals later, three ticks are due.
        let t2 = t1 + Duration::from_secs(3);
        assert!(timer.fire(t2, interval));
        assert!(timer.fire(t2, interval));
        assert!(timer.fire(t2, interval));
        assert!(!timer.fire(t2, interval));
    }

    #[test]
    fn cancelled_fall_timer_never_fires() {
        let interval = Duration::from_millis(100);
        let t0 = Instant::now();
        let mut timer = FallTimer::default();
        timer.arm(t0, interval);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.fire(t0 + Duration::from_secs(10), interval));
    }

    #[test]
    fn session_clock_accrues_only_while_running() {
        let t0 = Instant::now();
        let mut clock = SessionClock::default();
        clock.restart(t0);

        let t1 = t0 + Duration::from_secs(5);
        assert_eq!(clock.elapsed(t1), Duration::from_secs(5));

        clock.pause(t1);
        let t2 = t1 + Duration::from_secs(60);
        assert_eq!(clock.elapsed(t2), Duration::from_secs(5));

        clock.resume(t2);
        let t3 = t2 + Duration::from_secs(3);
        assert_eq!(clock.elapsed(t3), Duration::from_secs(8));
    }

    #[test]
    fn session_clock_take_drains_the_total() {
        let t0 = Instant::now();
        let mut clock = SessionClock::default();
        clock.restart(t0);
        let t1 = t0 + Duration::from_secs(42);
        assert_eq!(clock.take(t1), Duration::from_secs(42));
        // A second take reports nothing - the session was already committed.
        assert_eq!(clock.take(t1 + Duration::from_secs(9)), Duration::ZERO);
        assert!(!clock.is_running());
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(Duration::ZERO), "0:00");
        assert_eq!(format_clock(Duration::from_secs(59)), "0:59");
        assert_eq!(format_clock(Duration::from_secs(187)), "3:07");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn played_formatting() {
        assert_eq!(format_played(Duration::from_secs(9)), "9s");
        assert_eq!(format_played(Duration::from_secs(45 * 60 + 12)), "45m 12s");
        assert_eq!(
            format_played(Duration::from_secs(5 * 3600 + 23 * 60)),
            "5h 23m"
        );
    }
}
