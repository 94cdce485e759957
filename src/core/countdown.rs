//! Remaining-duration countdowns advanced once per tick.
//!
//! Every timed wait in the encounter and behavior code is one of these rather than a
//! suspended call: a sequence that is waiting just ticks its countdown and does nothing else.

/// Countdowns within this margin of zero count as elapsed, so accumulated float error
/// in per-frame deltas never costs an extra tick.
pub const COUNTDOWN_EPSILON: f32 = 1e-4;

/// A fixed-duration countdown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
}

impl Countdown {
    /// Starts a countdown of `duration` seconds. Negative durations clamp to zero.
    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            remaining: duration,
        }
    }

    /// A countdown that has already elapsed.
    pub fn elapsed() -> Self {
        Self::default()
    }

    /// Advances by `dt` seconds and reports whether the countdown has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        }
        self.is_elapsed()
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining <= COUNTDOWN_EPSILON
    }

    /// Restarts with the original duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    /// Forces the countdown to elapse immediately.
    pub fn finish(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Progress from 0.0 (just started) to 1.0 (elapsed).
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 || self.is_elapsed() {
            1.0
        } else {
            1.0 - self.remaining / self.duration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_absorbs_float_drift() {
        // 0.1 summed eight times lands a hair short of 0.8 in f32
        let mut countdown = Countdown::new(0.8);
        let mut ticks = 0;
        while !countdown.tick(0.1) {
            ticks += 1;
            assert!(ticks < 20, "countdown never elapsed");
        }
        assert_eq!(ticks + 1, 8);
    }

    #[test]
    fn test_countdown_fraction_and_reset() {
        let mut countdown = Countdown::new(2.0);
        assert_eq!(countdown.fraction(), 0.0);

        countdown.tick(0.5);
        assert!((countdown.fraction() - 0.25).abs() < 1e-5);

        countdown.finish();
        assert!(countdown.is_elapsed());
        assert_eq!(countdown.fraction(), 1.0);

        countdown.reset();
        assert_eq!(countdown.remaining(), 2.0);
    }

    #[test]
    fn test_zero_duration_is_elapsed() {
        assert!(Countdown::new(0.0).is_elapsed());
        assert!(Countdown::new(-3.0).is_elapsed());
        assert!(Countdown::elapsed().tick(0.0));
    }
}
