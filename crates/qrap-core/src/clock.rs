//! Injectable time source.
//!
//! Every timestamp the engine writes (`created_at`, `discovered_at`,
//! `completed_at`, ...) is read from a [`Clock`].

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Single source of current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Starts at a given instant and advances by `step` on every read.
///
/// Useful when a test needs distinct, ordered creation times.
#[derive(Debug)]
pub struct SteppingClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = *current;
        *current = now + self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_never_moves() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), t);
    }

    #[test]
    fn stepping_clock_advances() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let clock = SteppingClock::new(t, Duration::seconds(1));
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), t + Duration::seconds(1));
        assert_eq!(clock.now(), t + Duration::seconds(2));
    }
}
