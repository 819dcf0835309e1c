use crate::ports::clock::ClockPort;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same instant, so a test can keep a handle and move time while the domain
/// logic holds another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|err| err.into_inner()) = now;
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|err| err.into_inner());
        *now = *now + duration;
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use speculoos::prelude::*;

    #[test]
    fn test_manual_clock_shared() {
        let start = Utc.with_ymd_and_hms(2025, 11, 12, 17, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(Duration::days(1));
        assert_that!(clock.now()).is_equal_to(start + Duration::days(1));

        handle.set(start);
        assert_that!(clock.now()).is_equal_to(start);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let before = Utc::now();
        let res = SystemClock.now();
        assert_that!(res).is_greater_than_or_equal_to(before);
    }
}
