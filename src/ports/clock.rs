use chrono::{DateTime, Utc};

/// Source of the current time
///
/// Injected so that the day boundary for check-ins can be pinned in tests.
#[mockall::automock]
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}
