//! Injectable time source

use chrono::{DateTime, Utc};

/// Time source for the booking protocols
///
/// Injected into [`crate::booking::BookingManager`] so due-date logic
/// (past-due sweeps, checkout timestamps) can be tested without coupling
/// to the wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time as unix millis (record timestamp shape)
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall-clock implementation used in production
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
