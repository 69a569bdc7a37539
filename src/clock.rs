use chrono::{DateTime, Local, NaiveDate, Utc};

use nest_core::Clock;

/// Real-time clock. Calendar days follow the user's local time zone so the
/// daily check-in resets at local midnight.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
