//! Shared traits and calendar helpers.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the nest book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Calendar date packed as a `YYYYMMDD` integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayCode(u32);

impl DayCode {
    /// Sentinel for "never".
    pub const NONE: DayCode = DayCode(0);

    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year().max(0) as u32;
        DayCode(year * 10_000 + date.month() * 100 + date.day())
    }

    pub fn from_raw(raw: u32) -> Self {
        DayCode(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Decodes back into a calendar date. Returns `None` for the sentinel and
    /// for values that do not name a real day.
    pub fn to_date(self) -> Option<NaiveDate> {
        if self.is_none() {
            return None;
        }
        let year = (self.0 / 10_000) as i32;
        let month = (self.0 / 100) % 100;
        let day = self.0 % 100;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl From<NaiveDate> for DayCode {
    fn from(date: NaiveDate) -> Self {
        DayCode::from_date(date)
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("never")
        } else {
            write!(f, "{:08}", self.0)
        }
    }
}
