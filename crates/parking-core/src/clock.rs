//! Time source and timestamp formatting.
//!
//! Every timestamp in the system has minute precision and is taken from the
//! local clock without a timezone. The `Clock` trait lets the allocation
//! service read "now" from a single source that tests can control.

use chrono::{Local, NaiveDateTime, Timelike};
use std::cell::Cell;

/// `YYYY-MM-DD HH:MM`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Source of the current time.
pub trait Clock {
    /// Current local time, truncated to the minute.
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_minute(Local::now().naive_local())
    }
}

/// A clock that returns whatever it was last set to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(truncate_to_minute(start)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(truncate_to_minute(now));
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.now.set(self.now.get() + chrono::Duration::minutes(minutes));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT)
}
