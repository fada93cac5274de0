//! Billing engine.
//!
//! Fee rules:
//! - the first 20 minutes are free
//! - 5000 covers the first hour
//! - every started 30 minutes after that adds 500
//! - a stay never costs more than 20000
//! - subscribers pay half, rounded down, after the cap
//!
//! There is no re-entry discount and no per-day proration: a stay spanning
//! several days is billed as one duration against a single cap.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ParkingError, Result};
use crate::session::Fee;

/// Tunable fee constants. `Default` holds the posted tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeePolicy {
    pub grace_minutes: i64,
    pub base_fee: Fee,
    pub base_minutes: i64,
    pub increment_minutes: i64,
    pub increment_fee: Fee,
    pub daily_cap: Fee,
    pub subscriber_discount_percent: u32,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            grace_minutes: 20,
            base_fee: 5000,
            base_minutes: 60,
            increment_minutes: 30,
            increment_fee: 500,
            daily_cap: 20000,
            subscriber_discount_percent: 50,
        }
    }
}

impl FeePolicy {
    /// Fee for a stay from `start` to `end`.
    ///
    /// Fails with `InvalidDuration` if `end` is before `start`.
    pub fn compute(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        subscriber: bool,
    ) -> Result<Fee> {
        if end < start {
            return Err(ParkingError::InvalidDuration {
                minutes: (end - start).num_minutes(),
            });
        }
        Ok(self.fee_for_minutes((end - start).num_minutes(), subscriber))
    }

    /// Fee for a whole number of elapsed minutes. Negative input is treated as zero.
    pub fn fee_for_minutes(&self, elapsed: i64, subscriber: bool) -> Fee {
        if elapsed <= self.grace_minutes {
            return 0;
        }

        let mut fee = u64::from(self.base_fee);
        if elapsed > self.base_minutes && self.increment_minutes > 0 {
            let over = elapsed - self.base_minutes;
            let increments = (over + self.increment_minutes - 1) / self.increment_minutes;
            let extra = (increments as u64).saturating_mul(u64::from(self.increment_fee));
            fee = fee.saturating_add(extra);
        }

        let mut fee = fee.min(u64::from(self.daily_cap)) as Fee;
        if subscriber {
            let percent = self.subscriber_discount_percent.min(100);
            fee = (u64::from(fee) * u64::from(100 - percent) / 100) as Fee;
        }
        fee
    }

    /// Highest fee a stay can reach.
    pub fn max_fee(&self, subscriber: bool) -> Fee {
        self.fee_for_minutes(i64::MAX / 2, subscriber)
    }
}

/// Fee under the posted tariff.
pub fn compute_fee(start: NaiveDateTime, end: NaiveDateTime, subscriber: bool) -> Result<Fee> {
    FeePolicy::default().compute(start, end, subscriber)
}
