//! Parking session domain model.
//!
//! A `Session` is one vehicle's stay in a slot. When the vehicle leaves, the
//! session is frozen into a `SessionRecord` carrying its end time and fee.

use chrono::NaiveDateTime;

use crate::slot::SlotAddress;

/// Fee amount in whole currency units.
pub type Fee = u32;

/// An active parking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// When the vehicle entered.
    pub started_at: NaiveDateTime,
    /// The occupied slot.
    pub slot: SlotAddress,
    /// Whether a subscription was purchased during this stay.
    pub subscriber: bool,
}

impl Session {
    pub fn new(started_at: NaiveDateTime, slot: SlotAddress) -> Self {
        Self {
            started_at,
            slot,
            subscriber: false,
        }
    }

    /// Freezes the session into a history record.
    pub fn close(&self, ended_at: NaiveDateTime, fee: Fee) -> SessionRecord {
        SessionRecord {
            started_at: self.started_at,
            ended_at,
            slot: self.slot,
            subscriber: self.subscriber,
            fee,
        }
    }
}

/// A completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub slot: SlotAddress,
    pub subscriber: bool,
    pub fee: Fee,
}

/// What `leave` hands back to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub vehicle_id: String,
    pub slot: SlotAddress,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub subscriber: bool,
    pub fee: Fee,
}

impl Receipt {
    /// Whole minutes parked.
    pub fn elapsed_minutes(&self) -> i64 {
        (self.ended_at - self.started_at).num_minutes()
    }
}

/// Subscription plans offered at the counter.
///
/// The plan only changes what is displayed to the driver; purchasing any plan
/// marks the active session as a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionPlan {
    OneMonth,
    ThreeMonths,
    SixMonths,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 3] = [
        SubscriptionPlan::OneMonth,
        SubscriptionPlan::ThreeMonths,
        SubscriptionPlan::SixMonths,
    ];

    /// Resolves a plan code as typed at the counter (`1`, `3`, `6`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::OneMonth),
            "3" => Some(Self::ThreeMonths),
            "6" => Some(Self::SixMonths),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::OneMonth => "1",
            Self::ThreeMonths => "3",
            Self::SixMonths => "6",
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
        }
    }

    pub fn price(&self) -> Fee {
        match self {
            Self::OneMonth => 100_000,
            Self::ThreeMonths => 270_000,
            Self::SixMonths => 500_000,
        }
    }

    pub fn label(&self) -> String {
        format!("{} month(s) - {} won", self.months(), self.price())
    }
}
