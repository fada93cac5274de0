//! Append-only log of completed sessions.

use std::collections::BTreeMap;

use crate::session::SessionRecord;

/// Completed sessions per vehicle, in exit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    records: BTreeMap<String, Vec<SessionRecord>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, vehicle_id: &str, record: SessionRecord) {
        self.records
            .entry(vehicle_id.to_string())
            .or_default()
            .push(record);
    }

    /// Records for one vehicle; empty if it never left the facility.
    pub fn records(&self, vehicle_id: &str) -> &[SessionRecord] {
        self.records
            .get(vehicle_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SessionRecord])> {
        self.records
            .iter()
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }

    /// Sum of every fee ever charged.
    pub fn total_revenue(&self) -> u64 {
        self.records
            .values()
            .flatten()
            .map(|r| u64::from(r.fee))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
