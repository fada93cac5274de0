//! Persisted state: active sessions plus completed-session history.

use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::history::HistoryLog;
use crate::registry::VehicleRegistry;

/// Everything the snapshot file holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub registry: VehicleRegistry,
    pub history: HistoryLog,
}

impl Snapshot {
    pub fn new(registry: VehicleRegistry, history: HistoryLog) -> Self {
        Self { registry, history }
    }

    /// Checks that no two active sessions share a slot.
    pub fn validate(&self) -> Result<()> {
        OccupancyGrid::project(&self.registry).map(|_| ())
    }
}
