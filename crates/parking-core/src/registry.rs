//! Vehicle registry: the active sessions keyed by vehicle identifier.

use std::collections::BTreeMap;

use crate::error::{ParkingError, Result};
use crate::session::Session;

/// Active sessions, at most one per vehicle.
///
/// Identifiers are opaque and kept exactly as given; only the empty string
/// is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleRegistry {
    sessions: BTreeMap<String, Session>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, vehicle_id: &str) -> bool {
        self.sessions.contains_key(vehicle_id)
    }

    /// Fails with `AlreadyParked` if the vehicle has an active session.
    pub fn register(&mut self, vehicle_id: &str, session: Session) -> Result<()> {
        let vehicle_id = check_vehicle_id(vehicle_id)?;
        if self.sessions.contains_key(vehicle_id) {
            return Err(ParkingError::already_parked(vehicle_id));
        }
        self.sessions.insert(vehicle_id.to_string(), session);
        Ok(())
    }

    pub fn lookup(&self, vehicle_id: &str) -> Result<&Session> {
        self.sessions
            .get(vehicle_id)
            .ok_or_else(|| ParkingError::not_parked(vehicle_id))
    }

    pub fn lookup_mut(&mut self, vehicle_id: &str) -> Result<&mut Session> {
        self.sessions
            .get_mut(vehicle_id)
            .ok_or_else(|| ParkingError::not_parked(vehicle_id))
    }

    pub fn remove(&mut self, vehicle_id: &str) -> Result<Session> {
        self.sessions
            .remove(vehicle_id)
            .ok_or_else(|| ParkingError::not_parked(vehicle_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.sessions.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Rejects the empty identifier.
pub fn check_vehicle_id(vehicle_id: &str) -> Result<&str> {
    if vehicle_id.is_empty() {
        Err(ParkingError::InvalidVehicleId)
    } else {
        Ok(vehicle_id)
    }
}
