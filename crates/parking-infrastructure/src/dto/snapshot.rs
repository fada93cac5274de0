//! Snapshot DTOs.
//!
//! These mirror the on-disk JSON exactly. `is_guest` carries the subscriber
//! flag and positions are stored as the 1-based linear slot number.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use parking_core::clock::{format_timestamp, parse_timestamp};
use parking_core::{
    Fee, HistoryLog, ParkingError, Result, Session, SessionRecord, SlotAddress, Snapshot,
    VehicleRegistry,
};

/// Root of the snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDTO {
    #[serde(default)]
    pub user_db: BTreeMap<String, SessionDTO>,
    #[serde(default)]
    pub user_history_db: BTreeMap<String, Vec<SessionRecordDTO>>,
}

/// An active session. `end_time` is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDTO {
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub is_guest: bool,
    pub floor: i64,
    pub position_num: i64,
}

/// A completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecordDTO {
    pub start_time: String,
    pub end_time: String,
    pub is_guest: bool,
    pub floor: i64,
    pub position_num: i64,
    pub payment: i64,
}

// ============================================================================
// Domain -> DTO
// ============================================================================

impl From<&Session> for SessionDTO {
    fn from(session: &Session) -> Self {
        SessionDTO {
            start_time: format_timestamp(&session.started_at),
            end_time: String::new(),
            is_guest: session.subscriber,
            floor: session.slot.floor().into(),
            position_num: session.slot.position().into(),
        }
    }
}

impl From<&SessionRecord> for SessionRecordDTO {
    fn from(record: &SessionRecord) -> Self {
        SessionRecordDTO {
            start_time: format_timestamp(&record.started_at),
            end_time: format_timestamp(&record.ended_at),
            is_guest: record.subscriber,
            floor: record.slot.floor().into(),
            position_num: record.slot.position().into(),
            payment: record.fee.into(),
        }
    }
}

impl From<&Snapshot> for SnapshotDTO {
    fn from(snapshot: &Snapshot) -> Self {
        SnapshotDTO {
            user_db: snapshot
                .registry
                .iter()
                .map(|(id, session)| (id.to_string(), session.into()))
                .collect(),
            user_history_db: snapshot
                .history
                .iter()
                .map(|(id, records)| (id.to_string(), records.iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

// ============================================================================
// DTO -> Domain
// ============================================================================

impl SessionDTO {
    pub fn into_domain(self, vehicle_id: &str) -> Result<Session> {
        Ok(Session {
            started_at: parse_field(vehicle_id, "start_time", &self.start_time)?,
            slot: parse_slot(vehicle_id, self.floor, self.position_num)?,
            subscriber: self.is_guest,
        })
    }
}

impl SessionRecordDTO {
    pub fn into_domain(self, vehicle_id: &str) -> Result<SessionRecord> {
        let fee = Fee::try_from(self.payment).map_err(|_| {
            ParkingError::corrupt(format!(
                "vehicle '{}': payment {} is not a valid fee",
                vehicle_id, self.payment
            ))
        })?;

        Ok(SessionRecord {
            started_at: parse_field(vehicle_id, "start_time", &self.start_time)?,
            ended_at: parse_field(vehicle_id, "end_time", &self.end_time)?,
            slot: parse_slot(vehicle_id, self.floor, self.position_num)?,
            subscriber: self.is_guest,
            fee,
        })
    }
}

impl SnapshotDTO {
    /// Converts into the domain snapshot.
    ///
    /// Any malformed field, empty vehicle id or doubly occupied slot is
    /// reported as `CorruptSnapshot`.
    pub fn into_domain(self) -> Result<Snapshot> {
        let mut registry = VehicleRegistry::new();
        for (vehicle_id, dto) in self.user_db {
            let session = dto.into_domain(&vehicle_id)?;
            registry.register(&vehicle_id, session).map_err(|e| {
                ParkingError::corrupt(format!("user_db entry '{}': {}", vehicle_id, e))
            })?;
        }

        let mut history = HistoryLog::new();
        for (vehicle_id, records) in self.user_history_db {
            if vehicle_id.is_empty() {
                return Err(ParkingError::corrupt("user_history_db has an empty vehicle id"));
            }
            for dto in records {
                history.append(&vehicle_id, dto.into_domain(&vehicle_id)?);
            }
        }

        let snapshot = Snapshot::new(registry, history);
        snapshot.validate()?;
        Ok(snapshot)
    }
}

fn parse_field(vehicle_id: &str, field: &str, value: &str) -> Result<chrono::NaiveDateTime> {
    parse_timestamp(value).map_err(|e| {
        ParkingError::corrupt(format!(
            "vehicle '{}': {} '{}' is not YYYY-MM-DD HH:MM ({})",
            vehicle_id, field, value, e
        ))
    })
}

fn parse_slot(vehicle_id: &str, floor: i64, position: i64) -> Result<SlotAddress> {
    SlotAddress::from_position(floor, position)
        .map_err(|e| ParkingError::corrupt(format!("vehicle '{}': {}", vehicle_id, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "user_db": {
            "car_num0": {
                "start_time": "2023-01-01 10:00",
                "end_time": "",
                "is_guest": false,
                "floor": 1,
                "position_num": 2
            }
        },
        "user_history_db": {
            "car_num1": [
                {
                    "start_time": "2023-01-01 08:00",
                    "end_time": "2023-01-01 11:00",
                    "is_guest": true,
                    "floor": 1,
                    "position_num": 4,
                    "payment": 3500
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let dto: SnapshotDTO = serde_json::from_str(SAMPLE).unwrap();
        let snapshot = dto.into_domain().unwrap();

        let session = snapshot.registry.lookup("car_num0").unwrap();
        assert_eq!(session.slot, SlotAddress::new(1, 1, 2).unwrap());
        assert!(!session.subscriber);

        let records = snapshot.history.records("car_num1");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fee, 3500);
        assert!(records[0].subscriber);
    }

    #[test]
    fn test_dto_roundtrip_preserves_wire_format() {
        let dto: SnapshotDTO = serde_json::from_str(SAMPLE).unwrap();
        let snapshot = dto.clone().into_domain().unwrap();
        assert_eq!(SnapshotDTO::from(&snapshot), dto);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let dto: SnapshotDTO = serde_json::from_str("{}").unwrap();
        let snapshot = dto.into_domain().unwrap();
        assert!(snapshot.registry.is_empty());
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn test_bad_timestamp_is_corrupt() {
        let json = SAMPLE.replace("2023-01-01 10:00", "yesterday");
        let dto: SnapshotDTO = serde_json::from_str(&json).unwrap();
        assert!(dto.into_domain().unwrap_err().is_corrupt_snapshot());
    }

    #[test]
    fn test_floor_out_of_range_is_corrupt() {
        let mut dto: SnapshotDTO = serde_json::from_str(SAMPLE).unwrap();
        dto.user_db.get_mut("car_num0").unwrap().floor = 9;
        assert!(dto.into_domain().unwrap_err().is_corrupt_snapshot());
    }

    #[test]
    fn test_position_out_of_range_is_corrupt() {
        let json = SAMPLE.replace("\"position_num\": 2", "\"position_num\": 101");
        let dto: SnapshotDTO = serde_json::from_str(&json).unwrap();
        assert!(dto.into_domain().unwrap_err().is_corrupt_snapshot());
    }

    #[test]
    fn test_negative_payment_is_corrupt() {
        let json = SAMPLE.replace("3500", "-1");
        let dto: SnapshotDTO = serde_json::from_str(&json).unwrap();
        assert!(dto.into_domain().unwrap_err().is_corrupt_snapshot());
    }

    #[test]
    fn test_shared_slot_is_corrupt() {
        let mut dto: SnapshotDTO = serde_json::from_str(SAMPLE).unwrap();
        let twin = dto.user_db["car_num0"].clone();
        dto.user_db.insert("car_num9".to_string(), twin);
        assert!(dto.into_domain().unwrap_err().is_corrupt_snapshot());
    }

    #[test]
    fn test_empty_vehicle_id_is_corrupt() {
        let mut dto: SnapshotDTO = serde_json::from_str(SAMPLE).unwrap();
        let session = dto.user_db.remove("car_num0").unwrap();
        dto.user_db.insert(String::new(), session);
        assert!(dto.into_domain().unwrap_err().is_corrupt_snapshot());
    }

    #[test]
    fn test_vehicle_ids_are_kept_verbatim() {
        let mut dto: SnapshotDTO = serde_json::from_str(SAMPLE).unwrap();
        let mut padded = dto.user_db["car_num0"].clone();
        padded.position_num = 3;
        dto.user_db.insert(" car_num0".to_string(), padded);
        let records = dto.user_history_db["car_num1"].clone();
        dto.user_history_db.insert("car_num1 ".to_string(), records);

        let snapshot = dto.clone().into_domain().unwrap();
        assert_eq!(snapshot.registry.len(), 2);
        assert_eq!(snapshot.registry.lookup(" car_num0").unwrap().slot.position(), 3);
        assert_eq!(snapshot.history.records("car_num1 ").len(), 1);
        assert_eq!(snapshot.history.records("car_num1").len(), 1);
        assert_eq!(SnapshotDTO::from(&snapshot), dto);
    }
}
