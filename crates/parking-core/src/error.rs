//! Error types for the parking system.

use thiserror::Error;

/// A shared error type for the whole parking workspace.
///
/// Domain variants (`AlreadyParked` through `CorruptSnapshot`) are recoverable
/// conditions that the caller reports and retries. `Io`, `Serialization` and
/// `Config` come from the storage and configuration layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// The vehicle already has an active session.
    #[error("Vehicle '{vehicle_id}' is already parked")]
    AlreadyParked { vehicle_id: String },

    /// The vehicle has no active session.
    #[error("Vehicle '{vehicle_id}' is not parked")]
    NotParked { vehicle_id: String },

    /// A floor, row, column or position lies outside the configured grid.
    #[error("{axis} {value} is out of range (1..={max})")]
    OutOfRange {
        axis: &'static str,
        value: i64,
        max: i64,
    },

    /// The requested slot is already occupied.
    #[error("Slot F{floor} R{row} C{col} is already taken")]
    SlotTaken { floor: u8, row: u8, col: u8 },

    /// The end of a session lies before its start.
    #[error("Invalid duration: session ends {minutes} minutes before it starts")]
    InvalidDuration { minutes: i64 },

    /// The snapshot file exists but does not have the expected shape.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Vehicle identifiers must be non-empty.
    #[error("Invalid vehicle id: must not be empty")]
    InvalidVehicleId,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ParkingError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn already_parked(vehicle_id: impl Into<String>) -> Self {
        Self::AlreadyParked {
            vehicle_id: vehicle_id.into(),
        }
    }

    pub fn not_parked(vehicle_id: impl Into<String>) -> Self {
        Self::NotParked {
            vehicle_id: vehicle_id.into(),
        }
    }

    pub fn out_of_range(axis: &'static str, value: impl Into<i64>, max: impl Into<i64>) -> Self {
        Self::OutOfRange {
            axis,
            value: value.into(),
            max: max.into(),
        }
    }

    /// Creates a CorruptSnapshot error
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptSnapshot(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_already_parked(&self) -> bool {
        matches!(self, Self::AlreadyParked { .. })
    }

    pub fn is_not_parked(&self) -> bool {
        matches!(self, Self::NotParked { .. })
    }

    pub fn is_slot_taken(&self) -> bool {
        matches!(self, Self::SlotTaken { .. })
    }

    pub fn is_corrupt_snapshot(&self) -> bool {
        matches!(self, Self::CorruptSnapshot(_))
    }

    /// Errors the interactive menu should report and re-prompt on.
    ///
    /// Everything except a corrupt snapshot and storage failures.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::CorruptSnapshot(_) | Self::Io { .. } | Self::Serialization { .. }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParkingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParkingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParkingError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ParkingError>`.
pub type Result<T> = std::result::Result<T, ParkingError>;
