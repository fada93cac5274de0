//! Data transfer objects for the on-disk snapshot format.

mod snapshot;

pub use snapshot::{SessionDTO, SessionRecordDTO, SnapshotDTO};
