//! JSON file-backed snapshot repository.

use parking_core::{ParkingError, Result, Snapshot, SnapshotRepository};
use std::path::{Path, PathBuf};

use crate::dto::SnapshotDTO;
use crate::storage::{AtomicJsonError, AtomicJsonFile};

/// Stores the whole snapshot in a single JSON document, replaced atomically
/// on every save.
pub struct JsonSnapshotRepository {
    file: AtomicJsonFile<SnapshotDTO>,
}

impl JsonSnapshotRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl SnapshotRepository for JsonSnapshotRepository {
    fn load(&self) -> Result<Snapshot> {
        let dto = match self.file.load() {
            Ok(Some(dto)) => dto,
            Ok(None) => {
                tracing::info!("[Snapshot] No snapshot at {:?}, starting empty", self.path());
                return Ok(Snapshot::default());
            }
            Err(AtomicJsonError::ParseError(e)) => {
                return Err(ParkingError::corrupt(format!(
                    "{}: {}",
                    self.path().display(),
                    e
                )));
            }
            Err(e) => return Err(ParkingError::io(e.to_string())),
        };

        let snapshot = dto.into_domain()?;
        tracing::debug!(
            "[Snapshot] Loaded {} active session(s) from {:?}",
            snapshot.registry.len(),
            self.path()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.file
            .save(&SnapshotDTO::from(snapshot))
            .map_err(|e| match e {
                AtomicJsonError::SerializeError(e) => e.into(),
                other => ParkingError::io(other.to_string()),
            })
    }
}
