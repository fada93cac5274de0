//! Snapshot repository trait.
//!
//! Defines the interface between the allocation service and whatever durable
//! store backs it.

use std::cell::{Cell, RefCell};

use crate::error::{ParkingError, Result};
use crate::snapshot::Snapshot;

/// The persistence gateway.
///
/// # Implementation Notes
///
/// - `load` returns an empty snapshot when nothing has been saved yet and
///   `CorruptSnapshot` when stored data cannot be read back.
/// - `save` must leave either the previous or the new content in place, never
///   a partial write.
pub trait SnapshotRepository {
    /// Loads the last saved snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Snapshot)`: stored state, or an empty snapshot on first run
    /// - `Err(CorruptSnapshot)`: stored data exists but has the wrong shape
    /// - `Err(_)`: the store could not be read
    fn load(&self) -> Result<Snapshot>;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for Box<R> {
    fn load(&self) -> Result<Snapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

/// Keeps the snapshot in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    stored: RefCell<Option<Snapshot>>,
    fail_saves: Cell<bool>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            stored: RefCell::new(Some(snapshot)),
            fail_saves: Cell::new(false),
        }
    }

    /// Makes every following `save` fail with an IO error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn stored(&self) -> Option<Snapshot> {
        self.stored.borrow().clone()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.stored.borrow().clone().unwrap_or_default())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves.get() {
            return Err(ParkingError::io("simulated write failure"));
        }
        *self.stored.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}
