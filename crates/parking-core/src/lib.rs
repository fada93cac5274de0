//! Domain layer of the parking system: slots, the occupancy grid, sessions,
//! the vehicle registry, the history log, billing and the persistence
//! contract.

pub mod billing;
pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod registry;
pub mod repository;
pub mod session;
pub mod slot;
pub mod snapshot;

pub use billing::{FeePolicy, compute_fee};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ParkingConfig;
pub use error::{ParkingError, Result};
pub use grid::OccupancyGrid;
pub use history::HistoryLog;
pub use registry::VehicleRegistry;
pub use repository::{InMemorySnapshotRepository, SnapshotRepository};
pub use session::{Fee, Receipt, Session, SessionRecord, SubscriptionPlan};
pub use slot::{COLS, FLOORS, ROWS, SlotAddress};
pub use snapshot::Snapshot;
