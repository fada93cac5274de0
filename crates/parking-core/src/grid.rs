//! Occupancy grid.
//!
//! The grid is a projection of the vehicle registry: it is rebuilt from the
//! active sessions with [`OccupancyGrid::project`] and never persisted.

use crate::error::{ParkingError, Result};
use crate::registry::VehicleRegistry;
use crate::slot::{COLS, FLOORS, SLOTS_PER_FLOOR, SlotAddress, TOTAL_SLOTS, check_floor};

/// `[floor][row][col]` occupancy, stored flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self {
            cells: vec![false; TOTAL_SLOTS],
        }
    }
}

impl OccupancyGrid {
    /// An all-free grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the grid from the active sessions.
    ///
    /// Fails with `CorruptSnapshot` if two sessions reference the same slot.
    pub fn project(registry: &VehicleRegistry) -> Result<Self> {
        let mut grid = Self::new();
        for (vehicle_id, session) in registry.iter() {
            grid.occupy(session.slot).map_err(|_| {
                ParkingError::corrupt(format!(
                    "vehicle '{}' shares slot {} with another vehicle",
                    vehicle_id, session.slot
                ))
            })?;
        }
        Ok(grid)
    }

    pub fn is_free(&self, slot: SlotAddress) -> bool {
        !self.cells[slot.index()]
    }

    /// Fails with `SlotTaken` if the slot is already occupied.
    pub fn occupy(&mut self, slot: SlotAddress) -> Result<()> {
        let cell = &mut self.cells[slot.index()];
        if *cell {
            return Err(ParkingError::SlotTaken {
                floor: slot.floor(),
                row: slot.row(),
                col: slot.col(),
            });
        }
        *cell = true;
        Ok(())
    }

    pub fn free(&mut self, slot: SlotAddress) {
        self.cells[slot.index()] = false;
    }

    pub fn count_free(&self, floor: u8) -> Result<usize> {
        Ok(self.floor_cells(floor)?.iter().filter(|o| !**o).count())
    }

    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|o| **o).count()
    }

    /// The lowest free position on a floor, if any.
    pub fn first_free(&self, floor: u8) -> Result<Option<SlotAddress>> {
        let cells = self.floor_cells(floor)?;
        match cells.iter().position(|occupied| !*occupied) {
            Some(i) => Ok(Some(SlotAddress::from_position(floor.into(), i as i64 + 1)?)),
            None => Ok(None),
        }
    }

    /// Rows of a floor, `true` meaning occupied.
    pub fn floor_view(&self, floor: u8) -> Result<Vec<Vec<bool>>> {
        Ok(self
            .floor_cells(floor)?
            .chunks(COLS as usize)
            .map(<[bool]>::to_vec)
            .collect())
    }

    fn floor_cells(&self, floor: u8) -> Result<&[bool]> {
        let floor = check_floor(floor.into())? as usize;
        let per_floor = SLOTS_PER_FLOOR as usize;
        Ok(&self.cells[(floor - 1) * per_floor..floor * per_floor])
    }
}

/// Free-slot count for every floor, floor 1 first.
pub fn free_counts(grid: &OccupancyGrid) -> Vec<(u8, usize)> {
    (1..=FLOORS)
        .map(|floor| (floor, grid.count_free(floor).unwrap_or(0)))
        .collect()
}
