//! Slot addressing.
//!
//! A slot is addressed either by `(floor, row, col)` or by `(floor, position)`
//! where `position = (row - 1) * COLS + col`. Every axis is 1-based.

use std::fmt;

use crate::error::{ParkingError, Result};

/// Number of floors in the facility.
pub const FLOORS: u8 = 3;
/// Number of rows on each floor.
pub const ROWS: u8 = 10;
/// Number of columns in each row.
pub const COLS: u8 = 10;
/// Number of slots on one floor, i.e. the largest linear position.
pub const SLOTS_PER_FLOOR: u16 = ROWS as u16 * COLS as u16;
/// Number of slots in the whole facility.
pub const TOTAL_SLOTS: usize = FLOORS as usize * SLOTS_PER_FLOOR as usize;

/// A validated slot address. Construction checks every axis against the grid.
///
/// The only constructors are `new` and `from_position`, so every value in
/// circulation indexes inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotAddress {
    floor: u8,
    row: u8,
    col: u8,
}

impl SlotAddress {
    /// Validates raw coordinates, failing with `OutOfRange` on the first bad axis.
    pub fn new(floor: i64, row: i64, col: i64) -> Result<Self> {
        Ok(Self {
            floor: check_axis("floor", floor, FLOORS.into())? as u8,
            row: check_axis("row", row, ROWS.into())? as u8,
            col: check_axis("col", col, COLS.into())? as u8,
        })
    }

    /// Builds an address from the compact `(floor, position)` form stored with a session.
    pub fn from_position(floor: i64, position: i64) -> Result<Self> {
        let floor = check_axis("floor", floor, FLOORS.into())? as u8;
        let position = check_axis("position", position, SLOTS_PER_FLOOR.into())? as u16;
        let index = position - 1;
        Ok(Self {
            floor,
            row: (index / COLS as u16) as u8 + 1,
            col: (index % COLS as u16) as u8 + 1,
        })
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// `(row - 1) * COLS + col`, 1-based.
    pub fn position(&self) -> u16 {
        (self.row as u16 - 1) * COLS as u16 + self.col as u16
    }

    /// Zero-based index into a flat `[floor][row][col]` array.
    pub(crate) fn index(&self) -> usize {
        (self.floor as usize - 1) * SLOTS_PER_FLOOR as usize + self.position() as usize - 1
    }
}

impl fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F{} R{} C{} (#{})",
            self.floor,
            self.row,
            self.col,
            self.position()
        )
    }
}

/// Checks that `floor` is a valid 1-based floor number.
pub fn check_floor(floor: i64) -> Result<u8> {
    Ok(check_axis("floor", floor, FLOORS.into())? as u8)
}

fn check_axis(axis: &'static str, value: i64, max: i64) -> Result<i64> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParkingError::out_of_range(axis, value, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_row_major_and_one_based() {
        assert_eq!(SlotAddress::new(1, 1, 1).unwrap().position(), 1);
        assert_eq!(SlotAddress::new(1, 1, 10).unwrap().position(), 10);
        assert_eq!(SlotAddress::new(1, 2, 1).unwrap().position(), 11);
        assert_eq!(SlotAddress::new(3, 10, 10).unwrap().position(), 100);
    }

    #[test]
    fn test_from_position_inverts_position() {
        let slot = SlotAddress::from_position(2, 34).unwrap();
        assert_eq!((slot.floor(), slot.row(), slot.col()), (2, 4, 4));
        assert_eq!(slot, SlotAddress::new(2, 4, 4).unwrap());

        let last = SlotAddress::from_position(3, 100).unwrap();
        assert_eq!((last.row(), last.col()), (10, 10));
    }

    #[test]
    fn test_out_of_range_axes() {
        let err = SlotAddress::new(0, 1, 1).unwrap_err();
        assert!(matches!(err, ParkingError::OutOfRange { axis: "floor", .. }));

        let err = SlotAddress::new(1, 11, 1).unwrap_err();
        assert!(matches!(err, ParkingError::OutOfRange { axis: "row", .. }));

        let err = SlotAddress::new(1, 1, -3).unwrap_err();
        assert!(matches!(err, ParkingError::OutOfRange { axis: "col", .. }));

        let err = SlotAddress::from_position(1, 101).unwrap_err();
        assert!(matches!(err, ParkingError::OutOfRange { axis: "position", .. }));
    }

    #[test]
    fn test_index_covers_whole_facility() {
        assert_eq!(SlotAddress::new(1, 1, 1).unwrap().index(), 0);
        assert_eq!(SlotAddress::new(2, 1, 1).unwrap().index(), 100);
        assert_eq!(SlotAddress::new(3, 10, 10).unwrap().index(), TOTAL_SLOTS - 1);
    }

    #[test]
    fn test_every_constructible_address_indexes_inside_grid() {
        for floor in 1..=i64::from(FLOORS) {
            for position in 1..=i64::from(SLOTS_PER_FLOOR) {
                let slot = SlotAddress::from_position(floor, position).unwrap();
                assert!(slot.index() < TOTAL_SLOTS);
            }
        }
        assert!(SlotAddress::new(9, 1, 1).is_err());
        assert!(SlotAddress::from_position(9, 1).is_err());
    }
}
