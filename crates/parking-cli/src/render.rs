//! Text rendering of floors, receipts and history.

use colored::Colorize;
use parking_core::clock::format_timestamp;
use parking_core::{Receipt, SessionRecord, SlotAddress};

pub const FREE: &str = "🅿️";
pub const OCCUPIED: &str = "🚗";
pub const SUGGESTED: &str = "✅";

/// Draws one floor as a grid, top row first, with row and column numbers.
///
/// `view[r][c]` is `true` for an occupied slot. `suggested` is drawn with its own glyph.
pub fn floor_grid(floor: u8, view: &[Vec<bool>], suggested: Option<SlotAddress>) -> String {
    let mut out = format!("Floor {}\n", floor);

    let cols = view.first().map(Vec::len).unwrap_or(0);
    out.push_str("    ");
    for c in 1..=cols {
        out.push_str(&format!("{:>3}", c));
    }
    out.push('\n');

    for (r, row) in view.iter().enumerate() {
        out.push_str(&format!("{:>3} ", r + 1));
        for (c, occupied) in row.iter().enumerate() {
            let is_suggested = suggested.is_some_and(|s| {
                s.floor() == floor && s.row() as usize == r + 1 && s.col() as usize == c + 1
            });
            let glyph = if is_suggested {
                SUGGESTED
            } else if *occupied {
                OCCUPIED
            } else {
                FREE
            };
            out.push(' ');
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out
}

pub fn free_counts(counts: &[(u8, usize)]) -> String {
    counts
        .iter()
        .map(|(floor, free)| format!("{}F: {} free", floor, free))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    out.push_str(&format!("Vehicle   : {}\n", receipt.vehicle_id));
    out.push_str(&format!("Slot      : {}\n", receipt.slot));
    out.push_str(&format!("Entered   : {}\n", format_timestamp(&receipt.started_at)));
    out.push_str(&format!("Left      : {}\n", format_timestamp(&receipt.ended_at)));
    out.push_str(&format!("Duration  : {} min\n", receipt.elapsed_minutes()));
    if receipt.subscriber {
        out.push_str("Discount  : subscriber\n");
    }
    out.push_str(&format!("Fee       : {} won", receipt.fee));
    out
}

pub fn history(vehicle_id: &str, records: &[SessionRecord]) -> String {
    if records.is_empty() {
        return format!("No completed sessions for {}", vehicle_id);
    }

    let mut out = format!("History of {}\n", vehicle_id.bold());
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} -> {}  {}  {:>6} won{}\n",
            i + 1,
            format_timestamp(&record.started_at),
            format_timestamp(&record.ended_at),
            record.slot,
            record.fee,
            if record.subscriber { "  (subscriber)" } else { "" }
        ));
    }
    let total: u64 = records.iter().map(|r| u64::from(r.fee)).sum();
    out.push_str(&format!("     total {} won", total));
    out
}
