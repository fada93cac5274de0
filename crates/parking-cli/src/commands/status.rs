use colored::Colorize;
use parking_core::clock::format_timestamp;

use crate::bootstrap::Service;
use crate::render;

pub fn show(service: &Service) {
    println!("{}", render::free_counts(&service.free_counts()).bright_green());

    let mut parked = service.active_sessions().peekable();
    if parked.peek().is_none() {
        println!("{}", "No vehicles parked".bright_black());
    }
    for (vehicle_id, session) in parked {
        println!(
            "  {:<12} {}  since {}{}",
            vehicle_id,
            session.slot,
            format_timestamp(&session.started_at),
            if session.subscriber { "  (subscriber)" } else { "" }
        );
    }

    println!("Revenue so far: {} won", service.total_revenue());
}
