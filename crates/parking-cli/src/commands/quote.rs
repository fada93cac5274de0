use anyhow::Result;
use parking_core::clock::format_timestamp;

use crate::bootstrap::Service;

pub fn show(service: &Service, vehicle_id: &str) -> Result<()> {
    let vehicle_id = vehicle_id.trim();
    let session = service.session(vehicle_id)?;
    let fee = service.quote(vehicle_id)?;
    println!(
        "{} parked at {} since {}: {} won if leaving at {} (at most {} won)",
        vehicle_id,
        session.slot,
        format_timestamp(&session.started_at),
        fee,
        format_timestamp(&service.now()),
        service.policy().max_fee(session.subscriber)
    );
    Ok(())
}
