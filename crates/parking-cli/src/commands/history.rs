use crate::bootstrap::Service;
use crate::render;

pub fn show(service: &Service, vehicle_id: &str) {
    let vehicle_id = vehicle_id.trim();
    println!("{}", render::history(vehicle_id, service.history(vehicle_id)));
}
