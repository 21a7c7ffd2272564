//! Domain layer: the parking lot model and the services it relies on

pub mod clock;
pub mod model;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use model::{Departure, OccupiedSlot, ParkingLot, DEFAULT_FEE_PER_HOUR, MAX_CAPACITY};
