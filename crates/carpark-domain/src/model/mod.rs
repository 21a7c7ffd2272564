//! Domain model types

pub mod parking_lot;

pub use parking_lot::{Departure, OccupiedSlot, ParkingLot, DEFAULT_FEE_PER_HOUR, MAX_CAPACITY};
