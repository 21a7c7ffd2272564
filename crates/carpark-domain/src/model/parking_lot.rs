//! Fixed-size parking lot with lowest-free-slot allocation

use carpark_types::{LotError, Vehicle, VehicleType};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::service::fee::{billed_hours, fee_for};
use crate::service::plate::Parity;
use crate::service::status_report::render_status;

/// Fee per billed hour when none is configured
pub const DEFAULT_FEE_PER_HOUR: u64 = 5000;

/// Largest lot size accepted
pub const MAX_CAPACITY: i64 = i32::MAX as i64;

/// An occupied slot together with its vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedSlot {
    /// 1-based slot number
    pub slot: usize,
    pub vehicle: Vehicle,
}

/// Result of a successful leave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub slot: usize,
    pub vehicle: Vehicle,
    pub hours: u64,
    pub fee: u64,
}

/// A parking lot with a fixed number of numbered slots.
///
/// Slot numbers are 1-based and stable for the lifetime of the lot.
/// Every lookup is a linear scan in slot order. Slot storage only grows
/// up to the highest slot ever occupied; slots beyond it are empty.
#[derive(Debug)]
pub struct ParkingLot<C: Clock = SystemClock> {
    slots: Vec<Option<Vehicle>>,
    capacity: usize,
    fee_per_hour: u64,
    clock: C,
}

impl ParkingLot<SystemClock> {
    /// Create a lot backed by the wall clock
    pub fn new(size: i64, fee_per_hour: u64) -> Result<Self, LotError> {
        Self::with_clock(size, fee_per_hour, SystemClock)
    }
}

impl<C: Clock> ParkingLot<C> {
    /// Create a lot with all slots empty.
    ///
    /// `size` must be in `1..=MAX_CAPACITY`.
    pub fn with_clock(size: i64, fee_per_hour: u64, clock: C) -> Result<Self, LotError> {
        if !(1..=MAX_CAPACITY).contains(&size) {
            return Err(LotError::InvalidConfiguration(size));
        }
        let capacity =
            usize::try_from(size).map_err(|_| LotError::InvalidConfiguration(size))?;
        Ok(Self {
            slots: Vec::new(),
            capacity,
            fee_per_hour,
            clock,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn fee_per_hour(&self) -> u64 {
        self.fee_per_hour
    }

    /// Park a vehicle in the lowest-numbered empty slot.
    ///
    /// The check-in time is always stamped here, replacing whatever the
    /// caller supplied. Returns the 1-based slot number.
    pub fn park(&mut self, mut vehicle: Vehicle) -> Result<usize, LotError> {
        if self.find_registration(&vehicle.registration_number).is_some() {
            debug!(registration = %vehicle.registration_number, "rejected duplicate registration");
            return Err(LotError::DuplicateVehicle(vehicle.registration_number));
        }

        let index = match self.slots.iter().position(Option::is_none) {
            Some(index) => index,
            None if self.slots.len() < self.capacity => {
                self.slots.push(None);
                self.slots.len() - 1
            }
            None => return Err(LotError::LotFull),
        };

        vehicle.check_in = Some(self.clock.now());
        debug!(slot = index + 1, registration = %vehicle.registration_number, "parked");
        self.slots[index] = Some(vehicle);
        Ok(index + 1)
    }

    /// Free a slot and bill the stay.
    ///
    /// Fails without mutating anything if the slot is out of range or empty.
    pub fn leave(&mut self, slot_number: i64) -> Result<Departure, LotError> {
        let index = self
            .index_of(slot_number)
            .filter(|&i| self.slots.get(i).is_some_and(Option::is_some))
            .ok_or(LotError::InvalidSlot(slot_number))?;

        let now = self.clock.now();
        let vehicle = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(LotError::InvalidSlot(slot_number))?;
        let elapsed = vehicle
            .check_in
            .map(|t| now - t)
            .unwrap_or_else(Duration::zero);
        let hours = billed_hours(elapsed);
        let fee = fee_for(hours, self.fee_per_hour);

        debug!(slot = index + 1, hours, fee, "left");
        Ok(Departure {
            slot: index + 1,
            vehicle,
            hours,
            fee,
        })
    }

    /// Occupied slots in ascending slot order
    pub fn occupied_slots(&self) -> impl Iterator<Item = (usize, &Vehicle)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i + 1, v)))
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.slots.iter().flatten()
    }

    pub fn count_occupied(&self) -> usize {
        self.vehicles().count()
    }

    pub fn count_available(&self) -> usize {
        self.capacity - self.count_occupied()
    }

    pub fn count_by_type(&self, vehicle_type: VehicleType) -> usize {
        self.vehicles()
            .filter(|v| v.vehicle_type == vehicle_type)
            .count()
    }

    /// Registrations of vehicles with the given colour, in slot order
    pub fn registration_numbers_by_colour(&self, colour: &str) -> Vec<String> {
        self.occupied_slots()
            .filter(|(_, v)| v.matches_colour(colour))
            .map(|(_, v)| v.registration_number.clone())
            .collect()
    }

    /// Slot numbers of vehicles with the given colour, ascending
    pub fn slot_numbers_by_colour(&self, colour: &str) -> Vec<usize> {
        self.occupied_slots()
            .filter(|(_, v)| v.matches_colour(colour))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Slot holding the given registration. Blank input never matches.
    pub fn slot_number_for_registration(&self, registration: &str) -> Option<usize> {
        if registration.trim().is_empty() {
            return None;
        }
        self.find_registration(registration).map(|i| i + 1)
    }

    /// Registrations whose last digit is odd (`want_odd`) or even.
    ///
    /// Plates without any digit appear in neither result.
    pub fn registration_numbers_by_odd_even(&self, want_odd: bool) -> Vec<String> {
        let parity = if want_odd { Parity::Odd } else { Parity::Even };
        self.registration_numbers_by_parity(parity)
    }

    pub fn registration_numbers_by_parity(&self, parity: Parity) -> Vec<String> {
        self.occupied_slots()
            .filter(|(_, v)| Parity::of_registration(&v.registration_number) == Some(parity))
            .map(|(_, v)| v.registration_number.clone())
            .collect()
    }

    /// Snapshot of occupied slots for reporting
    pub fn status_entries(&self) -> Vec<OccupiedSlot> {
        self.occupied_slots()
            .map(|(slot, v)| OccupiedSlot {
                slot,
                vehicle: v.clone(),
            })
            .collect()
    }

    /// Formatted status table
    pub fn status(&self) -> String {
        render_status(&self.status_entries())
    }

    fn find_registration(&self, registration: &str) -> Option<usize> {
        self.slots.iter().position(|s| {
            s.as_ref()
                .map(|v| v.matches_registration(registration))
                .unwrap_or(false)
        })
    }

    fn index_of(&self, slot_number: i64) -> Option<usize> {
        usize::try_from(slot_number)
            .ok()
            .filter(|&n| n >= 1 && n <= self.capacity)
            .map(|n| n - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::service::status_report::EMPTY_LOT_MESSAGE;
    use chrono::{Local, TimeZone};

    fn clock() -> ManualClock {
        ManualClock::new(Local.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap())
    }

    fn lot(size: i64) -> (ParkingLot<ManualClock>, ManualClock) {
        let clock = clock();
        let lot = ParkingLot::with_clock(size, DEFAULT_FEE_PER_HOUR, clock.clone()).unwrap();
        (lot, clock)
    }

    fn car(reg: &str, colour: &str) -> Vehicle {
        Vehicle::new(reg, colour, VehicleType::Car)
    }

    fn motor(reg: &str, colour: &str) -> Vehicle {
        Vehicle::new(reg, colour, VehicleType::Motorcycle)
    }

    #[test]
    fn test_non_positive_size_is_rejected() {
        assert_eq!(
            ParkingLot::new(0, DEFAULT_FEE_PER_HOUR).unwrap_err(),
            LotError::InvalidConfiguration(0)
        );
        assert_eq!(
            ParkingLot::new(-3, DEFAULT_FEE_PER_HOUR).unwrap_err(),
            LotError::InvalidConfiguration(-3)
        );
    }

    #[test]
    fn test_oversized_lot_is_rejected() {
        assert_eq!(
            ParkingLot::new(i64::MAX, DEFAULT_FEE_PER_HOUR).unwrap_err(),
            LotError::InvalidConfiguration(i64::MAX)
        );
        assert_eq!(
            ParkingLot::new(MAX_CAPACITY + 1, DEFAULT_FEE_PER_HOUR).unwrap_err(),
            LotError::InvalidConfiguration(MAX_CAPACITY + 1)
        );
    }

    #[test]
    fn test_largest_lot_is_usable() {
        let clock = clock();
        let mut lot = ParkingLot::with_clock(MAX_CAPACITY, DEFAULT_FEE_PER_HOUR, clock).unwrap();
        assert_eq!(lot.capacity(), i32::MAX as usize);
        assert_eq!(lot.count_available(), i32::MAX as usize);

        assert_eq!(lot.park(car("A-1", "White")), Ok(1));
        assert_eq!(lot.count_available(), i32::MAX as usize - 1);
        assert_eq!(lot.leave(MAX_CAPACITY), Err(LotError::InvalidSlot(MAX_CAPACITY)));
        assert!(lot.leave(1).is_ok());
    }

    #[test]
    fn test_new_lot_is_empty() {
        let (lot, _) = lot(4);
        assert_eq!(lot.capacity(), 4);
        assert_eq!(lot.count_occupied(), 0);
        assert_eq!(lot.count_available(), 4);
    }

    #[test]
    fn test_slots_assigned_in_order_until_full() {
        let (mut lot, _) = lot(3);
        for (i, reg) in ["A-1", "A-2", "A-3"].iter().enumerate() {
            assert_eq!(lot.park(car(reg, "White")), Ok(i + 1));
        }
        assert_eq!(lot.park(car("A-4", "White")), Err(LotError::LotFull));
        assert_eq!(lot.count_available(), 0);
    }

    #[test]
    fn test_duplicate_registration_is_rejected_case_insensitively() {
        let (mut lot, _) = lot(3);
        lot.park(car("KA-01-HH-1234", "White")).unwrap();

        let err = lot.park(motor("ka-01-hh-1234", "Red")).unwrap_err();
        assert_eq!(err, LotError::DuplicateVehicle("ka-01-hh-1234".to_string()));
        assert_eq!(lot.count_occupied(), 1);
    }

    #[test]
    fn test_duplicate_is_reported_before_full() {
        let (mut lot, _) = lot(1);
        lot.park(car("X-1", "White")).unwrap();
        assert!(matches!(
            lot.park(car("X-1", "White")),
            Err(LotError::DuplicateVehicle(_))
        ));
    }

    #[test]
    fn test_park_overwrites_supplied_check_in() {
        let (mut lot, clock) = lot(1);
        let mut vehicle = car("X-1", "White");
        vehicle.check_in = Some(clock.now() - Duration::days(3));
        lot.park(vehicle).unwrap();

        let (_, parked) = lot.occupied_slots().next().unwrap();
        assert_eq!(parked.check_in, Some(clock.now()));
    }

    #[test]
    fn test_freed_slot_is_reused_lowest_first() {
        let (mut lot, _) = lot(4);
        for reg in ["A-1", "A-2", "A-3", "A-4"] {
            lot.park(car(reg, "White")).unwrap();
        }
        lot.leave(3).unwrap();
        lot.leave(2).unwrap();

        assert_eq!(lot.park(car("B-1", "Blue")), Ok(2));
        assert_eq!(lot.park(car("B-2", "Blue")), Ok(3));
    }

    #[test]
    fn test_leave_then_repark_same_registration() {
        let (mut lot, _) = lot(2);
        let slot = lot.park(car("KA-01-AB-2211", "White")).unwrap();
        lot.leave(slot as i64).unwrap();
        assert_eq!(lot.park(car("KA-01-AB-2211", "White")), Ok(slot));
    }

    #[test]
    fn test_leave_bills_minimum_one_hour() {
        let (mut lot, clock) = lot(1);
        lot.park(car("X-1", "White")).unwrap();
        clock.advance(Duration::minutes(10));

        let departure = lot.leave(1).unwrap();
        assert_eq!(departure.hours, 1);
        assert_eq!(departure.fee, DEFAULT_FEE_PER_HOUR);
        assert_eq!(departure.slot, 1);
        assert_eq!(departure.vehicle.registration_number, "X-1");
    }

    #[test]
    fn test_leave_with_no_elapsed_time_still_bills_one_hour() {
        let (mut lot, _) = lot(1);
        lot.park(car("X-1", "White")).unwrap();
        assert_eq!(lot.leave(1).unwrap().hours, 1);
    }

    #[test]
    fn test_leave_rounds_partial_hours_up() {
        let clock = clock();
        let mut lot = ParkingLot::with_clock(1, 2000, clock.clone()).unwrap();
        lot.park(car("X-1", "White")).unwrap();
        clock.advance(Duration::minutes(2 * 60 + 1));

        let departure = lot.leave(1).unwrap();
        assert_eq!(departure.hours, 3);
        assert_eq!(departure.fee, 6000);
    }

    #[test]
    fn test_leave_invalid_slots() {
        let (mut lot, _) = lot(2);
        lot.park(car("X-1", "White")).unwrap();

        assert_eq!(lot.leave(0), Err(LotError::InvalidSlot(0)));
        assert_eq!(lot.leave(3), Err(LotError::InvalidSlot(3)));
        assert_eq!(lot.leave(-1), Err(LotError::InvalidSlot(-1)));
        assert_eq!(lot.leave(2), Err(LotError::InvalidSlot(2)));
        assert_eq!(lot.count_occupied(), 1);

        lot.leave(1).unwrap();
        assert_eq!(lot.leave(1), Err(LotError::InvalidSlot(1)));
    }

    #[test]
    fn test_count_by_type() {
        let (mut lot, _) = lot(3);
        lot.park(car("KA-01-AB-2211", "White")).unwrap();
        lot.park(motor("KA-01-AA-5000", "Red")).unwrap();
        assert_eq!(lot.park(car("KA-01-AB-9999", "Blue")), Ok(3));

        assert_eq!(lot.count_by_type(VehicleType::Car), 2);
        assert_eq!(lot.count_by_type(VehicleType::Motorcycle), 1);
    }

    #[test]
    fn test_colour_queries_follow_slot_order() {
        let (mut lot, _) = lot(4);
        lot.park(car("A-1", "White")).unwrap();
        lot.park(car("A-2", "Black")).unwrap();
        lot.park(car("A-3", "white")).unwrap();
        lot.leave(1).unwrap();
        lot.park(car("A-4", "WHITE")).unwrap();

        assert_eq!(
            lot.registration_numbers_by_colour("White"),
            vec!["A-4".to_string(), "A-3".to_string()]
        );
        assert_eq!(lot.slot_numbers_by_colour("white"), vec![1, 3]);
        assert!(lot.slot_numbers_by_colour("Green").is_empty());
    }

    #[test]
    fn test_slot_number_for_registration() {
        let (mut lot, _) = lot(2);
        lot.park(car("KA-01-AB-2211", "White")).unwrap();
        lot.park(motor("KA-01-AA-5000", "Red")).unwrap();

        assert_eq!(lot.slot_number_for_registration("ka-01-aa-5000"), Some(2));
        assert_eq!(lot.slot_number_for_registration("KA-99"), None);
        assert_eq!(lot.slot_number_for_registration("   "), None);
        assert_eq!(lot.slot_number_for_registration(""), None);
    }

    #[test]
    fn test_odd_even_partitions_plates_with_digits() {
        let (mut lot, _) = lot(5);
        lot.park(car("KA-01-HH-1234", "White")).unwrap();
        lot.park(car("KA-01-HH-9999", "White")).unwrap();
        lot.park(car("NODIGIT", "White")).unwrap();
        lot.park(car("B 1357 XY", "White")).unwrap();
        lot.park(car("D-2", "White")).unwrap();

        assert_eq!(
            lot.registration_numbers_by_odd_even(true),
            vec!["KA-01-HH-9999".to_string(), "B 1357 XY".to_string()]
        );
        assert_eq!(
            lot.registration_numbers_by_odd_even(false),
            vec!["KA-01-HH-1234".to_string(), "D-2".to_string()]
        );
    }

    #[test]
    fn test_status_lists_occupied_slots_only() {
        let (mut lot, _) = lot(3);
        assert!(lot.status().ends_with(EMPTY_LOT_MESSAGE));

        lot.park(car("A-1", "White")).unwrap();
        lot.park(motor("A-2", "Red")).unwrap();
        lot.leave(1).unwrap();

        let status = lot.status();
        let rows: Vec<_> = status.lines().skip(2).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("A-2"));
        assert!(rows[0].contains("Motor"));
        assert!(rows[0].contains("2024-05-17 09:00:00"));
    }
}
