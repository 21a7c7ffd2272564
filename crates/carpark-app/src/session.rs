//! Interactive session: owns the (possibly not yet created) lot and
//! executes parsed commands against it

use carpark_domain::service::Parity;
use carpark_domain::{Clock, Departure, OccupiedSlot, ParkingLot, SystemClock};
use carpark_types::{LotError, Vehicle, VehicleType};
use serde::Serialize;
use tracing::{debug, info};

use crate::command::{Command, CommandName};

/// Lot state of a session
#[derive(Debug)]
pub enum LotState<C: Clock> {
    /// No `create_parking_lot` has run yet
    NotCreated,
    Ready(ParkingLot<C>),
}

/// Vehicle count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub vehicle_type: VehicleType,
    pub count: usize,
}

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    LotCreated { capacity: usize },
    Parked { slot: usize, registration: String },
    Left(Departure),
    Status { entries: Vec<OccupiedSlot> },
    TypeCounts { counts: Vec<TypeCount> },
    Registrations { registrations: Vec<String> },
    Slots { slots: Vec<usize> },
    Slot { slot: usize },
    Help,
    Exit,
}

/// Dispatcher state for one run of the interactive loop
#[derive(Debug)]
pub struct Session<C: Clock + Clone = SystemClock> {
    state: LotState<C>,
    fee_per_hour: u64,
    clock: C,
}

impl Session<SystemClock> {
    pub fn new(fee_per_hour: u64) -> Self {
        Self::with_clock(fee_per_hour, SystemClock)
    }
}

impl<C: Clock + Clone> Session<C> {
    /// Session whose lots read time from `clock`
    pub fn with_clock(fee_per_hour: u64, clock: C) -> Self {
        Self {
            state: LotState::NotCreated,
            fee_per_hour,
            clock,
        }
    }

    pub fn state(&self) -> &LotState<C> {
        &self.state
    }

    pub fn lot(&self) -> Option<&ParkingLot<C>> {
        match &self.state {
            LotState::Ready(lot) => Some(lot),
            LotState::NotCreated => None,
        }
    }

    /// Parse and execute one input line. Blank lines yield `Ok(None)`.
    ///
    /// Before a lot exists, lot commands report the missing lot even when
    /// their arguments are malformed.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>, LotError> {
        if self.lot().is_none() && CommandName::from_line(line).is_some_and(|n| n.requires_lot()) {
            return Err(LotError::MissingLot);
        }
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, LotError> {
        debug!(command = %command.name(), "executing");
        match command {
            Command::Help => Ok(Outcome::Help),
            Command::Exit => Ok(Outcome::Exit),
            Command::CreateParkingLot { size } => self.create_lot(size),
            Command::Park {
                registration,
                colour,
                vehicle_type,
            } => {
                let vehicle = Vehicle::new(registration.clone(), colour, vehicle_type);
                let slot = self.ready_lot_mut()?.park(vehicle)?;
                Ok(Outcome::Parked { slot, registration })
            }
            Command::Leave { slot } => self.ready_lot_mut()?.leave(slot).map(Outcome::Left),
            Command::Status => Ok(Outcome::Status {
                entries: self.ready_lot()?.status_entries(),
            }),
            Command::TypeOfVehicles { vehicle_type } => {
                let lot = self.ready_lot()?;
                let types = match vehicle_type {
                    Some(t) => vec![t],
                    None => VehicleType::ALL.to_vec(),
                };
                let counts = types
                    .into_iter()
                    .map(|vehicle_type| TypeCount {
                        vehicle_type,
                        count: lot.count_by_type(vehicle_type),
                    })
                    .collect();
                Ok(Outcome::TypeCounts { counts })
            }
            Command::RegistrationNumbersByColour { colour } => {
                registrations(self.ready_lot()?.registration_numbers_by_colour(&colour))
            }
            Command::SlotNumbersByColour { colour } => {
                let slots = self.ready_lot()?.slot_numbers_by_colour(&colour);
                if slots.is_empty() {
                    return Err(LotError::NotFound);
                }
                Ok(Outcome::Slots { slots })
            }
            Command::SlotNumberForRegistration { registration } => self
                .ready_lot()?
                .slot_number_for_registration(&registration)
                .map(|slot| Outcome::Slot { slot })
                .ok_or(LotError::NotFound),
            Command::RegistrationNumbersByParity(parity) => {
                let want_odd = parity == Parity::Odd;
                registrations(self.ready_lot()?.registration_numbers_by_odd_even(want_odd))
            }
        }
    }

    fn ready_lot(&self) -> Result<&ParkingLot<C>, LotError> {
        self.lot().ok_or(LotError::MissingLot)
    }

    fn ready_lot_mut(&mut self) -> Result<&mut ParkingLot<C>, LotError> {
        match &mut self.state {
            LotState::Ready(lot) => Ok(lot),
            LotState::NotCreated => Err(LotError::MissingLot),
        }
    }

    /// Replace any existing lot with a fresh, empty one
    fn create_lot(&mut self, size: i64) -> Result<Outcome, LotError> {
        let lot = ParkingLot::with_clock(size, self.fee_per_hour, self.clock.clone())?;
        let capacity = lot.capacity();
        if matches!(self.state, LotState::Ready(_)) {
            info!(capacity, "replacing existing parking lot");
        }
        self.state = LotState::Ready(lot);
        Ok(Outcome::LotCreated { capacity })
    }
}

fn registrations(registrations: Vec<String>) -> Result<Outcome, LotError> {
    if registrations.is_empty() {
        return Err(LotError::NotFound);
    }
    Ok(Outcome::Registrations { registrations })
}
