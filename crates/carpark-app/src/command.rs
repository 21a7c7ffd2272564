//! Command-line parsing for the interactive loop
//!
//! A line is split into words, the first word is resolved through the
//! alias table to a canonical command, and the remaining words are
//! validated into a typed [`Command`].

use carpark_domain::service::Parity;
use carpark_types::{LotError, VehicleType};
use serde::Serialize;
use tracing::debug;

/// Canonical command names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    CreateParkingLot,
    Park,
    Leave,
    Status,
    TypeOfVehicles,
    RegistrationNumbersForVehiclesWithColour,
    SlotNumbersForVehiclesWithColour,
    SlotNumberForRegistrationNumber,
    RegistrationNumbersForVehiclesWithOddPlate,
    RegistrationNumbersForVehiclesWithEvenPlate,
    Help,
    Exit,
}

impl CommandName {
    /// Every command, in help order
    pub const ALL: [CommandName; 12] = [
        CommandName::CreateParkingLot,
        CommandName::Park,
        CommandName::Leave,
        CommandName::Status,
        CommandName::TypeOfVehicles,
        CommandName::RegistrationNumbersForVehiclesWithColour,
        CommandName::SlotNumbersForVehiclesWithColour,
        CommandName::SlotNumberForRegistrationNumber,
        CommandName::RegistrationNumbersForVehiclesWithOddPlate,
        CommandName::RegistrationNumbersForVehiclesWithEvenPlate,
        CommandName::Help,
        CommandName::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::CreateParkingLot => "create_parking_lot",
            CommandName::Park => "park",
            CommandName::Leave => "leave",
            CommandName::Status => "status",
            CommandName::TypeOfVehicles => "type_of_vehicles",
            CommandName::RegistrationNumbersForVehiclesWithColour => {
                "registration_numbers_for_vehicles_with_colour"
            }
            CommandName::SlotNumbersForVehiclesWithColour => "slot_numbers_for_vehicles_with_colour",
            CommandName::SlotNumberForRegistrationNumber => "slot_number_for_registration_number",
            CommandName::RegistrationNumbersForVehiclesWithOddPlate => {
                "registration_numbers_for_vehicles_with_odd_plate"
            }
            CommandName::RegistrationNumbersForVehiclesWithEvenPlate => {
                "registration_numbers_for_vehicles_with_even_plate"
            }
            CommandName::Help => "help",
            CommandName::Exit => "exit",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CommandName::CreateParkingLot => &["cpl", "create"],
            CommandName::Park => &["pk"],
            CommandName::Leave => &["lv"],
            CommandName::Status => &["st"],
            CommandName::TypeOfVehicles => &["tov"],
            CommandName::RegistrationNumbersForVehiclesWithColour => &["rnvc"],
            CommandName::SlotNumbersForVehiclesWithColour => &["snvc"],
            CommandName::SlotNumberForRegistrationNumber => &["snr"],
            CommandName::RegistrationNumbersForVehiclesWithOddPlate => &["rno"],
            CommandName::RegistrationNumbersForVehiclesWithEvenPlate => &["rne"],
            CommandName::Help => &["h"],
            CommandName::Exit => &["e"],
        }
    }

    /// Argument synopsis, without the command name
    pub fn arguments(&self) -> &'static str {
        match self {
            CommandName::CreateParkingLot => "<number>",
            CommandName::Park => "<registration> <colour> <type>",
            CommandName::Leave => "<slot_number>",
            CommandName::TypeOfVehicles => "[type]",
            CommandName::RegistrationNumbersForVehiclesWithColour
            | CommandName::SlotNumbersForVehiclesWithColour => "<colour>",
            CommandName::SlotNumberForRegistrationNumber => "<registration>",
            _ => "",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandName::CreateParkingLot => "Create a parking lot with <number> slots.",
            CommandName::Park => "Park a vehicle. type: Mobil or Motor.",
            CommandName::Leave => "Remove the vehicle from a slot and charge the fee.",
            CommandName::Status => "Show the current status.",
            CommandName::TypeOfVehicles => "Show the number of vehicles per type.",
            CommandName::RegistrationNumbersForVehiclesWithColour => {
                "Registration numbers of vehicles with a colour."
            }
            CommandName::SlotNumbersForVehiclesWithColour => "Slot numbers of vehicles with a colour.",
            CommandName::SlotNumberForRegistrationNumber => "Slot number for a registration.",
            CommandName::RegistrationNumbersForVehiclesWithOddPlate => {
                "Registration numbers whose last digit is odd."
            }
            CommandName::RegistrationNumbersForVehiclesWithEvenPlate => {
                "Registration numbers whose last digit is even."
            }
            CommandName::Help => "Show this help.",
            CommandName::Exit => "Exit the application.",
        }
    }

    /// Usage line shown on argument errors
    pub fn usage(&self) -> String {
        match self.arguments() {
            "" => self.as_str().to_string(),
            args => format!("{} {}", self.as_str(), args),
        }
    }

    /// Help table entry: usage with aliases, and description
    pub fn help_entry(&self) -> (String, &'static str) {
        let usage = format!("{} (alias: {})", self.usage(), self.aliases().join(", "));
        (usage, self.description())
    }

    /// Whether the command needs an existing lot
    pub fn requires_lot(&self) -> bool {
        !matches!(
            self,
            CommandName::CreateParkingLot | CommandName::Help | CommandName::Exit
        )
    }

    /// Resolve the command word of a raw input line
    pub fn from_line(line: &str) -> Option<Self> {
        split_words(line).first().and_then(|w| CommandName::resolve(w))
    }

    /// Resolve a canonical name or alias, ignoring case
    pub fn resolve(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        CommandName::ALL
            .into_iter()
            .find(|name| name.as_str() == token || name.aliases().contains(&token.as_str()))
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateParkingLot {
        size: i64,
    },
    Park {
        registration: String,
        colour: String,
        vehicle_type: VehicleType,
    },
    Leave {
        slot: i64,
    },
    Status,
    /// Counts for one category, or for every category when `None`
    TypeOfVehicles {
        vehicle_type: Option<VehicleType>,
    },
    RegistrationNumbersByColour {
        colour: String,
    },
    SlotNumbersByColour {
        colour: String,
    },
    SlotNumberForRegistration {
        registration: String,
    },
    RegistrationNumbersByParity(Parity),
    Help,
    Exit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for blank lines. Extra trailing words are ignored.
    pub fn parse(line: &str) -> Result<Option<Command>, LotError> {
        let words = split_words(line);
        let Some((first, args)) = words.split_first() else {
            return Ok(None);
        };

        let name =
            CommandName::resolve(first).ok_or_else(|| LotError::UnknownCommand(first.clone()))?;
        let arg = |i: usize| {
            args.get(i).cloned().ok_or_else(|| LotError::BadArguments {
                usage: name.usage(),
            })
        };
        let int_arg = |i: usize| {
            arg(i)?.parse::<i64>().map_err(|_| LotError::BadArguments {
                usage: name.usage(),
            })
        };

        let command = match name {
            CommandName::CreateParkingLot => Command::CreateParkingLot { size: int_arg(0)? },
            CommandName::Park => {
                let registration = arg(0)?;
                let colour = arg(1)?;
                let vehicle_type: VehicleType = arg(2)?.parse()?;
                Command::Park {
                    registration,
                    colour,
                    vehicle_type,
                }
            }
            CommandName::Leave => Command::Leave { slot: int_arg(0)? },
            CommandName::Status => Command::Status,
            CommandName::TypeOfVehicles => Command::TypeOfVehicles {
                vehicle_type: args
                    .first()
                    .map(|t| t.parse::<VehicleType>())
                    .transpose()?,
            },
            CommandName::RegistrationNumbersForVehiclesWithColour => {
                Command::RegistrationNumbersByColour { colour: arg(0)? }
            }
            CommandName::SlotNumbersForVehiclesWithColour => {
                Command::SlotNumbersByColour { colour: arg(0)? }
            }
            CommandName::SlotNumberForRegistrationNumber => Command::SlotNumberForRegistration {
                registration: arg(0)?,
            },
            CommandName::RegistrationNumbersForVehiclesWithOddPlate => {
                Command::RegistrationNumbersByParity(Parity::Odd)
            }
            CommandName::RegistrationNumbersForVehiclesWithEvenPlate => {
                Command::RegistrationNumbersByParity(Parity::Even)
            }
            CommandName::Help => Command::Help,
            CommandName::Exit => Command::Exit,
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> CommandName {
        match self {
            Command::CreateParkingLot { .. } => CommandName::CreateParkingLot,
            Command::Park { .. } => CommandName::Park,
            Command::Leave { .. } => CommandName::Leave,
            Command::Status => CommandName::Status,
            Command::TypeOfVehicles { .. } => CommandName::TypeOfVehicles,
            Command::RegistrationNumbersByColour { .. } => {
                CommandName::RegistrationNumbersForVehiclesWithColour
            }
            Command::SlotNumbersByColour { .. } => CommandName::SlotNumbersForVehiclesWithColour,
            Command::SlotNumberForRegistration { .. } => {
                CommandName::SlotNumberForRegistrationNumber
            }
            Command::RegistrationNumbersByParity(Parity::Odd) => {
                CommandName::RegistrationNumbersForVehiclesWithOddPlate
            }
            Command::RegistrationNumbersByParity(Parity::Even) => {
                CommandName::RegistrationNumbersForVehiclesWithEvenPlate
            }
            Command::Help => CommandName::Help,
            Command::Exit => CommandName::Exit,
        }
    }

    pub fn requires_lot(&self) -> bool {
        self.name().requires_lot()
    }
}

/// Split on whitespace, honouring shell-style quotes.
///
/// Unbalanced quotes fall back to plain whitespace splitting.
fn split_words(line: &str) -> Vec<String> {
    shell_words::split(line).unwrap_or_else(|e| {
        debug!(error = %e, "quote parsing failed, splitting on whitespace");
        line.split_whitespace().map(str::to_string).collect()
    })
}
