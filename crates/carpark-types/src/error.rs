//! Error types for the parking lot simulator

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Errors raised by lot operations and command dispatch.
///
/// None of these are fatal: the interactive loop reports them and keeps
/// reading input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    #[error("Lot size must be between 1 and 2147483647, got {0}")]
    InvalidConfiguration(i64),

    #[error("Vehicle with registration number {0} is already parked.")]
    DuplicateVehicle(String),

    #[error("Sorry, parking lot is full.")]
    LotFull,

    #[error("Slot {0} is invalid or already empty.")]
    InvalidSlot(i64),

    #[error("Not found")]
    NotFound,

    #[error("Invalid vehicle type '{0}'. Use 'Mobil' or 'Motor'.")]
    InvalidCategory(String),

    #[error("No parking lot yet. Run: create_parking_lot <n>")]
    MissingLot,

    #[error("Usage: {usage}")]
    BadArguments { usage: String },

    #[error("Unknown command '{0}'. Type 'help' to list commands.")]
    UnknownCommand(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lot(#[from] LotError),
}

pub type Result<T> = std::result::Result<T, Error>;
