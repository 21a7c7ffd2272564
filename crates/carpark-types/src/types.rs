//! Vehicle types shared across crates

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LotError;

/// Vehicle category. Only two tokens are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    /// Car, token "Mobil"
    #[serde(rename = "Mobil")]
    Car,
    /// Motorcycle, token "Motor"
    #[serde(rename = "Motor")]
    Motorcycle,
}

impl VehicleType {
    /// Every category, in reporting order
    pub const ALL: [VehicleType; 2] = [VehicleType::Car, VehicleType::Motorcycle];

    /// Token used on the command line and in reports
    pub fn token(&self) -> &'static str {
        match self {
            VehicleType::Car => "Mobil",
            VehicleType::Motorcycle => "Motor",
        }
    }
}

impl FromStr for VehicleType {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|t| t.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| LotError::InvalidCategory(s.to_string()))
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() so width specifiers in table rows apply
        f.pad(self.token())
    }
}

/// A vehicle as held by a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub registration_number: String,
    pub colour: String,
    pub vehicle_type: VehicleType,
    /// Stamped by the lot when parking succeeds
    #[serde(default)]
    pub check_in: Option<DateTime<Local>>,
}

impl Vehicle {
    pub fn new(
        registration_number: impl Into<String>,
        colour: impl Into<String>,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            registration_number: registration_number.into(),
            colour: colour.into(),
            vehicle_type,
            check_in: None,
        }
    }

    /// Case-insensitive registration comparison
    pub fn matches_registration(&self, registration: &str) -> bool {
        eq_ignore_case(&self.registration_number, registration)
    }

    /// Case-insensitive colour comparison
    pub fn matches_colour(&self, colour: &str) -> bool {
        eq_ignore_case(&self.colour, colour)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
