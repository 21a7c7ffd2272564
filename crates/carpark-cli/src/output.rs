//! Output formatting module

use carpark_app::{CommandName, Outcome};
use carpark_domain::service::{format_currency, render_status};
use carpark_types::{LotError, OutputFormat, Result};
use serde_json::json;
use std::io::Write;

pub const HINT: &str = "Type 'help' or 'h' for the command list. 'e' or 'exit' to quit.";

pub fn write_outcome<W: Write>(out: &mut W, format: OutputFormat, outcome: &Outcome) -> Result<()> {
    if format == OutputFormat::Json {
        let value = match outcome {
            Outcome::Exit => return Ok(()),
            Outcome::Help => json!({ "outcome": "help", "commands": help_json() }),
            other => serde_json::to_value(other)?,
        };
        writeln!(out, "{}", value)?;
        return Ok(());
    }

    match outcome {
        Outcome::LotCreated { capacity } => {
            writeln!(out, "Created a parking lot with {} slots.", capacity)?
        }
        Outcome::Parked { slot, .. } => writeln!(out, "Slot {} filled.", slot)?,
        Outcome::Left(departure) => writeln!(
            out,
            "Slot {} freed. Parking time: {} hour(s). Fee: Rp {}",
            departure.slot,
            departure.hours,
            format_currency(departure.fee)
        )?,
        Outcome::Status { entries } => writeln!(out, "{}", render_status(entries))?,
        Outcome::TypeCounts { counts } => {
            for c in counts {
                writeln!(out, "{}: {}", c.vehicle_type, c.count)?;
            }
        }
        Outcome::Registrations { registrations } => writeln!(out, "{}", registrations.join(", "))?,
        Outcome::Slots { slots } => {
            let slots: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
            writeln!(out, "{}", slots.join(", "))?
        }
        Outcome::Slot { slot } => writeln!(out, "{}", slot)?,
        Outcome::Help => write_help(out)?,
        Outcome::Exit => {}
    }
    Ok(())
}

/// Report a recoverable command error
pub fn write_error<W: Write>(out: &mut W, format: OutputFormat, error: &LotError) -> Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", json!({ "error": error.to_string() }))?;
    } else {
        writeln!(out, "{}", error)?;
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Available Commands:")?;
    writeln!(out, "{}", "-".repeat(80))?;
    for name in CommandName::ALL {
        let (usage, description) = name.help_entry();
        writeln!(out, "{:<55} - {}", usage, description)?;
    }
    writeln!(out, "{}", "-".repeat(80))
}

fn help_json() -> serde_json::Value {
    CommandName::ALL
        .iter()
        .map(|name| {
            json!({
                "command": name,
                "usage": name.usage(),
                "aliases": name.aliases(),
                "description": name.description(),
            })
        })
        .collect()
}
