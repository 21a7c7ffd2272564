//! Domain services

pub mod fee;
pub mod plate;
pub mod status_report;

pub use fee::{billed_hours, fee_for, format_currency};
pub use plate::{digit_value, last_digit, Parity};
pub use status_report::render_status;
