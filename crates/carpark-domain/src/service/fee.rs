//! Parking fee calculation

use chrono::Duration;

const MICROS_PER_HOUR: i64 = 3_600_000_000;

/// Hours to bill for a stay.
///
/// Partial hours round up and every stay is billed at least one hour,
/// including zero or negative elapsed time (clock adjustments).
pub fn billed_hours(elapsed: Duration) -> u64 {
    let hours = match elapsed.num_microseconds() {
        Some(us) if us <= 0 => 0,
        Some(us) => (us + MICROS_PER_HOUR - 1) / MICROS_PER_HOUR,
        // Out of microsecond range: hundreds of millennia
        None => elapsed.num_hours().saturating_add(1),
    };
    u64::try_from(hours).unwrap_or(0).max(1)
}

/// Fee for a number of billed hours
pub fn fee_for(hours: u64, fee_per_hour: u64) -> u64 {
    hours.saturating_mul(fee_per_hour)
}

/// Format an amount with `.` as thousands separator (e.g. `10.000`)
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
