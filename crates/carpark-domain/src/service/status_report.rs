//! Tabular status report of occupied slots

use crate::model::OccupiedSlot;

const CHECK_IN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const EMPTY_LOT_MESSAGE: &str = "Parking lot is empty.";

/// Render the status table, one row per occupied slot in slot order
pub fn render_status(entries: &[OccupiedSlot]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push("Slot No. | Registration No | Colour    | Type  | CheckIn".to_string());
    lines.push("-".repeat(72));

    if entries.is_empty() {
        lines.push(EMPTY_LOT_MESSAGE.to_string());
    }

    for entry in entries {
        let v = &entry.vehicle;
        let check_in = v
            .check_in
            .map(|t| t.format(CHECK_IN_FORMAT).to_string())
            .unwrap_or_default();
        lines.push(format!(
            "{:>7} | {:<15} | {:<9} | {:<5} | {}",
            entry.slot, v.registration_number, v.colour, v.vehicle_type, check_in
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use carpark_types::{Vehicle, VehicleType};
    use chrono::{Local, TimeZone};

    #[test]
    fn test_empty_report() {
        let report = render_status(&[]);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 72);
        assert_eq!(lines[2], EMPTY_LOT_MESSAGE);
    }

    #[test]
    fn test_row_layout() {
        let mut vehicle = Vehicle::new("KA-01-HH-1234", "White", VehicleType::Car);
        vehicle.check_in = Local.with_ymd_and_hms(2024, 3, 1, 8, 5, 9).single();
        let report = render_status(&[OccupiedSlot { slot: 2, vehicle }]);

        let row = report.lines().nth(2).unwrap();
        assert_eq!(
            row,
            "      2 | KA-01-HH-1234   | White     | Mobil | 2024-03-01 08:05:09"
        );
        assert!(!report.contains(EMPTY_LOT_MESSAGE));
    }
}
