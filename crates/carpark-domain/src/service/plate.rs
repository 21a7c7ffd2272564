//! Registration plate parity

use serde::{Deserialize, Serialize};

/// Parity of the last digit on a plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of_digit(digit: u32) -> Self {
        if digit % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    /// Parity of a registration number, `None` if it holds no digit
    pub fn of_registration(registration: &str) -> Option<Self> {
        last_digit(registration).map(Parity::of_digit)
    }
}

/// Code points of the digit zero of every Unicode decimal digit (`Nd`)
/// run. Each run holds the ten digits zero to nine in order.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Value of a decimal digit in any script (`٣` is 3, `７` is 7)
pub fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let cp = u32::from(c);
    let run = DECIMAL_ZEROS.partition_point(|&zero| zero <= cp);
    let zero = DECIMAL_ZEROS[..run].last()?;
    Some(cp - zero).filter(|&d| d < 10)
}

/// Rightmost decimal digit in a registration number
pub fn last_digit(registration: &str) -> Option<u32> {
    registration.chars().rev().find_map(digit_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_digit_scans_from_end() {
        assert_eq!(last_digit("KA-01-HH-1234"), Some(4));
        assert_eq!(last_digit("B 1234 XYZ"), Some(4));
        assert_eq!(last_digit("KA-01-HH-9"), Some(9));
        assert_eq!(last_digit("NODIGITS"), None);
        assert_eq!(last_digit(""), None);
    }

    #[test]
    fn test_digits_from_other_scripts() {
        assert_eq!(last_digit("AB-12\u{663}"), Some(3));
        assert_eq!(Parity::of_registration("AB-12\u{663}"), Some(Parity::Odd));
        assert_eq!(last_digit("B-\u{FF11}\u{FF18}"), Some(8));
        assert_eq!(last_digit("DL-\u{967}\u{968}X"), Some(2));
        assert_eq!(last_digit("Z-\u{1D7D9}"), Some(1));
    }

    #[test]
    fn test_numeric_symbols_are_not_digits() {
        // superscript two, roman numeral twelve, circled nine
        assert_eq!(last_digit("A-1\u{B2}\u{216B}\u{2468}"), Some(1));
        assert_eq!(last_digit("\u{B2}"), None);
        assert_eq!(digit_value('\u{66A}'), None);
    }

    #[test]
    fn test_parity_of_registration() {
        assert_eq!(Parity::of_registration("KA-01-AA-5001"), Some(Parity::Odd));
        assert_eq!(Parity::of_registration("KA-01-AA-5000"), Some(Parity::Even));
        assert_eq!(Parity::of_registration("ABC"), None);
    }
}
