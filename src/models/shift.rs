//! Shift kinds and durations.
//!
//! Every day has exactly two shifts, Morning and Afternoon, each a fixed
//! 8-hour block. There are no night shifts and no partial shifts.

use serde::{Deserialize, Serialize};

/// The duration of every shift, in hours.
pub const SHIFT_DURATION_HOURS: u32 = 8;

/// One of the two daily shifts.
///
/// The serialized form is the single-letter code used throughout the
/// external contract: `"M"` for Morning, `"P"` for Afternoon.
///
/// # Example
///
/// ```
/// use roster_engine::models::ShiftKind;
///
/// assert_eq!(serde_json::to_string(&ShiftKind::Morning).unwrap(), "\"M\"");
/// assert_eq!(ShiftKind::Afternoon.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftKind {
    /// The morning shift (first of the day).
    #[serde(rename = "M")]
    Morning,
    /// The afternoon shift (second of the day).
    #[serde(rename = "P")]
    Afternoon,
}

impl ShiftKind {
    /// Both shifts in day order.
    pub const ALL: [ShiftKind; 2] = [ShiftKind::Morning, ShiftKind::Afternoon];

    /// Returns the 0-based position of the shift within a day.
    pub fn index(self) -> usize {
        match self {
            ShiftKind::Morning => 0,
            ShiftKind::Afternoon => 1,
        }
    }

    /// Returns the shift at the given 0-based position within a day.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not 0 or 1.
    pub fn from_index(index: usize) -> ShiftKind {
        match index {
            0 => ShiftKind::Morning,
            1 => ShiftKind::Afternoon,
            _ => panic!("shift index {index} out of range"),
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Morning => write!(f, "M"),
            ShiftKind::Afternoon => write!(f, "P"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for shift in ShiftKind::ALL {
            assert_eq!(ShiftKind::from_index(shift.index()), shift);
        }
    }

    #[test]
    fn test_all_is_ordered() {
        assert_eq!(ShiftKind::ALL[0], ShiftKind::Morning);
        assert_eq!(ShiftKind::ALL[1], ShiftKind::Afternoon);
    }

    #[test]
    fn test_serialization_codes() {
        assert_eq!(
            serde_json::to_string(&ShiftKind::Morning).unwrap(),
            "\"M\""
        );
        assert_eq!(
            serde_json::to_string(&ShiftKind::Afternoon).unwrap(),
            "\"P\""
        );
    }

    #[test]
    fn test_deserialization_codes() {
        let morning: ShiftKind = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(morning, ShiftKind::Morning);
        let afternoon: ShiftKind = serde_json::from_str("\"P\"").unwrap();
        assert_eq!(afternoon, ShiftKind::Afternoon);
        assert!(serde_json::from_str::<ShiftKind>("\"N\"").is_err());
    }

    #[test]
    fn test_display_matches_serialization() {
        for shift in ShiftKind::ALL {
            let serialized = serde_json::to_string(&shift).unwrap();
            assert_eq!(serialized, format!("\"{shift}\""));
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_index_rejects_out_of_range() {
        let _ = ShiftKind::from_index(2);
    }
}
