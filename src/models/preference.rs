//! Preference and availability entries.
//!
//! Salaried employees express per-slot wishes: a positive preference to
//! work a slot, a wish to avoid it, or a holiday that forbids assignment
//! outright. Contractors instead declare the slots they can be booked
//! for; anything not declared is unavailable.

use serde::{Deserialize, Serialize};

use super::shift::ShiftKind;

/// The value of a single preference entry.
///
/// Serialized as the signed integers of the external contract:
/// `+1` works, `-1` avoid, `+2` holiday.
///
/// # Example
///
/// ```
/// use roster_engine::models::PreferenceValue;
///
/// let value: PreferenceValue = serde_json::from_str("-1").unwrap();
/// assert_eq!(value, PreferenceValue::Avoid);
/// assert_eq!(serde_json::to_string(&PreferenceValue::Holiday).unwrap(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum PreferenceValue {
    /// The employee would like to work this slot (+1).
    Works,
    /// The employee would like to avoid this slot (-1).
    Avoid,
    /// The employee must not be assigned this slot (+2).
    Holiday,
}

impl PreferenceValue {
    /// Returns the objective contribution sign, or `None` for holidays,
    /// which are enforced as hard constraints instead of scored.
    pub fn objective_sign(self) -> Option<i8> {
        match self {
            PreferenceValue::Works => Some(1),
            PreferenceValue::Avoid => Some(-1),
            PreferenceValue::Holiday => None,
        }
    }
}

impl From<PreferenceValue> for i8 {
    fn from(value: PreferenceValue) -> Self {
        match value {
            PreferenceValue::Works => 1,
            PreferenceValue::Avoid => -1,
            PreferenceValue::Holiday => 2,
        }
    }
}

impl TryFrom<i8> for PreferenceValue {
    type Error = String;

    fn try_from(raw: i8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(PreferenceValue::Works),
            -1 => Ok(PreferenceValue::Avoid),
            2 => Ok(PreferenceValue::Holiday),
            _ => Err(format!("unknown preference value {raw}, expected 1, -1 or 2")),
        }
    }
}

/// One preference entry for a salaried employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    /// The 1-based day within the horizon.
    pub day: u32,
    /// The shift the entry refers to.
    pub shift: ShiftKind,
    /// The preference value.
    pub value: PreferenceValue,
}

/// One slot a contractor has declared bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// The 1-based day within the horizon.
    pub day: u32,
    /// The shift the contractor is available for.
    pub shift: ShiftKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_round_trip() {
        for value in [
            PreferenceValue::Works,
            PreferenceValue::Avoid,
            PreferenceValue::Holiday,
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: PreferenceValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_value_wire_format() {
        assert_eq!(serde_json::to_string(&PreferenceValue::Works).unwrap(), "1");
        assert_eq!(serde_json::to_string(&PreferenceValue::Avoid).unwrap(), "-1");
        assert_eq!(
            serde_json::to_string(&PreferenceValue::Holiday).unwrap(),
            "2"
        );
    }

    #[test]
    fn test_unknown_value_rejected() {
        let error = serde_json::from_str::<PreferenceValue>("0").unwrap_err();
        assert!(error.to_string().contains("unknown preference value"));
        assert!(serde_json::from_str::<PreferenceValue>("3").is_err());
        assert!(serde_json::from_str::<PreferenceValue>("-2").is_err());
    }

    #[test]
    fn test_objective_sign() {
        assert_eq!(PreferenceValue::Works.objective_sign(), Some(1));
        assert_eq!(PreferenceValue::Avoid.objective_sign(), Some(-1));
        assert_eq!(PreferenceValue::Holiday.objective_sign(), None);
    }

    #[test]
    fn test_preference_entry_deserialization() {
        let json = r#"{ "day": 10, "shift": "M", "value": 2 }"#;
        let entry: PreferenceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.day, 10);
        assert_eq!(entry.shift, ShiftKind::Morning);
        assert_eq!(entry.value, PreferenceValue::Holiday);
    }

    #[test]
    fn test_availability_slot_deserialization() {
        let json = r#"{ "day": 3, "shift": "P" }"#;
        let slot: AvailabilitySlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.day, 3);
        assert_eq!(slot.shift, ShiftKind::Afternoon);
    }
}
