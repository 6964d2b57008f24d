//! Roster cells.
//!
//! A finished roster is a table of days by employees. Each cell carries
//! one label from the fixed six-string alphabet that the presentation
//! layer renders verbatim: `M`, `P`, `M(S)`, `P(S)`, `R`, `F`.

use serde::{Deserialize, Serialize};

use super::shift::ShiftKind;

/// The label of a single roster cell.
///
/// Labels are case-sensitive and form the external contract with the
/// presentation layer. `(S)` marks an overtime shift of a salaried
/// employee, `R` a rest day, `F` a day blocked by a holiday preference.
///
/// # Example
///
/// ```
/// use roster_engine::models::CellLabel;
///
/// assert_eq!(serde_json::to_string(&CellLabel::MorningOvertime).unwrap(), "\"M(S)\"");
/// assert!(CellLabel::MorningOvertime.is_work());
/// assert!(!CellLabel::Holiday.is_work());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellLabel {
    /// Works the morning shift.
    #[serde(rename = "M")]
    Morning,
    /// Works the afternoon shift.
    #[serde(rename = "P")]
    Afternoon,
    /// Works the morning shift as overtime.
    #[serde(rename = "M(S)")]
    MorningOvertime,
    /// Works the afternoon shift as overtime.
    #[serde(rename = "P(S)")]
    AfternoonOvertime,
    /// Rest day.
    #[serde(rename = "R")]
    Rest,
    /// Day blocked by a holiday preference.
    #[serde(rename = "F")]
    Holiday,
}

impl CellLabel {
    /// Returns true if the cell represents a worked shift.
    pub fn is_work(self) -> bool {
        self.shift().is_some()
    }

    /// Returns the worked shift, if any.
    pub fn shift(self) -> Option<ShiftKind> {
        match self {
            CellLabel::Morning | CellLabel::MorningOvertime => Some(ShiftKind::Morning),
            CellLabel::Afternoon | CellLabel::AfternoonOvertime => Some(ShiftKind::Afternoon),
            CellLabel::Rest | CellLabel::Holiday => None,
        }
    }

    /// Returns true if the cell is an overtime shift.
    pub fn is_overtime(self) -> bool {
        matches!(
            self,
            CellLabel::MorningOvertime | CellLabel::AfternoonOvertime
        )
    }
}

impl std::fmt::Display for CellLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            CellLabel::Morning => "M",
            CellLabel::Afternoon => "P",
            CellLabel::MorningOvertime => "M(S)",
            CellLabel::AfternoonOvertime => "P(S)",
            CellLabel::Rest => "R",
            CellLabel::Holiday => "F",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CellLabel; 6] = [
        CellLabel::Morning,
        CellLabel::Afternoon,
        CellLabel::MorningOvertime,
        CellLabel::AfternoonOvertime,
        CellLabel::Rest,
        CellLabel::Holiday,
    ];

    #[test]
    fn test_label_alphabet() {
        let rendered: Vec<String> = ALL.iter().map(|label| label.to_string()).collect();
        assert_eq!(rendered, vec!["M", "P", "M(S)", "P(S)", "R", "F"]);
    }

    #[test]
    fn test_serialization_matches_display() {
        for label in ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{label}\""));
            let back: CellLabel = serde_json::from_str(&json).unwrap();
            assert_eq!(back, label);
        }
    }

    #[test]
    fn test_work_classification() {
        assert!(CellLabel::Morning.is_work());
        assert!(CellLabel::AfternoonOvertime.is_work());
        assert!(!CellLabel::Rest.is_work());
        assert!(!CellLabel::Holiday.is_work());
    }

    #[test]
    fn test_shift_mapping() {
        assert_eq!(CellLabel::Morning.shift(), Some(ShiftKind::Morning));
        assert_eq!(CellLabel::MorningOvertime.shift(), Some(ShiftKind::Morning));
        assert_eq!(CellLabel::Afternoon.shift(), Some(ShiftKind::Afternoon));
        assert_eq!(
            CellLabel::AfternoonOvertime.shift(),
            Some(ShiftKind::Afternoon)
        );
        assert_eq!(CellLabel::Rest.shift(), None);
        assert_eq!(CellLabel::Holiday.shift(), None);
    }

    #[test]
    fn test_overtime_classification() {
        assert!(CellLabel::MorningOvertime.is_overtime());
        assert!(CellLabel::AfternoonOvertime.is_overtime());
        assert!(!CellLabel::Morning.is_overtime());
        assert!(!CellLabel::Rest.is_overtime());
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(serde_json::from_str::<CellLabel>("\"m\"").is_err());
        assert!(serde_json::from_str::<CellLabel>("\"r\"").is_err());
        assert!(serde_json::from_str::<CellLabel>("\"M(s)\"").is_err());
    }
}
