//! Employee identities and kinds.
//!
//! Staff come in two kinds with different rules: salaried employees have a
//! contractual regular-hours cap, bounded overtime and a free-weekend
//! guarantee; contractors can only be assigned to slots they declared
//! available and have neither overtime nor weekend guarantees.

use serde::{Deserialize, Serialize};

/// The kind of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeKind {
    /// Staff with a regular-hours cap and bounded overtime.
    Salaried,
    /// On-call staff assignable only to pre-declared available slots.
    Contractor,
}

/// Identifies one employee by kind and 0-based index within that kind.
///
/// The display (and serialized) form is `S1`, `S2`, … for salaried
/// employees and `C1`, `C2`, … for contractors, 1-based for humans.
///
/// # Example
///
/// ```
/// use roster_engine::models::{EmployeeId, EmployeeKind};
///
/// let id = EmployeeId::Salaried(0);
/// assert_eq!(id.to_string(), "S1");
/// assert_eq!(id.kind(), EmployeeKind::Salaried);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EmployeeId {
    /// A salaried employee, by 0-based index.
    Salaried(usize),
    /// A contractor, by 0-based index.
    Contractor(usize),
}

impl EmployeeId {
    /// Returns the employment kind of this id.
    pub fn kind(self) -> EmployeeKind {
        match self {
            EmployeeId::Salaried(_) => EmployeeKind::Salaried,
            EmployeeId::Contractor(_) => EmployeeKind::Contractor,
        }
    }

    /// Returns true for salaried employees.
    pub fn is_salaried(self) -> bool {
        matches!(self, EmployeeId::Salaried(_))
    }

    /// Returns the 0-based index within the employee's kind.
    pub fn index(self) -> usize {
        match self {
            EmployeeId::Salaried(index) | EmployeeId::Contractor(index) => index,
        }
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeId::Salaried(index) => write!(f, "S{}", index + 1),
            EmployeeId::Contractor(index) => write!(f, "C{}", index + 1),
        }
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let (kind, number) = text
            .split_at_checked(1)
            .ok_or_else(|| "empty employee id".to_string())?;
        let ordinal: usize = number
            .parse()
            .map_err(|_| format!("bad employee id '{text}'"))?;
        if ordinal == 0 {
            return Err(format!("bad employee id '{text}'"));
        }
        match kind {
            "S" => Ok(EmployeeId::Salaried(ordinal - 1)),
            "C" => Ok(EmployeeId::Contractor(ordinal - 1)),
            _ => Err(format!("bad employee id '{text}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(EmployeeId::Salaried(0).to_string(), "S1");
        assert_eq!(EmployeeId::Salaried(2).to_string(), "S3");
        assert_eq!(EmployeeId::Contractor(0).to_string(), "C1");
        assert_eq!(EmployeeId::Contractor(9).to_string(), "C10");
    }

    #[test]
    fn test_kind_accessors() {
        assert!(EmployeeId::Salaried(1).is_salaried());
        assert!(!EmployeeId::Contractor(1).is_salaried());
        assert_eq!(EmployeeId::Contractor(4).kind(), EmployeeKind::Contractor);
        assert_eq!(EmployeeId::Contractor(4).index(), 4);
    }

    #[test]
    fn test_serialization_round_trip() {
        for id in [
            EmployeeId::Salaried(0),
            EmployeeId::Salaried(11),
            EmployeeId::Contractor(3),
        ] {
            let json = serde_json::to_string(&id).unwrap();
            let back: EmployeeId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, id);
        }
        assert_eq!(
            serde_json::to_string(&EmployeeId::Contractor(1)).unwrap(),
            "\"C2\""
        );
    }

    #[test]
    fn test_deserialization_rejects_garbage() {
        assert!(serde_json::from_str::<EmployeeId>("\"X1\"").is_err());
        assert!(serde_json::from_str::<EmployeeId>("\"S0\"").is_err());
        assert!(serde_json::from_str::<EmployeeId>("\"S\"").is_err());
        assert!(serde_json::from_str::<EmployeeId>("\"\"").is_err());
    }

    #[test]
    fn test_employment_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeKind::Salaried).unwrap(),
            "\"salaried\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeKind::Contractor).unwrap(),
            "\"contractor\""
        );
    }
}
