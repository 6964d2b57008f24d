//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod outcome;
mod preference;
mod roster;
mod shift;

pub use employee::{EmployeeId, EmployeeKind};
pub use outcome::{
    ContractorStats, CostBreakdown, PreferenceSatisfaction, RuleKind, RuleViolation,
    SalariedStats, Schedule, SolveDiagnostics, SolveOutcome, SolveParameters, SolveStatus,
};
pub use preference::{AvailabilitySlot, PreferenceEntry, PreferenceValue};
pub use roster::CellLabel;
pub use shift::{ShiftKind, SHIFT_DURATION_HOURS};
