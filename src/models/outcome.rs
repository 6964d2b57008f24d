//! Solve outcome models.
//!
//! This module contains the [`SolveOutcome`] type and its associated
//! structures: the assembled schedule, per-employee statistics, the cost
//! breakdown, solver diagnostics and the rule-violation tuple reported
//! when the post-solve validator rejects an assignment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::EmployeeId;
use super::roster::CellLabel;
use super::shift::ShiftKind;

/// The terminal status of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The backend proved the returned roster optimal.
    Optimal,
    /// The backend returned a roster without an optimality proof.
    Feasible,
    /// No roster satisfies the hard constraints.
    Infeasible,
    /// The model was rejected by the backend or the validator.
    Invalid,
    /// The time limit elapsed before any roster was found.
    Unknown,
}

impl SolveStatus {
    /// Returns true if the status carries a roster.
    pub fn is_success(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// The hard-constraint rules the validator re-checks after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Every (day, shift) is staffed by exactly one employee.
    Coverage,
    /// No employee works more than one shift per day.
    OneShiftPerDay,
    /// Contractors only work slots they declared available.
    ContractorAvailability,
    /// No salaried employee works a slot marked as holiday.
    HolidayRespected,
    /// Regular/overtime bookkeeping is consistent and within caps.
    OvertimeAccounting,
    /// No employee exceeds the consecutive-working-days cap.
    ConsecutiveDayCap,
    /// No employee exceeds the 14-day work/rest window cap.
    WorkRestWindow,
    /// Nobody follows an afternoon shift with the next morning's shift.
    AfternoonThenMorning,
    /// Every salaried employee keeps the minimum number of free weekends.
    FreeWeekendMinimum,
}

/// A single hard-constraint violation found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// The rule that was violated.
    pub rule: RuleKind,
    /// The employee involved, when the rule concerns one.
    pub employee: Option<EmployeeId>,
    /// The 0-based day index where the violation was detected.
    pub day: Option<usize>,
    /// The shift where the violation was detected.
    pub shift: Option<ShiftKind>,
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rule {:?}", self.rule)?;
        if let Some(employee) = self.employee {
            write!(f, " for {employee}")?;
        }
        if let Some(day) = self.day {
            write!(f, " on day {day}")?;
        }
        if let Some(shift) = self.shift {
            write!(f, " shift {shift}")?;
        }
        Ok(())
    }
}

/// How well a salaried employee's ±1 preferences were honored.
///
/// Holidays are hard constraints and do not count here. An employee with
/// no ±1 preferences is fully satisfied by definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSatisfaction {
    /// Number of ±1 preference entries.
    pub total: u32,
    /// Number of entries the roster honors.
    pub satisfied: u32,
    /// `satisfied / total` as a percentage; 100 when there are no entries.
    pub percentage: f64,
}

impl PreferenceSatisfaction {
    /// Builds the satisfaction summary from raw counts.
    pub fn from_counts(total: u32, satisfied: u32) -> Self {
        let percentage = if total == 0 {
            100.0
        } else {
            f64::from(satisfied) / f64::from(total) * 100.0
        };
        Self {
            total,
            satisfied,
            percentage,
        }
    }
}

/// Per-solve statistics for one salaried employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalariedStats {
    /// The employee these statistics belong to.
    pub employee: EmployeeId,
    /// Total shifts worked (regular + overtime).
    pub shifts_worked: u32,
    /// Total hours worked.
    pub hours_worked: u32,
    /// Hours worked at the regular rate.
    pub regular_hours: u32,
    /// Hours worked as overtime.
    pub overtime_hours: u32,
    /// Weekend pairs with both days off, counted from the roster.
    pub free_weekends: u32,
    /// Days with at least one slot marked as holiday.
    pub holiday_days: u32,
    /// Satisfaction of the employee's ±1 preferences.
    pub preference_satisfaction: PreferenceSatisfaction,
}

/// Per-solve statistics for one contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorStats {
    /// The contractor these statistics belong to.
    pub employee: EmployeeId,
    /// Total shifts assigned.
    pub shifts_worked: u32,
    /// Morning shifts assigned.
    pub morning_shifts: u32,
    /// Afternoon shifts assigned.
    pub afternoon_shifts: u32,
    /// Total hours assigned.
    pub hours_worked: u32,
    /// Assigned shifts over declared available slots; 0 when none declared.
    pub availability_utilization: f64,
}

/// The aggregate cost of a roster, split by pay category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Cost of regular salaried shifts.
    pub regular_cost: Decimal,
    /// Cost of salaried overtime shifts.
    pub overtime_cost: Decimal,
    /// Cost of contractor shifts.
    pub contractor_cost: Decimal,
    /// Sum of the three components.
    pub total_cost: Decimal,
}

/// The effective parameters of a solve, echoed into the outcome so a
/// caller can render them without keeping the request around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveParameters {
    /// First day of the horizon.
    pub date_start: NaiveDate,
    /// Last day of the horizon.
    pub date_end: NaiveDate,
    /// Minimum fully-free weekends per salaried employee.
    pub min_free_weekends: u32,
    /// Maximum consecutive working days.
    pub max_consecutive_days: u32,
    /// Maximum overtime shifts per salaried employee.
    pub max_overtime: u32,
    /// The configured work-to-rest ratio.
    pub work_rest_ratio: f64,
    /// The derived cap on worked days in any 14-day window.
    pub window_work_cap: u32,
}

/// Backend search statistics for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolveDiagnostics {
    /// Wall-clock time of the solve attempt, in milliseconds.
    pub wall_time_ms: u64,
    /// Propagation steps performed, when the backend exposes them.
    pub propagations: Option<u64>,
    /// Search nodes explored, when the backend exposes them.
    pub nodes: Option<u64>,
}

/// A validated roster with all derived statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// The days of the horizon, in order.
    pub days: Vec<NaiveDate>,
    /// Column order of the roster rows: salaried first, then contractors.
    pub employees: Vec<EmployeeId>,
    /// One row per day, one labeled cell per employee column.
    pub rows: Vec<Vec<CellLabel>>,
    /// Statistics per salaried employee, indexed like their ids.
    pub salaried: Vec<SalariedStats>,
    /// Statistics per contractor, indexed like their ids.
    pub contractors: Vec<ContractorStats>,
    /// The aggregate cost breakdown.
    pub costs: CostBreakdown,
    /// The effective solve parameters.
    pub parameters: SolveParameters,
}

impl Schedule {
    /// Returns the cell for an employee on a 0-based day.
    ///
    /// # Panics
    ///
    /// Panics if the day is outside the horizon or the employee is not a
    /// column of this schedule.
    pub fn cell(&self, day: usize, employee: EmployeeId) -> CellLabel {
        let column = self
            .employees
            .iter()
            .position(|&id| id == employee)
            .expect("employee is a roster column");
        self.rows[day][column]
    }
}

/// The result of one solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// The terminal status.
    pub status: SolveStatus,
    /// The roster and statistics, present on success.
    pub schedule: Option<Schedule>,
    /// Human-readable explanation, present on failure.
    pub reason: Option<String>,
    /// The offending rule tuple, present when the validator rejected.
    pub violation: Option<RuleViolation>,
    /// Backend search statistics.
    pub diagnostics: SolveDiagnostics,
}

impl SolveOutcome {
    /// Builds a successful outcome.
    pub fn success(
        status: SolveStatus,
        schedule: Schedule,
        diagnostics: SolveDiagnostics,
    ) -> Self {
        Self {
            status,
            schedule: Some(schedule),
            reason: None,
            violation: None,
            diagnostics,
        }
    }

    /// Builds a failed outcome with a reason.
    pub fn failure(
        status: SolveStatus,
        reason: impl Into<String>,
        diagnostics: SolveDiagnostics,
    ) -> Self {
        Self {
            status,
            schedule: None,
            reason: Some(reason.into()),
            violation: None,
            diagnostics,
        }
    }

    /// Builds the outcome for a roster the validator rejected.
    pub fn rejected(violation: RuleViolation, diagnostics: SolveDiagnostics) -> Self {
        Self {
            status: SolveStatus::Invalid,
            schedule: None,
            reason: Some(format!("validation failed: {violation}")),
            violation: Some(violation),
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success_classification() {
        assert!(SolveStatus::Optimal.is_success());
        assert!(SolveStatus::Feasible.is_success());
        assert!(!SolveStatus::Infeasible.is_success());
        assert!(!SolveStatus::Invalid.is_success());
        assert!(!SolveStatus::Unknown.is_success());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&SolveStatus::Optimal).unwrap(),
            "\"optimal\""
        );
        assert_eq!(
            serde_json::to_string(&SolveStatus::Infeasible).unwrap(),
            "\"infeasible\""
        );
    }

    #[test]
    fn test_preference_satisfaction_percentage() {
        let summary = PreferenceSatisfaction::from_counts(4, 3);
        assert_eq!(summary.percentage, 75.0);
    }

    #[test]
    fn test_preference_satisfaction_empty_is_full() {
        let summary = PreferenceSatisfaction::from_counts(0, 0);
        assert_eq!(summary.percentage, 100.0);
    }

    #[test]
    fn test_violation_display() {
        let violation = RuleViolation {
            rule: RuleKind::AfternoonThenMorning,
            employee: Some(EmployeeId::Salaried(0)),
            day: Some(4),
            shift: Some(ShiftKind::Morning),
        };
        assert_eq!(
            violation.to_string(),
            "rule AfternoonThenMorning for S1 on day 4 shift M"
        );
    }

    #[test]
    fn test_rejected_outcome_carries_violation() {
        let violation = RuleViolation {
            rule: RuleKind::Coverage,
            employee: None,
            day: Some(0),
            shift: Some(ShiftKind::Afternoon),
        };
        let outcome = SolveOutcome::rejected(violation.clone(), SolveDiagnostics::default());
        assert_eq!(outcome.status, SolveStatus::Invalid);
        assert!(outcome.schedule.is_none());
        assert_eq!(outcome.violation, Some(violation));
        assert!(outcome.reason.unwrap().starts_with("validation failed"));
    }

    #[test]
    fn test_failure_outcome_serialization() {
        let outcome = SolveOutcome::failure(
            SolveStatus::Unknown,
            "time limit of 300s reached",
            SolveDiagnostics {
                wall_time_ms: 300_001,
                propagations: None,
                nodes: None,
            },
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "unknown");
        assert_eq!(json["reason"], "time limit of 300s reached");
        assert_eq!(json["schedule"], serde_json::Value::Null);
        assert_eq!(json["diagnostics"]["wall_time_ms"], 300_001);
    }
}
