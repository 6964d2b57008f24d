//! Solver driver.
//!
//! Runs the backend under its wall-clock limit, maps the backend's
//! terminal condition onto a solve status, and extracts the primal
//! values into an [`Assignment`] for assembly and validation.

use std::time::Instant;

use selen::prelude::*;
use tracing::debug;

use crate::config::Instance;
use crate::models::{SolveDiagnostics, SolveStatus};

use super::builder::BuiltModel;
use super::indexer::Assignment;

/// What the backend produced for one model.
pub(crate) enum DriverOutcome {
    /// The backend found (and proved) a best assignment.
    Solved {
        /// The extracted primal values.
        assignment: Assignment,
        /// Search statistics of the run.
        diagnostics: SolveDiagnostics,
    },
    /// The backend terminated without an assignment.
    Failed {
        /// The status the termination maps to.
        status: SolveStatus,
        /// Human-readable reason, including backend context.
        reason: String,
        /// Search statistics of the run (wall time only).
        diagnostics: SolveDiagnostics,
    },
}

/// Maximizes the objective and extracts the assignment.
pub(crate) fn run(built: BuiltModel, instance: &Instance) -> DriverOutcome {
    let BuiltModel {
        model,
        objective,
        works,
        overtime,
        regular,
        overtime_totals,
        all_grid,
        salaried_grid,
    } = built;

    let started = Instant::now();
    let result = model.maximize(objective);
    let wall_time_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(solution) => {
            debug!(
                objective = solution.get_int(objective),
                propagations = solution.stats.propagation_count,
                nodes = solution.stats.node_count,
                "backend proved an optimal assignment"
            );
            let diagnostics = SolveDiagnostics {
                wall_time_ms,
                propagations: Some(solution.stats.propagation_count as u64),
                nodes: Some(solution.stats.node_count as u64),
            };

            let works_bits: Vec<bool> = works
                .iter()
                .map(|&var| matches!(solution[var], Val::ValI(1)))
                .collect();
            let overtime_bits: Vec<bool> = overtime
                .iter()
                .map(|&var| matches!(solution[var], Val::ValI(1)))
                .collect();
            let regular_shifts: Vec<u32> = regular
                .iter()
                .map(|&var| solution.get_int(var).max(0) as u32)
                .collect();
            let overtime_shifts: Vec<u32> = overtime_totals
                .iter()
                .map(|&var| solution.get_int(var).max(0) as u32)
                .collect();

            DriverOutcome::Solved {
                assignment: Assignment::new(
                    all_grid,
                    salaried_grid,
                    works_bits,
                    overtime_bits,
                    regular_shifts,
                    overtime_shifts,
                ),
                diagnostics,
            }
        }
        Err(error) => {
            let diagnostics = SolveDiagnostics {
                wall_time_ms,
                propagations: None,
                nodes: None,
            };
            let (status, reason) = map_backend_error(&error, instance);
            DriverOutcome::Failed {
                status,
                reason,
                diagnostics,
            }
        }
    }
}

/// Maps a backend error onto the public status alphabet.
fn map_backend_error(error: &SolverError, instance: &Instance) -> (SolveStatus, String) {
    match error {
        SolverError::NoSolution { .. } | SolverError::ConflictingConstraints { .. } => (
            SolveStatus::Infeasible,
            format!("no roster satisfies the hard constraints: {error}"),
        ),
        SolverError::Timeout { .. } => (
            SolveStatus::Unknown,
            format!(
                "time limit of {}s reached without a roster: {error}",
                instance.time_limit_ms / 1000
            ),
        ),
        SolverError::MemoryLimit { .. } => (
            SolveStatus::Unknown,
            format!("backend stopped at its memory limit: {error}"),
        ),
        _ => (
            SolveStatus::Invalid,
            format!("backend rejected the model: {error}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolveConfig;
    use crate::models::ShiftKind;
    use crate::scheduling::builder::{build_model, ObjectiveWeights};

    fn instance_from(json: &str) -> Instance {
        let config: SolveConfig = serde_json::from_str(json).unwrap();
        Instance::from_config(&config).unwrap()
    }

    #[test]
    fn test_single_day_pair_is_solved() {
        let instance = instance_from(
            r#"{
                "horizon": { "date_start": "2025-06-02", "date_end": "2025-06-02" },
                "num_salaried": 2,
                "num_contractors": 0,
                "max_regular_hours": { "0": 40, "1": 40 },
                "max_overtime": 0,
                "min_free_weekends": 0,
                "max_consecutive_days": 5,
                "time_limit_seconds": 30
            }"#,
        );
        let built = build_model(&instance, &ObjectiveWeights::default());
        match run(built, &instance) {
            DriverOutcome::Solved { assignment, .. } => {
                // Both shifts covered, one each.
                let morning_workers = (0..2)
                    .filter(|&e| assignment.works(e, 0, ShiftKind::Morning))
                    .count();
                let afternoon_workers = (0..2)
                    .filter(|&e| assignment.works(e, 0, ShiftKind::Afternoon))
                    .count();
                assert_eq!(morning_workers, 1);
                assert_eq!(afternoon_workers, 1);
                assert_eq!(assignment.regular_shifts, vec![1, 1]);
                assert_eq!(assignment.overtime_shifts, vec![0, 0]);
            }
            DriverOutcome::Failed { reason, .. } => panic!("expected a roster, got: {reason}"),
        }
    }

    #[test]
    fn test_undercapacity_maps_to_infeasible() {
        // One employee cannot cover both daily shifts.
        let instance = instance_from(
            r#"{
                "horizon": { "date_start": "2025-06-02", "date_end": "2025-06-04" },
                "num_salaried": 1,
                "num_contractors": 0,
                "max_regular_hours": { "0": 160 },
                "max_overtime": 0,
                "min_free_weekends": 0,
                "max_consecutive_days": 1,
                "time_limit_seconds": 30
            }"#,
        );
        let built = build_model(&instance, &ObjectiveWeights::default());
        match run(built, &instance) {
            DriverOutcome::Failed { status, reason, .. } => {
                assert_eq!(status, SolveStatus::Infeasible);
                assert!(reason.contains("hard constraints"));
            }
            DriverOutcome::Solved { .. } => panic!("expected infeasibility"),
        }
    }

    #[test]
    fn test_error_mapping_table() {
        let instance = instance_from(
            r#"{
                "horizon": { "date_start": "2025-06-02", "date_end": "2025-06-02" },
                "num_salaried": 1,
                "num_contractors": 0,
                "max_regular_hours": { "0": 40 },
                "max_overtime": 0,
                "min_free_weekends": 0,
                "max_consecutive_days": 5,
                "time_limit_seconds": 120
            }"#,
        );
        let (status, reason) = map_backend_error(&SolverError::timeout(), &instance);
        assert_eq!(status, SolveStatus::Unknown);
        assert!(reason.contains("time limit of 120s"));

        let (status, _) = map_backend_error(&SolverError::no_solution(), &instance);
        assert_eq!(status, SolveStatus::Infeasible);

        let (status, _) = map_backend_error(&SolverError::memory_limit(), &instance);
        assert_eq!(status, SolveStatus::Unknown);

        let (status, reason) =
            map_backend_error(&SolverError::invalid_constraint("bad model"), &instance);
        assert_eq!(status, SolveStatus::Invalid);
        assert!(reason.contains("backend rejected"));
    }
}
