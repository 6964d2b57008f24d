//! Solve orchestration.
//!
//! A solve is one pass through Calendar → Model builder → Solver driver
//! → Result assembler → Validator. Each call owns its whole state; there
//! is nothing shared between solves and nothing retried here.

mod assembler;
mod builder;
mod driver;
mod indexer;
mod validator;

use tracing::{info, warn};

use crate::config::{Instance, SolveConfig};
use crate::error::EngineResult;
use crate::models::{SolveOutcome, SolveStatus};

/// Solves one roster instance.
///
/// Fails fast with an [`EngineError`](crate::error::EngineError) on
/// invalid configuration; every other condition (infeasibility, timeout,
/// backend or validation rejection) is a normal outcome carried in the
/// returned [`SolveOutcome`].
///
/// # Errors
///
/// Returns an error when the configuration itself is invalid, naming the
/// offending field.
pub fn solve_roster(config: &SolveConfig) -> EngineResult<SolveOutcome> {
    let instance = Instance::from_config(config)?;
    info!(
        days = instance.horizon.day_count(),
        salaried = instance.num_salaried,
        contractors = instance.num_contractors,
        weekend_pairs = instance.horizon.weekend_pairs().len(),
        "starting roster solve"
    );

    let built = builder::build_model(&instance, &builder::ObjectiveWeights::default());

    match driver::run(built, &instance) {
        driver::DriverOutcome::Solved {
            assignment,
            diagnostics,
        } => {
            if let Err(violation) = validator::validate(&instance, &assignment) {
                warn!(%violation, "extracted assignment failed validation");
                return Ok(SolveOutcome::rejected(violation, diagnostics));
            }
            let schedule = assembler::assemble(&instance, &assignment);
            info!(
                wall_time_ms = diagnostics.wall_time_ms,
                "roster validated"
            );
            Ok(SolveOutcome::success(
                SolveStatus::Optimal,
                schedule,
                diagnostics,
            ))
        }
        driver::DriverOutcome::Failed {
            status,
            reason,
            diagnostics,
        } => {
            info!(?status, reason, "solve ended without a roster");
            Ok(SolveOutcome::failure(status, reason, diagnostics))
        }
    }
}
