//! Configuration for the roster engine.
//!
//! The caller builds a [`SolveConfig`] (directly or via serde) and hands
//! it to [`solve_roster`](crate::solve_roster). Validation is fail-fast:
//! the first invalid field aborts the solve before any model is built.

mod instance;
mod types;

pub use types::{HorizonSpec, ShiftCosts, SolveConfig};

pub(crate) use instance::{work_window_cap, Instance, WORK_WINDOW_DAYS};
