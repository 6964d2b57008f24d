//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the fail-fast input checks that run before any model is built.
//! Infeasibility, timeouts and post-solve validation failures are not
//! errors in this sense; they are reported as solve outcomes.

use thiserror::Error;

/// The main error type for the roster engine.
///
/// All configuration problems surface through this type before model
/// building starts, naming the offending field so callers can point the
/// user at the exact input.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::InvalidField {
///     field: "num_salaried".to_string(),
///     message: "must be at least 1".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'num_salaried': must be at least 1");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested planning horizon is malformed.
    #[error("Invalid horizon: {message}")]
    InvalidHorizon {
        /// A description of what made the horizon invalid.
        message: String,
    },

    /// A scalar configuration field is out of range or inconsistent.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A mapping referenced an employee id that does not exist.
    #[error("Unknown employee id {id} in '{field}'")]
    UnknownEmployee {
        /// The configuration field containing the reference.
        field: String,
        /// The id that was not found.
        id: usize,
    },

    /// A preference entry was invalid (bad value, bad day, or duplicate).
    #[error("Invalid preference for salaried {employee} on day {day}: {message}")]
    InvalidPreference {
        /// The salaried employee the entry belongs to.
        employee: usize,
        /// The 1-based day of the entry.
        day: u32,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// An availability entry was invalid (bad day or duplicate).
    #[error("Invalid availability for contractor {contractor} on day {day}: {message}")]
    InvalidAvailability {
        /// The contractor the entry belongs to.
        contractor: usize,
        /// The 1-based day of the entry.
        day: u32,
        /// A description of what made the entry invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
