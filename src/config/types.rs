//! Configuration types for a roster solve.
//!
//! This module contains the strongly-typed configuration structure a
//! caller hands to [`solve_roster`](crate::solve_roster). It is plain
//! data; all checking happens when the configuration is turned into a
//! solve instance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AvailabilitySlot, PreferenceEntry};

/// The planning horizon, either a whole calendar month or an inclusive
/// date range.
///
/// # Example
///
/// ```
/// use roster_engine::config::HorizonSpec;
///
/// let month: HorizonSpec = serde_json::from_str(r#"{ "year": 2025, "month": 6 }"#).unwrap();
/// assert_eq!(month, HorizonSpec::Month { year: 2025, month: 6 });
///
/// let range: HorizonSpec = serde_json::from_str(
///     r#"{ "date_start": "2025-06-01", "date_end": "2025-06-07" }"#,
/// ).unwrap();
/// assert!(matches!(range, HorizonSpec::DateRange { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HorizonSpec {
    /// A whole calendar month.
    Month {
        /// The calendar year.
        year: i32,
        /// The month, 1 through 12.
        month: u32,
    },
    /// An inclusive date range.
    DateRange {
        /// The first day of the horizon.
        date_start: chrono::NaiveDate,
        /// The last day of the horizon.
        date_end: chrono::NaiveDate,
    },
}

/// Unit costs per shift, by pay category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCosts {
    /// Cost of one regular salaried shift.
    pub regular: Decimal,
    /// Cost of one salaried overtime shift.
    pub overtime: Decimal,
    /// Cost of one contractor shift.
    pub contractor: Decimal,
}

impl Default for ShiftCosts {
    fn default() -> Self {
        Self {
            regular: Decimal::ONE,
            overtime: Decimal::from(2),
            contractor: Decimal::new(15, 1),
        }
    }
}

fn default_work_rest_ratio() -> f64 {
    3.0
}

fn default_time_limit_seconds() -> u64 {
    300
}

/// The full input of one roster solve.
///
/// Employee ids are 0-based within their kind: salaried ids run
/// `0..num_salaried`, contractor ids `0..num_contractors`. Days inside
/// preference and availability entries are 1-based within the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    /// The planning horizon.
    pub horizon: HorizonSpec,
    /// Number of salaried employees (at least 1).
    pub num_salaried: usize,
    /// Number of contractors (may be 0).
    pub num_contractors: usize,
    /// Regular-hours cap per salaried id. Values not divisible by 8 are
    /// floored to whole shifts.
    pub max_regular_hours: BTreeMap<usize, u32>,
    /// Maximum overtime shifts per salaried employee.
    pub max_overtime: u32,
    /// Minimum fully-free weekends per salaried employee.
    pub min_free_weekends: u32,
    /// Maximum consecutive working days, 1 through 6.
    pub max_consecutive_days: u32,
    /// Work-to-rest ratio bounding worked days in any 14-day window.
    #[serde(default = "default_work_rest_ratio")]
    pub work_rest_ratio: f64,
    /// Preference entries per salaried id.
    #[serde(default)]
    pub preferences: BTreeMap<usize, Vec<PreferenceEntry>>,
    /// Bookable slots per contractor id; absent slots are unavailable.
    #[serde(default)]
    pub availability: BTreeMap<usize, Vec<AvailabilitySlot>>,
    /// Unit costs per shift.
    #[serde(default)]
    pub costs: ShiftCosts,
    /// Wall-clock limit for the backend, in seconds.
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: u64,
}
