//! Validated solve instances.
//!
//! An [`Instance`] is a [`SolveConfig`](super::SolveConfig) that has
//! passed every fail-fast check and been normalized for the model
//! builder: the horizon is materialized, hour caps are floored to whole
//! shifts, and preference/availability entries are indexed by 0-based
//! day and shift.

use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::Horizon;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeId, PreferenceValue, ShiftKind, SolveParameters, SHIFT_DURATION_HOURS,
};

use super::types::{HorizonSpec, ShiftCosts, SolveConfig};

/// Length of the sliding work/rest window, in days.
pub(crate) const WORK_WINDOW_DAYS: usize = 14;

/// Derives the cap on worked days inside one 14-day window from the
/// work-to-rest ratio: `floor(14·r / (1+r))`, never more than 13 so at
/// least one rest day survives in every window.
pub(crate) fn work_window_cap(ratio: f64) -> u32 {
    let cap = (WORK_WINDOW_DAYS as f64 * ratio / (1.0 + ratio)).floor() as u32;
    cap.min(WORK_WINDOW_DAYS as u32 - 1)
}

/// A fully validated, normalized solve instance.
#[derive(Debug, Clone)]
pub(crate) struct Instance {
    /// The materialized planning horizon.
    pub horizon: Horizon,
    /// Number of salaried employees.
    pub num_salaried: usize,
    /// Number of contractors.
    pub num_contractors: usize,
    /// Regular-shift cap per salaried id (hours floored to whole shifts).
    pub max_regular_shifts: Vec<u32>,
    /// Maximum overtime shifts per salaried employee.
    pub max_overtime: u32,
    /// Minimum fully-free weekends per salaried employee.
    pub min_free_weekends: u32,
    /// Maximum consecutive working days.
    pub max_consecutive_days: usize,
    /// The configured work-to-rest ratio.
    pub work_rest_ratio: f64,
    /// Cap on worked days in any 14-day window, derived from the ratio.
    pub window_work_cap: u32,
    /// Preference entries per salaried id, keyed by (0-based day, shift).
    pub preferences: Vec<BTreeMap<(usize, ShiftKind), PreferenceValue>>,
    /// Bookable slots per contractor id, keyed by (0-based day, shift).
    pub availability: Vec<BTreeSet<(usize, ShiftKind)>>,
    /// Unit costs per shift.
    pub costs: ShiftCosts,
    /// Backend wall-clock limit, in milliseconds.
    pub time_limit_ms: u64,
}

impl Instance {
    /// Validates a configuration and normalizes it into an instance.
    pub fn from_config(config: &SolveConfig) -> EngineResult<Self> {
        let horizon = match config.horizon {
            HorizonSpec::Month { year, month } => Horizon::from_month(year, month)?,
            HorizonSpec::DateRange {
                date_start,
                date_end,
            } => Horizon::from_range(date_start, date_end)?,
        };
        let day_count = horizon.day_count();

        if config.num_salaried == 0 {
            return Err(EngineError::InvalidField {
                field: "num_salaried".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(1..=6).contains(&config.max_consecutive_days) {
            return Err(EngineError::InvalidField {
                field: "max_consecutive_days".to_string(),
                message: format!("must be between 1 and 6, got {}", config.max_consecutive_days),
            });
        }
        if !config.work_rest_ratio.is_finite()
            || !(1.0..=5.0).contains(&config.work_rest_ratio)
        {
            return Err(EngineError::InvalidField {
                field: "work_rest_ratio".to_string(),
                message: format!(
                    "must be between 1.0 and 5.0, got {}",
                    config.work_rest_ratio
                ),
            });
        }
        if config.time_limit_seconds == 0 {
            return Err(EngineError::InvalidField {
                field: "time_limit_seconds".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        for (name, value) in [
            ("costs.regular", config.costs.regular),
            ("costs.overtime", config.costs.overtime),
            ("costs.contractor", config.costs.contractor),
        ] {
            if value.is_sign_negative() {
                return Err(EngineError::InvalidField {
                    field: name.to_string(),
                    message: format!("must not be negative, got {value}"),
                });
            }
            if value > rust_decimal::Decimal::from(1000) {
                return Err(EngineError::InvalidField {
                    field: name.to_string(),
                    message: format!("must be at most 1000, got {value}"),
                });
            }
        }

        let mut max_regular_shifts = Vec::with_capacity(config.num_salaried);
        for salaried in 0..config.num_salaried {
            let hours = config.max_regular_hours.get(&salaried).ok_or_else(|| {
                EngineError::InvalidField {
                    field: "max_regular_hours".to_string(),
                    message: format!("missing entry for salaried {salaried}"),
                }
            })?;
            max_regular_shifts.push(hours / SHIFT_DURATION_HOURS);
        }
        if let Some(&id) = config
            .max_regular_hours
            .keys()
            .find(|&&id| id >= config.num_salaried)
        {
            return Err(EngineError::UnknownEmployee {
                field: "max_regular_hours".to_string(),
                id,
            });
        }

        let mut preferences = vec![BTreeMap::new(); config.num_salaried];
        for (&salaried, entries) in &config.preferences {
            if salaried >= config.num_salaried {
                return Err(EngineError::UnknownEmployee {
                    field: "preferences".to_string(),
                    id: salaried,
                });
            }
            for entry in entries {
                if entry.day == 0 || entry.day as usize > day_count {
                    return Err(EngineError::InvalidPreference {
                        employee: salaried,
                        day: entry.day,
                        message: format!("day is outside the {day_count}-day horizon"),
                    });
                }
                let key = (entry.day as usize - 1, entry.shift);
                if preferences[salaried].insert(key, entry.value).is_some() {
                    return Err(EngineError::InvalidPreference {
                        employee: salaried,
                        day: entry.day,
                        message: format!("duplicate entry for shift {}", entry.shift),
                    });
                }
            }
        }

        let mut availability = vec![BTreeSet::new(); config.num_contractors];
        for (&contractor, slots) in &config.availability {
            if contractor >= config.num_contractors {
                return Err(EngineError::UnknownEmployee {
                    field: "availability".to_string(),
                    id: contractor,
                });
            }
            for slot in slots {
                if slot.day == 0 || slot.day as usize > day_count {
                    return Err(EngineError::InvalidAvailability {
                        contractor,
                        day: slot.day,
                        message: format!("day is outside the {day_count}-day horizon"),
                    });
                }
                let key = (slot.day as usize - 1, slot.shift);
                if !availability[contractor].insert(key) {
                    return Err(EngineError::InvalidAvailability {
                        contractor,
                        day: slot.day,
                        message: format!("duplicate entry for shift {}", slot.shift),
                    });
                }
            }
        }

        Ok(Self {
            horizon,
            num_salaried: config.num_salaried,
            num_contractors: config.num_contractors,
            max_regular_shifts,
            max_overtime: config.max_overtime,
            min_free_weekends: config.min_free_weekends,
            max_consecutive_days: config.max_consecutive_days as usize,
            work_rest_ratio: config.work_rest_ratio,
            window_work_cap: work_window_cap(config.work_rest_ratio),
            preferences,
            availability,
            costs: config.costs,
            time_limit_ms: config.time_limit_seconds.saturating_mul(1000),
        })
    }

    /// Total number of employees, salaried and contractors.
    pub fn employee_count(&self) -> usize {
        self.num_salaried + self.num_contractors
    }

    /// All employee ids in roster-column order: salaried, then contractors.
    pub fn employee_ids(&self) -> Vec<EmployeeId> {
        (0..self.num_salaried)
            .map(EmployeeId::Salaried)
            .chain((0..self.num_contractors).map(EmployeeId::Contractor))
            .collect()
    }

    /// The employee id at a 0-based column position.
    pub fn employee_at(&self, position: usize) -> EmployeeId {
        if position < self.num_salaried {
            EmployeeId::Salaried(position)
        } else {
            EmployeeId::Contractor(position - self.num_salaried)
        }
    }

    /// Whether a contractor declared a slot bookable.
    pub fn is_available(&self, contractor: usize, day: usize, shift: ShiftKind) -> bool {
        self.availability[contractor].contains(&(day, shift))
    }

    /// The preference of a salaried employee for a slot, if any.
    pub fn preference(
        &self,
        salaried: usize,
        day: usize,
        shift: ShiftKind,
    ) -> Option<PreferenceValue> {
        self.preferences[salaried].get(&(day, shift)).copied()
    }

    /// Whether a slot is blocked by a holiday preference.
    pub fn is_holiday(&self, salaried: usize, day: usize, shift: ShiftKind) -> bool {
        self.preference(salaried, day, shift) == Some(PreferenceValue::Holiday)
    }

    /// Total number of preference entries across all salaried employees.
    pub fn preference_cell_count(&self) -> usize {
        self.preferences.iter().map(|entries| entries.len()).sum()
    }

    /// The effective parameters echoed into the outcome.
    pub fn parameters(&self) -> SolveParameters {
        SolveParameters {
            date_start: self.horizon.start(),
            date_end: self.horizon.end(),
            min_free_weekends: self.min_free_weekends,
            max_consecutive_days: self.max_consecutive_days as u32,
            max_overtime: self.max_overtime,
            work_rest_ratio: self.work_rest_ratio,
            window_work_cap: self.window_work_cap,
        }
    }
}
