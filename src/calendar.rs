//! Planning-horizon calendar.
//!
//! This module builds the ordered day list a solve plans over, either from
//! a calendar month or from an inclusive date range, and derives the
//! weekend pairs used by the free-weekend rules. Holidays are a property
//! of employee preferences, not of the calendar.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Upper bound on the number of days a single solve may plan over.
const MAX_HORIZON_DAYS: i64 = 366;

/// A Saturday immediately followed by a Sunday, both inside the horizon.
///
/// Day indices are 0-based positions in the horizon, so `sunday` is always
/// `saturday + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendPair {
    /// 0-based day index of the Saturday.
    pub saturday: usize,
    /// 0-based day index of the Sunday.
    pub sunday: usize,
}

/// The ordered list of days the solver plans over.
///
/// # Example
///
/// ```
/// use roster_engine::calendar::Horizon;
///
/// let horizon = Horizon::from_month(2025, 6).unwrap();
/// assert_eq!(horizon.day_count(), 30);
/// // June 2025 starts on a Sunday and contains four full weekends.
/// assert_eq!(horizon.weekend_pairs().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Horizon {
    days: Vec<NaiveDate>,
    weekend_pairs: Vec<WeekendPair>,
}

impl Horizon {
    /// Builds the horizon covering a whole calendar month.
    pub fn from_month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::InvalidHorizon {
                message: format!("{year}-{month:02} is not a valid month"),
            }
        })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        // First day of the following month is always representable here.
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .ok_or_else(|| EngineError::InvalidHorizon {
                message: format!("{year}-{month:02} has no following month"),
            })?
            .pred_opt()
            .ok_or_else(|| EngineError::InvalidHorizon {
                message: format!("{year}-{month:02} has no last day"),
            })?;
        Self::from_range(start, end)
    }

    /// Builds the horizon covering an inclusive date range.
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidHorizon {
                message: format!("date_end {end} is before date_start {start}"),
            });
        }
        let day_count = (end - start).num_days() + 1;
        if day_count > MAX_HORIZON_DAYS {
            return Err(EngineError::InvalidHorizon {
                message: format!("{day_count} days exceed the {MAX_HORIZON_DAYS}-day limit"),
            });
        }

        let days: Vec<NaiveDate> = (0..day_count)
            .map(|offset| start + Duration::days(offset))
            .collect();

        let mut weekend_pairs = Vec::new();
        for (index, window) in days.windows(2).enumerate() {
            if window[0].weekday() == Weekday::Sat && window[1].weekday() == Weekday::Sun {
                weekend_pairs.push(WeekendPair {
                    saturday: index,
                    sunday: index + 1,
                });
            }
        }

        Ok(Self {
            days,
            weekend_pairs,
        })
    }

    /// Returns the number of days in the horizon.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Returns the calendar date of a 0-based day index.
    ///
    /// # Panics
    ///
    /// Panics if `day` is outside the horizon.
    pub fn date(&self, day: usize) -> NaiveDate {
        self.days[day]
    }

    /// Returns all days in order.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Returns the weekday of a 0-based day index.
    ///
    /// # Panics
    ///
    /// Panics if `day` is outside the horizon.
    pub fn weekday(&self, day: usize) -> Weekday {
        self.days[day].weekday()
    }

    /// Returns the Saturday/Sunday pairs fully inside the horizon.
    pub fn weekend_pairs(&self) -> &[WeekendPair] {
        &self.weekend_pairs
    }

    /// Returns the first day of the horizon.
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    /// Returns the last day of the horizon.
    pub fn end(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }
}
