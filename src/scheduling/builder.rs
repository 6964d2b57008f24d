//! Constraint model construction.
//!
//! Translates a validated instance into a solver model: one Boolean per
//! (employee, day, shift) slot, companion overtime Booleans and
//! regular/overtime counters for salaried employees, linearized
//! weekend-free indicators, and the scalarized objective.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use selen::prelude::*;

use crate::config::{Instance, WORK_WINDOW_DAYS};
use crate::models::ShiftKind;

use super::indexer::SlotGrid;

/// Weight of the preference-satisfaction objective term.
const PREFERENCE_WEIGHT: f64 = 30.0;
/// Weight of the staffing-cost objective term (entered negated).
const COST_WEIGHT: f64 = 40.0;
/// Weight of the free-weekend objective term.
const FREE_WEEKEND_WEIGHT: f64 = 30.0;
/// Weight of the contractor-fairness objective term (entered negated).
const FAIRNESS_WEIGHT: f64 = 10.0;

/// Normalized objective units granted per weight point, so term
/// magnitudes stay comparable across horizon sizes.
const WEIGHT_RESOLUTION: f64 = 100.0;

/// Factor applied to the whole objective before rounding coefficients to
/// integers.
const OBJECTIVE_SCALE: f64 = 10.0;

/// The scalarization weights of the objective terms.
///
/// These are tuning constants, not configuration: every production solve
/// uses [`ObjectiveWeights::default`]. The zero profile exists so tests
/// can prove the hard constraints stand on their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObjectiveWeights {
    /// Weight of honored ±1 preferences.
    pub preferences: f64,
    /// Weight of the staffing cost (minimized).
    pub cost: f64,
    /// Weight of kept-free weekends.
    pub free_weekends: f64,
    /// Weight of the contractor workload spread (minimized).
    pub fairness: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            preferences: PREFERENCE_WEIGHT,
            cost: COST_WEIGHT,
            free_weekends: FREE_WEEKEND_WEIGHT,
            fairness: FAIRNESS_WEIGHT,
        }
    }
}

impl ObjectiveWeights {
    /// All-zero weights; the objective degenerates to a constant and any
    /// roster satisfying the hard constraints is optimal.
    #[cfg(test)]
    pub fn zero() -> Self {
        Self {
            preferences: 0.0,
            cost: 0.0,
            free_weekends: 0.0,
            fairness: 0.0,
        }
    }
}

/// One term of the pre-scaled objective.
struct ObjectiveTerm {
    var: VarId,
    coefficient: f64,
    max_value: i64,
}

/// A fully constructed solver model with handles to every decision
/// variable the extraction step needs.
pub(crate) struct BuiltModel {
    /// The backend model, ready to maximize.
    pub model: Model,
    /// The scalarized objective variable.
    pub objective: VarId,
    /// Work Booleans over the full employee grid.
    pub works: Vec<VarId>,
    /// Overtime Booleans over the salaried grid.
    pub overtime: Vec<VarId>,
    /// Regular-shift counters per salaried employee.
    pub regular: Vec<VarId>,
    /// Overtime-shift counters per salaried employee.
    pub overtime_totals: Vec<VarId>,
    /// Grid over all employees.
    pub all_grid: SlotGrid,
    /// Grid over salaried employees only.
    pub salaried_grid: SlotGrid,
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Builds the solver model for an instance.
pub(crate) fn build_model(instance: &Instance, weights: &ObjectiveWeights) -> BuiltModel {
    let days = instance.horizon.day_count();
    let employees = instance.employee_count();
    let salaried_count = instance.num_salaried;
    let all_grid = SlotGrid::new(employees, days);
    let salaried_grid = SlotGrid::new(salaried_count, days);

    let config = SolverConfig::default().with_timeout_ms(instance.time_limit_ms);
    let mut model = Model::with_config(config);

    // x[e, d, s]: employee e works shift s on day d.
    let works: Vec<VarId> = (0..all_grid.len()).map(|_| model.bool()).collect();
    // ox[n, d, s]: the slot is an overtime shift of salaried n.
    let overtime: Vec<VarId> = (0..salaried_grid.len()).map(|_| model.bool()).collect();

    // Counters live in domains already clipped to their caps.
    let regular: Vec<VarId> = instance
        .max_regular_shifts
        .iter()
        .map(|&cap| model.int(0, cap.min(days as u32) as i32))
        .collect();
    let overtime_totals: Vec<VarId> = (0..salaried_count)
        .map(|_| model.int(0, instance.max_overtime.min(days as u32) as i32))
        .collect();

    // Exactly one employee covers each (day, shift).
    let cover_coeffs = vec![1; employees];
    for day in 0..days {
        for shift in ShiftKind::ALL {
            let slots: Vec<VarId> = (0..employees)
                .map(|employee| works[all_grid.slot(employee, day, shift)])
                .collect();
            model.int_lin_eq(&cover_coeffs, &slots, 1);
        }
    }

    // At most one shift per employee per day.
    for employee in 0..employees {
        for day in 0..days {
            let pair = [
                works[all_grid.slot(employee, day, ShiftKind::Morning)],
                works[all_grid.slot(employee, day, ShiftKind::Afternoon)],
            ];
            model.int_lin_le(&[1, 1], &pair, 1);
        }
    }

    // Contractors only work slots they declared available.
    for contractor in 0..instance.num_contractors {
        let column = salaried_count + contractor;
        for day in 0..days {
            for shift in ShiftKind::ALL {
                if !instance.is_available(contractor, day, shift) {
                    let slot = works[all_grid.slot(column, day, shift)];
                    model.new(slot.eq(0));
                }
            }
        }
    }

    // Holiday slots are locked for their salaried employee.
    for salaried in 0..salaried_count {
        for day in 0..days {
            for shift in ShiftKind::ALL {
                if instance.is_holiday(salaried, day, shift) {
                    let slot = works[all_grid.slot(salaried, day, shift)];
                    model.new(slot.eq(0));
                }
            }
        }
    }

    // Overtime bookkeeping: ox ≤ x, reg + ot = Σx, ot = Σox.
    for salaried in 0..salaried_count {
        let mut slot_vars = Vec::with_capacity(days * 2);
        let mut overtime_vars = Vec::with_capacity(days * 2);
        for day in 0..days {
            for shift in ShiftKind::ALL {
                let x = works[all_grid.slot(salaried, day, shift)];
                let ox = overtime[salaried_grid.slot(salaried, day, shift)];
                model.int_lin_le(&[1, -1], &[ox, x], 0);
                slot_vars.push(x);
                overtime_vars.push(ox);
            }
        }

        let mut coeffs = vec![1; slot_vars.len()];
        coeffs.extend_from_slice(&[-1, -1]);
        let mut vars = slot_vars;
        vars.push(regular[salaried]);
        vars.push(overtime_totals[salaried]);
        model.int_lin_eq(&coeffs, &vars, 0);

        let mut coeffs = vec![1; overtime_vars.len()];
        coeffs.push(-1);
        let mut vars = overtime_vars;
        vars.push(overtime_totals[salaried]);
        model.int_lin_eq(&coeffs, &vars, 0);
    }

    // No more than max_consecutive_days worked days in any window one
    // day longer than the cap.
    let consecutive_cap = instance.max_consecutive_days;
    if days > consecutive_cap {
        for employee in 0..employees {
            for start in 0..(days - consecutive_cap) {
                let mut window = Vec::with_capacity((consecutive_cap + 1) * 2);
                for day in start..=start + consecutive_cap {
                    for shift in ShiftKind::ALL {
                        window.push(works[all_grid.slot(employee, day, shift)]);
                    }
                }
                let coeffs = vec![1; window.len()];
                model.int_lin_le(&coeffs, &window, consecutive_cap as i32);
            }
        }
    }

    // Sliding 14-day work/rest window.
    if days >= WORK_WINDOW_DAYS {
        for employee in 0..employees {
            for start in 0..=(days - WORK_WINDOW_DAYS) {
                let mut window = Vec::with_capacity(WORK_WINDOW_DAYS * 2);
                for day in start..start + WORK_WINDOW_DAYS {
                    for shift in ShiftKind::ALL {
                        window.push(works[all_grid.slot(employee, day, shift)]);
                    }
                }
                let coeffs = vec![1; window.len()];
                model.int_lin_le(&coeffs, &window, instance.window_work_cap as i32);
            }
        }
    }

    // An afternoon shift is never followed by the next day's morning.
    for employee in 0..employees {
        for day in 0..days.saturating_sub(1) {
            let pair = [
                works[all_grid.slot(employee, day, ShiftKind::Afternoon)],
                works[all_grid.slot(employee, day + 1, ShiftKind::Morning)],
            ];
            model.int_lin_le(&[1, 1], &pair, 1);
        }
    }

    // Weekend-free indicators for salaried employees. With W the number
    // of weekend slots worked, the two inequalities W + 2·free ≤ 2 and
    // W + free ≥ 1 force free = 1 exactly when W = 0.
    let pairs = instance.horizon.weekend_pairs().to_vec();
    let mut free_weekend = Vec::with_capacity(salaried_count * pairs.len());
    for salaried in 0..salaried_count {
        for pair in &pairs {
            let indicator = model.bool();
            let slots = [
                works[all_grid.slot(salaried, pair.saturday, ShiftKind::Morning)],
                works[all_grid.slot(salaried, pair.saturday, ShiftKind::Afternoon)],
                works[all_grid.slot(salaried, pair.sunday, ShiftKind::Morning)],
                works[all_grid.slot(salaried, pair.sunday, ShiftKind::Afternoon)],
                indicator,
            ];
            model.int_lin_le(&[1, 1, 1, 1, 2], &slots, 2);
            model.int_lin_le(&[-1, -1, -1, -1, -1], &slots, -1);
            free_weekend.push(indicator);
        }
    }

    // Minimum free weekends, skipped when the horizon has no pair.
    if !pairs.is_empty() && instance.min_free_weekends > 0 {
        let coeffs = vec![-1; pairs.len()];
        for salaried in 0..salaried_count {
            let indicators = &free_weekend[salaried * pairs.len()..(salaried + 1) * pairs.len()];
            model.int_lin_le(&coeffs, indicators, -(instance.min_free_weekends as i32));
        }
    }

    // Objective terms, collected with float coefficients first.
    let mut terms: Vec<ObjectiveTerm> = Vec::new();

    // Honored preferences, normalized by the number of entries.
    let preference_cells = instance.preference_cell_count().max(1) as f64;
    let preference_unit = weights.preferences * WEIGHT_RESOLUTION / preference_cells;
    for salaried in 0..salaried_count {
        for (&(day, shift), value) in &instance.preferences[salaried] {
            if let Some(sign) = value.objective_sign() {
                terms.push(ObjectiveTerm {
                    var: works[all_grid.slot(salaried, day, shift)],
                    coefficient: f64::from(sign) * preference_unit,
                    max_value: 1,
                });
            }
        }
    }

    // Staffing cost, minimized.
    let regular_cost = as_f64(instance.costs.regular);
    let overtime_cost = as_f64(instance.costs.overtime);
    let contractor_cost = as_f64(instance.costs.contractor);
    for salaried in 0..salaried_count {
        terms.push(ObjectiveTerm {
            var: regular[salaried],
            coefficient: -weights.cost * regular_cost,
            max_value: i64::from(instance.max_regular_shifts[salaried].min(days as u32)),
        });
        terms.push(ObjectiveTerm {
            var: overtime_totals[salaried],
            coefficient: -weights.cost * overtime_cost,
            max_value: i64::from(instance.max_overtime.min(days as u32)),
        });
    }
    for contractor in 0..instance.num_contractors {
        let column = salaried_count + contractor;
        for day in 0..days {
            for shift in ShiftKind::ALL {
                if instance.is_available(contractor, day, shift) {
                    terms.push(ObjectiveTerm {
                        var: works[all_grid.slot(column, day, shift)],
                        coefficient: -weights.cost * contractor_cost,
                        max_value: 1,
                    });
                }
            }
        }
    }

    // Kept-free weekends, normalized by the number of indicator cells.
    let weekend_cells = (pairs.len() * salaried_count).max(1) as f64;
    let weekend_unit = weights.free_weekends * WEIGHT_RESOLUTION / weekend_cells;
    for &indicator in &free_weekend {
        terms.push(ObjectiveTerm {
            var: indicator,
            coefficient: weekend_unit,
            max_value: 1,
        });
    }

    // Contractor workload spread, minimized over squared pairwise
    // differences. Needs at least two contractors.
    if instance.num_contractors >= 2 && weights.fairness > 0.0 {
        let totals: Vec<VarId> = (0..instance.num_contractors)
            .map(|contractor| {
                let column = salaried_count + contractor;
                let total = model.int(0, days as i32);
                let mut vars: Vec<VarId> = Vec::with_capacity(days * 2 + 1);
                for day in 0..days {
                    for shift in ShiftKind::ALL {
                        vars.push(works[all_grid.slot(column, day, shift)]);
                    }
                }
                let mut coeffs = vec![1; vars.len()];
                coeffs.push(-1);
                vars.push(total);
                model.int_lin_eq(&coeffs, &vars, 0);
                total
            })
            .collect();

        let pair_count = instance.num_contractors * (instance.num_contractors - 1) / 2;
        let max_sum_sq = (pair_count * days * days).max(1) as f64;
        let fairness_unit = weights.fairness * WEIGHT_RESOLUTION / max_sum_sq;
        for i in 0..instance.num_contractors {
            for j in i + 1..instance.num_contractors {
                let diff = model.int(-(days as i32), days as i32);
                model.int_lin_eq(&[1, -1, -1], &[totals[i], totals[j], diff], 0);
                let squared = model.mul(diff, diff);
                terms.push(ObjectiveTerm {
                    var: squared,
                    coefficient: -fairness_unit,
                    max_value: (days * days) as i64,
                });
            }
        }
    }

    // Bake the float coefficients into scaled integers and tie them to a
    // single objective variable.
    let mut coefficients: Vec<i32> = Vec::with_capacity(terms.len() + 1);
    let mut variables: Vec<VarId> = Vec::with_capacity(terms.len() + 1);
    let mut lower = 0i64;
    let mut upper = 0i64;
    for term in terms {
        let scaled = (term.coefficient * OBJECTIVE_SCALE).round() as i64;
        if scaled == 0 {
            continue;
        }
        let reach = scaled * term.max_value;
        if reach > 0 {
            upper += reach;
        } else {
            lower += reach;
        }
        coefficients.push(scaled as i32);
        variables.push(term.var);
    }
    let objective = model.int(lower as i32, upper as i32);
    coefficients.push(-1);
    variables.push(objective);
    model.int_lin_eq(&coefficients, &variables, 0);

    BuiltModel {
        model,
        objective,
        works,
        overtime,
        regular,
        overtime_totals,
        all_grid,
        salaried_grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Instance, SolveConfig};

    fn week_instance() -> Instance {
        let json = r#"{
            "horizon": { "date_start": "2025-06-01", "date_end": "2025-06-07" },
            "num_salaried": 3,
            "num_contractors": 0,
            "max_regular_hours": { "0": 40, "1": 40, "2": 40 },
            "max_overtime": 0,
            "min_free_weekends": 0,
            "max_consecutive_days": 5,
            "time_limit_seconds": 30
        }"#;
        let config: SolveConfig = serde_json::from_str(json).unwrap();
        Instance::from_config(&config).unwrap()
    }

    #[test]
    fn test_variable_counts() {
        let instance = week_instance();
        let built = build_model(&instance, &ObjectiveWeights::default());
        // 3 employees × 7 days × 2 shifts.
        assert_eq!(built.works.len(), 42);
        assert_eq!(built.overtime.len(), 42);
        assert_eq!(built.regular.len(), 3);
        assert_eq!(built.overtime_totals.len(), 3);
        assert_eq!(built.all_grid.len(), built.works.len());
    }

    #[test]
    fn test_default_weights_profile() {
        let weights = ObjectiveWeights::default();
        assert_eq!(weights.preferences, 30.0);
        assert_eq!(weights.cost, 40.0);
        assert_eq!(weights.free_weekends, 30.0);
        assert_eq!(weights.fairness, 10.0);
    }

    #[test]
    fn test_zero_weight_model_still_builds() {
        let instance = week_instance();
        let built = build_model(&instance, &ObjectiveWeights::zero());
        // The objective degenerates to the constant zero.
        let solution = built.model.maximize(built.objective).unwrap();
        assert_eq!(solution.get_int(built.objective), 0);
    }
}
