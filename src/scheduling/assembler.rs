//! Result assembly.
//!
//! Turns an extracted assignment into the day-indexed roster table and
//! computes every derived statistic: hour splits, free weekends (counted
//! from the assignment itself, not the solver's auxiliary indicators),
//! preference satisfaction, contractor utilization and the cost
//! breakdown.

use rust_decimal::Decimal;

use crate::config::Instance;
use crate::models::{
    CellLabel, ContractorStats, CostBreakdown, EmployeeId, PreferenceSatisfaction,
    PreferenceValue, SalariedStats, Schedule, ShiftKind, SHIFT_DURATION_HOURS,
};

/// Assembles the validated schedule for an assignment.
pub(crate) fn assemble(
    instance: &Instance,
    assignment: &super::indexer::Assignment,
) -> Schedule {
    let days = instance.horizon.day_count();
    let employees = instance.employee_ids();

    let mut rows = Vec::with_capacity(days);
    for day in 0..days {
        let mut row = Vec::with_capacity(employees.len());
        for (column, employee) in employees.iter().enumerate() {
            row.push(cell_label(instance, assignment, *employee, column, day));
        }
        rows.push(row);
    }

    let salaried = (0..instance.num_salaried)
        .map(|n| salaried_stats(instance, assignment, n))
        .collect();
    let contractors = (0..instance.num_contractors)
        .map(|c| contractor_stats(instance, assignment, c))
        .collect();
    let costs = cost_breakdown(instance, assignment);

    Schedule {
        days: instance.horizon.days().to_vec(),
        employees,
        rows,
        salaried,
        contractors,
        costs,
        parameters: instance.parameters(),
    }
}

fn cell_label(
    instance: &Instance,
    assignment: &super::indexer::Assignment,
    employee: EmployeeId,
    column: usize,
    day: usize,
) -> CellLabel {
    match assignment.worked_shift(column, day) {
        Some(shift) => {
            let overtime = employee.is_salaried()
                && assignment.is_overtime(employee.index(), day, shift);
            match (shift, overtime) {
                (ShiftKind::Morning, false) => CellLabel::Morning,
                (ShiftKind::Morning, true) => CellLabel::MorningOvertime,
                (ShiftKind::Afternoon, false) => CellLabel::Afternoon,
                (ShiftKind::Afternoon, true) => CellLabel::AfternoonOvertime,
            }
        }
        None => {
            let holiday = employee.is_salaried()
                && ShiftKind::ALL
                    .iter()
                    .any(|&shift| instance.is_holiday(employee.index(), day, shift));
            if holiday {
                CellLabel::Holiday
            } else {
                CellLabel::Rest
            }
        }
    }
}

fn salaried_stats(
    instance: &Instance,
    assignment: &super::indexer::Assignment,
    salaried: usize,
) -> SalariedStats {
    let shifts_worked = assignment.total_shifts(salaried);

    let free_weekends = instance
        .horizon
        .weekend_pairs()
        .iter()
        .filter(|pair| {
            assignment.shifts_on_day(salaried, pair.saturday) == 0
                && assignment.shifts_on_day(salaried, pair.sunday) == 0
        })
        .count() as u32;

    let holiday_days = (0..instance.horizon.day_count())
        .filter(|&day| {
            ShiftKind::ALL
                .iter()
                .any(|&shift| instance.is_holiday(salaried, day, shift))
        })
        .count() as u32;

    let mut total = 0;
    let mut satisfied = 0;
    for (&(day, shift), value) in &instance.preferences[salaried] {
        let honored = match value {
            PreferenceValue::Works => assignment.works(salaried, day, shift),
            PreferenceValue::Avoid => !assignment.works(salaried, day, shift),
            PreferenceValue::Holiday => continue,
        };
        total += 1;
        if honored {
            satisfied += 1;
        }
    }

    SalariedStats {
        employee: EmployeeId::Salaried(salaried),
        shifts_worked,
        hours_worked: shifts_worked * SHIFT_DURATION_HOURS,
        regular_hours: assignment.regular_shifts[salaried] * SHIFT_DURATION_HOURS,
        overtime_hours: assignment.overtime_shifts[salaried] * SHIFT_DURATION_HOURS,
        free_weekends,
        holiday_days,
        preference_satisfaction: PreferenceSatisfaction::from_counts(total, satisfied),
    }
}

fn contractor_stats(
    instance: &Instance,
    assignment: &super::indexer::Assignment,
    contractor: usize,
) -> ContractorStats {
    let column = instance.num_salaried + contractor;
    let days = instance.horizon.day_count();

    let mut morning_shifts = 0;
    let mut afternoon_shifts = 0;
    for day in 0..days {
        if assignment.works(column, day, ShiftKind::Morning) {
            morning_shifts += 1;
        }
        if assignment.works(column, day, ShiftKind::Afternoon) {
            afternoon_shifts += 1;
        }
    }
    let shifts_worked = morning_shifts + afternoon_shifts;

    let slots_available = instance.availability[contractor].len() as u32;
    let availability_utilization = if slots_available == 0 {
        0.0
    } else {
        f64::from(shifts_worked) / f64::from(slots_available)
    };

    ContractorStats {
        employee: EmployeeId::Contractor(contractor),
        shifts_worked,
        morning_shifts,
        afternoon_shifts,
        hours_worked: shifts_worked * SHIFT_DURATION_HOURS,
        availability_utilization,
    }
}

fn cost_breakdown(
    instance: &Instance,
    assignment: &super::indexer::Assignment,
) -> CostBreakdown {
    let regular_shifts: u32 = assignment.regular_shifts.iter().sum();
    let overtime_shifts: u32 = assignment.overtime_shifts.iter().sum();
    let contractor_shifts: u32 = (0..instance.num_contractors)
        .map(|c| assignment.total_shifts(instance.num_salaried + c))
        .sum();

    let regular_cost = Decimal::from(regular_shifts) * instance.costs.regular;
    let overtime_cost = Decimal::from(overtime_shifts) * instance.costs.overtime;
    let contractor_cost = Decimal::from(contractor_shifts) * instance.costs.contractor;

    CostBreakdown {
        regular_cost,
        overtime_cost,
        contractor_cost,
        total_cost: regular_cost + overtime_cost + contractor_cost,
    }
}
