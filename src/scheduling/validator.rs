//! Post-solve validation.
//!
//! Re-checks every hard constraint against the extracted assignment,
//! independently of the model that produced it. A violation here means a
//! model-building bug; the solve is rejected rather than returning a
//! roster that breaks a rule.

use crate::config::{Instance, WORK_WINDOW_DAYS};
use crate::models::{EmployeeId, RuleKind, RuleViolation, ShiftKind};

use super::indexer::Assignment;

fn violation(
    rule: RuleKind,
    employee: Option<EmployeeId>,
    day: Option<usize>,
    shift: Option<ShiftKind>,
) -> RuleViolation {
    RuleViolation {
        rule,
        employee,
        day,
        shift,
    }
}

/// Checks the assignment against every hard constraint, returning the
/// first violation found.
pub(crate) fn validate(
    instance: &Instance,
    assignment: &Assignment,
) -> Result<(), RuleViolation> {
    let days = instance.horizon.day_count();
    let employees = instance.employee_count();

    // Exactly one employee per (day, shift).
    for day in 0..days {
        for shift in ShiftKind::ALL {
            let workers = (0..employees)
                .filter(|&employee| assignment.works(employee, day, shift))
                .count();
            if workers != 1 {
                return Err(violation(
                    RuleKind::Coverage,
                    None,
                    Some(day),
                    Some(shift),
                ));
            }
        }
    }

    // At most one shift per employee per day.
    for employee in 0..employees {
        for day in 0..days {
            if assignment.shifts_on_day(employee, day) > 1 {
                return Err(violation(
                    RuleKind::OneShiftPerDay,
                    Some(instance.employee_at(employee)),
                    Some(day),
                    None,
                ));
            }
        }
    }

    // Contractors only on declared slots.
    for contractor in 0..instance.num_contractors {
        let column = instance.num_salaried + contractor;
        for day in 0..days {
            for shift in ShiftKind::ALL {
                if assignment.works(column, day, shift)
                    && !instance.is_available(contractor, day, shift)
                {
                    return Err(violation(
                        RuleKind::ContractorAvailability,
                        Some(EmployeeId::Contractor(contractor)),
                        Some(day),
                        Some(shift),
                    ));
                }
            }
        }
    }

    // Holiday slots stay free.
    for salaried in 0..instance.num_salaried {
        for day in 0..days {
            for shift in ShiftKind::ALL {
                if assignment.works(salaried, day, shift)
                    && instance.is_holiday(salaried, day, shift)
                {
                    return Err(violation(
                        RuleKind::HolidayRespected,
                        Some(EmployeeId::Salaried(salaried)),
                        Some(day),
                        Some(shift),
                    ));
                }
            }
        }
    }

    // Overtime bookkeeping.
    for salaried in 0..instance.num_salaried {
        for day in 0..days {
            for shift in ShiftKind::ALL {
                if assignment.is_overtime(salaried, day, shift)
                    && !assignment.works(salaried, day, shift)
                {
                    return Err(violation(
                        RuleKind::OvertimeAccounting,
                        Some(EmployeeId::Salaried(salaried)),
                        Some(day),
                        Some(shift),
                    ));
                }
            }
        }
        let regular = assignment.regular_shifts[salaried];
        let overtime = assignment.overtime_shifts[salaried];
        let booked = regular + overtime;
        let worked = assignment.total_shifts(salaried);
        let marked = assignment.total_overtime_slots(salaried);
        if booked != worked
            || marked != overtime
            || regular > instance.max_regular_shifts[salaried]
            || overtime > instance.max_overtime
        {
            return Err(violation(
                RuleKind::OvertimeAccounting,
                Some(EmployeeId::Salaried(salaried)),
                None,
                None,
            ));
        }
    }

    // Consecutive-day cap over every window one day longer than the cap.
    let cap = instance.max_consecutive_days;
    if days > cap {
        for employee in 0..employees {
            for start in 0..(days - cap) {
                let worked: u32 = (start..=start + cap)
                    .map(|day| assignment.shifts_on_day(employee, day))
                    .sum();
                if worked > cap as u32 {
                    return Err(violation(
                        RuleKind::ConsecutiveDayCap,
                        Some(instance.employee_at(employee)),
                        Some(start),
                        None,
                    ));
                }
            }
        }
    }

    // Sliding 14-day work/rest window.
    if days >= WORK_WINDOW_DAYS {
        for employee in 0..employees {
            for start in 0..=(days - WORK_WINDOW_DAYS) {
                let worked: u32 = (start..start + WORK_WINDOW_DAYS)
                    .map(|day| assignment.shifts_on_day(employee, day))
                    .sum();
                if worked > instance.window_work_cap {
                    return Err(violation(
                        RuleKind::WorkRestWindow,
                        Some(instance.employee_at(employee)),
                        Some(start),
                        None,
                    ));
                }
            }
        }
    }

    // Never an afternoon followed by the next day's morning.
    for employee in 0..employees {
        for day in 0..days.saturating_sub(1) {
            if assignment.works(employee, day, ShiftKind::Afternoon)
                && assignment.works(employee, day + 1, ShiftKind::Morning)
            {
                return Err(violation(
                    RuleKind::AfternoonThenMorning,
                    Some(instance.employee_at(employee)),
                    Some(day + 1),
                    Some(ShiftKind::Morning),
                ));
            }
        }
    }

    // Minimum free weekends, counted from the assignment.
    let pairs = instance.horizon.weekend_pairs();
    if !pairs.is_empty() {
        for salaried in 0..instance.num_salaried {
            let free = pairs
                .iter()
                .filter(|pair| {
                    assignment.shifts_on_day(salaried, pair.saturday) == 0
                        && assignment.shifts_on_day(salaried, pair.sunday) == 0
                })
                .count() as u32;
            if free < instance.min_free_weekends {
                return Err(violation(
                    RuleKind::FreeWeekendMinimum,
                    Some(EmployeeId::Salaried(salaried)),
                    None,
                    None,
                ));
            }
        }
    }

    Ok(())
}
