//! Gross pay assembly.
//!
//! Turns the worked-time inputs of a [`SalaryInput`] into a
//! [`GrossBreakdown`]. Every hour-based component is built from the same
//! unrounded hourly wage and rounded on its own; the total is the sum of the
//! rounded components, so the breakdown never leaves a residual.

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{AuditStep, GrossBreakdown, SalaryInput};

use super::{
    calculate_holiday_pay, calculate_overtime_pay, calculate_shift_pay, derive_hourly_wage,
    round_currency,
};

/// Assembles gross pay from worked-time inputs.
///
/// # Arguments
///
/// * `input` - The salary input for the period
/// * `rates` - The rate table supplying the multipliers
///
/// # Returns
///
/// Returns the breakdown with seven audit steps (hourly wage, regular pay,
/// overtime base, overtime differential, shift pay, holiday pay, total), or:
/// - `InvalidInput` if `standard_hours <= 0` or any field is negative
/// - `InvalidRateTable` if the rate table is malformed
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::assemble_gross;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
///
/// let mut input = SalaryInput::new(Decimal::from(500_000), Decimal::from(162));
/// input.overtime_hours = Decimal::from(20);
///
/// let gross = assemble_gross(&input, rates).unwrap();
/// assert_eq!(gross.overtime_pay(), Decimal::from(89_506));
/// assert_eq!(gross.total, Decimal::from(589_506));
/// ```
pub fn assemble_gross(input: &SalaryInput, rates: &RateTable) -> EngineResult<GrossBreakdown> {
    input.validate()?;
    rates.validate()?;

    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    let wage_result = derive_hourly_wage(input.base_salary, input.standard_hours, step_number)?;
    let hourly_wage = wage_result.hourly_wage;
    audit_steps.push(wage_result.audit_step);
    step_number += 1;

    // Regular pay is the salary itself, not hours x wage, to avoid drift.
    let regular_pay = round_currency(input.base_salary);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "regular_pay".to_string(),
        rule_name: "Regular Pay".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": regular_pay.to_string()
        }),
        reasoning: format!("Base salary paid as regular pay: {}", regular_pay),
    });
    step_number += 1;

    let overtime = calculate_overtime_pay(input.overtime_hours, hourly_wage, rates, step_number);
    step_number += overtime.audit_steps.len() as u32;
    audit_steps.extend(overtime.audit_steps);

    let shift = calculate_shift_pay(input.shift_hours, hourly_wage, rates, step_number);
    audit_steps.push(shift.audit_step);
    step_number += 1;

    let holiday = calculate_holiday_pay(input.holiday_hours, hourly_wage, rates, step_number);
    audit_steps.push(holiday.audit_step);
    step_number += 1;

    let other_allowances = round_currency(input.other_allowances);

    let total = regular_pay
        + overtime.base_pay
        + overtime.shift_differential
        + shift.amount
        + holiday.amount
        + other_allowances;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_total".to_string(),
        rule_name: "Gross Total".to_string(),
        input: serde_json::json!({
            "regular_pay": regular_pay.to_string(),
            "overtime_base_pay": overtime.base_pay.to_string(),
            "overtime_shift_differential": overtime.shift_differential.to_string(),
            "shift_pay": shift.amount.to_string(),
            "holiday_pay": holiday.amount.to_string(),
            "other_allowances": other_allowances.to_string()
        }),
        output: serde_json::json!({
            "total": total.to_string()
        }),
        reasoning: format!(
            "{} + {} + {} + {} + {} + {} = {}",
            regular_pay,
            overtime.base_pay,
            overtime.shift_differential,
            shift.amount,
            holiday.amount,
            other_allowances,
            total
        ),
    });

    Ok(GrossBreakdown {
        hourly_wage,
        regular_pay,
        overtime_base_pay: overtime.base_pay,
        overtime_shift_differential: overtime.shift_differential,
        shift_pay: shift.amount,
        holiday_pay: holiday.amount,
        other_allowances,
        total,
        audit_steps,
    })
}
