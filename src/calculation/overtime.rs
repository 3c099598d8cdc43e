//! Overtime pay calculation.
//!
//! Overtime is paid in two parts, each rounded on its own:
//! - **Base portion:** hours × hourly wage × `overtime_base_multiplier`
//! - **Shift differential:** hours × hourly wage × `shift_differential_rate`,
//!   only when the rate table sets `overtime_includes_shift_differential`
//!
//! With a 1.0 multiplier and a 0.45 differential this pays 145% of the plain
//! hourly wage. Tables that pay overtime at a single 150% or 125% rate turn
//! the differential off.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::AuditStep;

use super::round_currency;

/// The result of the overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimePayResult {
    /// The base portion of overtime pay.
    pub base_pay: Decimal,
    /// The shift differential earned on overtime hours.
    pub shift_differential: Decimal,
    /// Audit steps for the base portion and the differential.
    pub audit_steps: Vec<AuditStep>,
}

impl OvertimePayResult {
    /// Combined overtime pay.
    pub fn total(&self) -> Decimal {
        self.base_pay + self.shift_differential
    }
}

/// Calculates overtime pay.
///
/// # Arguments
///
/// * `overtime_hours` - Overtime hours worked in the period
/// * `hourly_wage` - The unrounded hourly wage
/// * `rates` - The rate table supplying the multipliers
/// * `step_number_start` - The step number of the first audit step
///
/// # Returns
///
/// Always returns two audit steps, one per portion, so step numbering does
/// not depend on the hours worked.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_overtime_pay, derive_hourly_wage};
/// use payroll_engine::config::RateTable;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rates = RateTable {
///     version: "example".to_string(),
///     description: String::new(),
///     effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     overtime_base_multiplier: Decimal::ONE,
///     shift_differential_rate: Decimal::new(45, 2),
///     overtime_includes_shift_differential: true,
///     holiday_multiplier: Decimal::TWO,
///     health_insurance_rate: Decimal::new(185, 3),
///     health_insurance_cap: Decimal::new(2_000_000, 0),
///     pension_rate: Decimal::new(10, 2),
///     pension_threshold: Decimal::new(500_000, 0),
///     voluntary_pension_rate: Decimal::new(2, 2),
///     union_due_rate: Decimal::new(5, 3),
///     union_due_reduces_tax_base: false,
///     income_tax_rate: Decimal::new(15, 2),
///     general_tax_credit: Decimal::new(10_000, 0),
///     employer_contribution_rate: Decimal::new(13, 2),
/// };
///
/// let wage = derive_hourly_wage(Decimal::from(500_000), Decimal::from(162), 1)
///     .unwrap()
///     .hourly_wage;
/// let result = calculate_overtime_pay(Decimal::from(20), wage, &rates, 2);
///
/// assert_eq!(result.base_pay, Decimal::from(61_728));
/// assert_eq!(result.shift_differential, Decimal::from(27_778));
/// assert_eq!(result.total(), Decimal::from(89_506));
/// ```
pub fn calculate_overtime_pay(
    overtime_hours: Decimal,
    hourly_wage: Decimal,
    rates: &RateTable,
    step_number_start: u32,
) -> OvertimePayResult {
    let multiplier = rates.overtime_base_multiplier;
    let base_pay = round_currency(overtime_hours * hourly_wage * multiplier);

    let base_step = AuditStep {
        step_number: step_number_start,
        rule_id: "overtime_base_pay".to_string(),
        rule_name: "Overtime Base Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_wage": hourly_wage.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": base_pay.to_string()
        }),
        reasoning: format!(
            "{} hours x {} x {} = {}",
            overtime_hours.normalize(),
            hourly_wage.round_dp(2),
            multiplier.normalize(),
            base_pay
        ),
    };

    let differential_rate = rates.shift_differential_rate;
    let (shift_differential, differential_step) = if rates.overtime_includes_shift_differential
    {
        let amount = round_currency(overtime_hours * hourly_wage * differential_rate);
        let step = AuditStep {
            step_number: step_number_start + 1,
            rule_id: "overtime_shift_differential".to_string(),
            rule_name: "Overtime Shift Differential".to_string(),
            input: serde_json::json!({
                "overtime_hours": overtime_hours.normalize().to_string(),
                "hourly_wage": hourly_wage.normalize().to_string(),
                "shift_differential_rate": differential_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.to_string(),
                "differential_applied": true
            }),
            reasoning: format!(
                "{} hours x {} x {} = {}",
                overtime_hours.normalize(),
                hourly_wage.round_dp(2),
                differential_rate.normalize(),
                amount
            ),
        };
        (amount, step)
    } else {
        let step = AuditStep {
            step_number: step_number_start + 1,
            rule_id: "overtime_shift_differential".to_string(),
            rule_name: "Overtime Shift Differential".to_string(),
            input: serde_json::json!({
                "overtime_hours": overtime_hours.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": "0",
                "differential_applied": false
            }),
            reasoning: format!(
                "No shift differential on overtime under rate table '{}'",
                rates.version
            ),
        };
        (Decimal::ZERO, step)
    };

    OvertimePayResult {
        base_pay,
        shift_differential,
        audit_steps: vec![base_step, differential_step],
    }
}
