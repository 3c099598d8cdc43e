//! Shift and holiday premium pay.
//!
//! Shift (night) hours earn the shift differential on top of the base
//! salary; hours worked on a public holiday are paid at the holiday
//! multiplier. Both are rounded per component.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::AuditStep;

use super::round_currency;

/// The result of a premium pay calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct PremiumPayResult {
    /// The rounded premium amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn premium_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    hours: Decimal,
    hourly_wage: Decimal,
    multiplier: Decimal,
    amount: Decimal,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "hourly_wage": hourly_wage.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "{} hours x {} x {} = {}",
            hours.normalize(),
            hourly_wage.round_dp(2),
            multiplier.normalize(),
            amount
        ),
    }
}

/// Calculates the shift differential for shift/night hours.
///
/// `shift_hours × hourly_wage × shift_differential_rate`, rounded.
pub fn calculate_shift_pay(
    shift_hours: Decimal,
    hourly_wage: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> PremiumPayResult {
    let multiplier = rates.shift_differential_rate;
    let amount = round_currency(shift_hours * hourly_wage * multiplier);

    PremiumPayResult {
        amount,
        audit_step: premium_step(
            step_number,
            "shift_pay",
            "Shift Differential",
            shift_hours,
            hourly_wage,
            multiplier,
            amount,
        ),
    }
}

/// Calculates pay for hours worked on public holidays.
///
/// `holiday_hours × hourly_wage × holiday_multiplier`, rounded.
pub fn calculate_holiday_pay(
    holiday_hours: Decimal,
    hourly_wage: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> PremiumPayResult {
    let multiplier = rates.holiday_multiplier;
    let amount = round_currency(holiday_hours * hourly_wage * multiplier);

    PremiumPayResult {
        amount,
        audit_step: premium_step(
            step_number,
            "holiday_pay",
            "Public Holiday Pay",
            holiday_hours,
            hourly_wage,
            multiplier,
            amount,
        ),
    }
}
