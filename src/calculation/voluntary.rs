//! Voluntary deductions: pension fund contribution and union due.
//!
//! Both are flat percentages of gross pay. The voluntary pension always
//! reduces the taxable base; the union due does so only when the rate table
//! sets `union_due_reduces_tax_base`.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{AuditStep, DeductionKind, DeductionLine};

use super::{ContributionResult, round_currency};

/// Calculates the voluntary pension fund contribution on full gross pay.
pub fn calculate_voluntary_pension(
    gross: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> ContributionResult {
    let rate = rates.voluntary_pension_rate;
    let amount = round_currency(gross * rate);

    ContributionResult {
        line: DeductionLine {
            kind: DeductionKind::VoluntaryPension,
            base: gross,
            rate,
            amount,
        },
        audit_step: AuditStep {
            step_number,
            rule_id: "voluntary_pension".to_string(),
            rule_name: "Voluntary Pension Contribution".to_string(),
            input: serde_json::json!({
                "gross": gross.to_string(),
                "rate": rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.to_string()
            }),
            reasoning: format!("{} x {} = {}", gross, rate.normalize(), amount),
        },
    }
}

/// Calculates the union due on full gross pay.
///
/// The due is always computed from gross, never from the taxable base.
pub fn calculate_union_due(gross: Decimal, rates: &RateTable, step_number: u32) -> ContributionResult {
    let rate = rates.union_due_rate;
    let amount = round_currency(gross * rate);
    let reduces_tax_base = rates.union_due_reduces_tax_base;

    let treatment = if reduces_tax_base {
        "subtracted from the taxable base"
    } else {
        "paid from net pay only"
    };

    ContributionResult {
        line: DeductionLine {
            kind: DeductionKind::UnionDue,
            base: gross,
            rate,
            amount,
        },
        audit_step: AuditStep {
            step_number,
            rule_id: "union_due".to_string(),
            rule_name: "Union Due".to_string(),
            input: serde_json::json!({
                "gross": gross.to_string(),
                "rate": rate.normalize().to_string(),
                "reduces_tax_base": reduces_tax_base
            }),
            output: serde_json::json!({
                "amount": amount.to_string()
            }),
            reasoning: format!(
                "{} x {} = {}, {}",
                gross,
                rate.normalize(),
                amount,
                treatment
            ),
        },
    }
}
