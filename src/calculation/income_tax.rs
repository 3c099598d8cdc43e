//! Personal income tax.
//!
//! Tax is computed on the taxable base and rounded, then the general tax
//! credit and any family tax credit are subtracted. The result never goes
//! below zero; unused credit is lost, not carried into other deductions.
//! A negative taxable base is taxed as zero.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{AuditStep, DeductionKind, DeductionLine};

use super::round_currency;

/// The result of the income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxResult {
    /// Tax on the taxable base before credits.
    pub tax_before_credits: Decimal,
    /// The part of the available credits actually used.
    pub credits_applied: Decimal,
    /// Credit that exceeded the tax and was not used.
    pub unused_credit: Decimal,
    /// The income tax deduction line (tax after credits).
    pub line: DeductionLine,
    /// Audit steps for the tax and for the credits.
    pub audit_steps: Vec<AuditStep>,
}

impl IncomeTaxResult {
    /// The tax withheld after credits.
    pub fn tax_due(&self) -> Decimal {
        self.line.amount
    }
}

/// Calculates income tax on a taxable base.
///
/// # Arguments
///
/// * `taxable_base` - Gross minus the deductions that reduce the tax base
/// * `family_tax_credit` - Family tax relief claimed for the period
/// * `rates` - The rate table supplying the rate and the general credit
/// * `step_number_start` - The step number of the first audit step
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
///
/// let result = calculate_income_tax(Decimal::from(397_500), Decimal::ZERO, rates, 1);
/// assert_eq!(result.tax_before_credits, Decimal::from(59_625));
/// assert_eq!(result.tax_due(), Decimal::from(49_625));
/// ```
pub fn calculate_income_tax(
    taxable_base: Decimal,
    family_tax_credit: Decimal,
    rates: &RateTable,
    step_number_start: u32,
) -> IncomeTaxResult {
    let rate = rates.income_tax_rate;
    let tax_before_credits = round_currency(taxable_base.max(Decimal::ZERO) * rate);

    let tax_step = AuditStep {
        step_number: step_number_start,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax_before_credits": tax_before_credits.to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            taxable_base,
            rate.normalize(),
            tax_before_credits
        ),
    };

    let general_credit = rates.general_tax_credit;
    let available_credit = general_credit + family_tax_credit;
    let tax_due = (tax_before_credits - available_credit).max(Decimal::ZERO);
    let credits_applied = tax_before_credits - tax_due;
    let unused_credit = available_credit - credits_applied;

    let credit_step = AuditStep {
        step_number: step_number_start + 1,
        rule_id: "tax_credits".to_string(),
        rule_name: "Tax Credits".to_string(),
        input: serde_json::json!({
            "tax_before_credits": tax_before_credits.to_string(),
            "general_tax_credit": general_credit.to_string(),
            "family_tax_credit": family_tax_credit.to_string()
        }),
        output: serde_json::json!({
            "credits_applied": credits_applied.to_string(),
            "unused_credit": unused_credit.to_string(),
            "tax_due": tax_due.to_string()
        }),
        reasoning: format!(
            "max(0, {} - {} - {}) = {}",
            tax_before_credits, general_credit, family_tax_credit, tax_due
        ),
    };

    IncomeTaxResult {
        tax_before_credits,
        credits_applied,
        unused_credit,
        line: DeductionLine {
            kind: DeductionKind::IncomeTax,
            base: taxable_base,
            rate,
            amount: tax_due,
        },
        audit_steps: vec![tax_step, credit_step],
    }
}
