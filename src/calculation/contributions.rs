//! Statutory employee contributions.
//!
//! ## Rate Structure
//!
//! - **Health insurance:** `rate × min(gross, cap)`; stops growing at the cap
//! - **Pension:** `rate × max(0, gross − threshold)`; zero up to the threshold
//!
//! Each contribution is rounded half-up to a whole currency unit.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{AuditStep, DeductionKind, DeductionLine};

use super::round_currency;

/// The result of a single contribution stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionResult {
    /// The deduction line produced by the stage.
    pub line: DeductionLine,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

impl ContributionResult {
    /// The rounded amount withheld.
    pub fn amount(&self) -> Decimal {
        self.line.amount
    }
}

/// Calculates the employee health insurance contribution.
///
/// The contribution base is gross pay limited to `health_insurance_cap`.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_health_insurance;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
///
/// let result = calculate_health_insurance(Decimal::from(500_000), rates, 1);
/// assert_eq!(result.amount(), Decimal::from(92_500));
/// ```
pub fn calculate_health_insurance(
    gross: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> ContributionResult {
    let rate = rates.health_insurance_rate;
    let cap = rates.health_insurance_cap;
    let capped = gross > cap;
    let base = gross.min(cap);
    let amount = round_currency(base * rate);

    let reasoning = if capped {
        format!(
            "Gross {} exceeds cap {}: {} x {} = {}",
            gross, cap, cap, rate.normalize(), amount
        )
    } else {
        format!("{} x {} = {}", base, rate.normalize(), amount)
    };

    ContributionResult {
        line: DeductionLine {
            kind: DeductionKind::HealthInsurance,
            base,
            rate,
            amount,
        },
        audit_step: AuditStep {
            step_number,
            rule_id: "health_insurance".to_string(),
            rule_name: "Health Insurance Contribution".to_string(),
            input: serde_json::json!({
                "gross": gross.to_string(),
                "rate": rate.normalize().to_string(),
                "cap": cap.to_string()
            }),
            output: serde_json::json!({
                "base": base.to_string(),
                "amount": amount.to_string(),
                "capped": capped
            }),
            reasoning,
        },
    }
}

/// Calculates the employee pension contribution.
///
/// Only the part of gross pay above `pension_threshold` is subject to the
/// contribution.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_pension;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
///
/// assert_eq!(calculate_pension(Decimal::from(500_000), rates, 1).amount(), Decimal::ZERO);
/// assert_eq!(calculate_pension(Decimal::from(800_000), rates, 1).amount(), Decimal::from(30_000));
/// ```
pub fn calculate_pension(gross: Decimal, rates: &RateTable, step_number: u32) -> ContributionResult {
    let rate = rates.pension_rate;
    let threshold = rates.pension_threshold;
    let base = (gross - threshold).max(Decimal::ZERO);
    let amount = round_currency(base * rate);

    let reasoning = if base.is_zero() {
        format!(
            "Gross {} does not exceed threshold {}: no pension contribution",
            gross, threshold
        )
    } else {
        format!(
            "({} - {}) x {} = {}",
            gross,
            threshold,
            rate.normalize(),
            amount
        )
    };

    ContributionResult {
        line: DeductionLine {
            kind: DeductionKind::Pension,
            base,
            rate,
            amount,
        },
        audit_step: AuditStep {
            step_number,
            rule_id: "pension".to_string(),
            rule_name: "Pension Contribution".to_string(),
            input: serde_json::json!({
                "gross": gross.to_string(),
                "rate": rate.normalize().to_string(),
                "threshold": threshold.to_string()
            }),
            output: serde_json::json!({
                "base": base.to_string(),
                "amount": amount.to_string()
            }),
            reasoning,
        },
    }
}
