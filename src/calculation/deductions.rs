//! The deduction pipeline.
//!
//! ## Stage Order
//!
//! 1. Health insurance on `min(gross, cap)`
//! 2. Pension on `max(0, gross - threshold)`
//! 3. Voluntary pension on gross
//! 4. Taxable base = gross - 1 - 2 - 3
//! 5. Union due on gross, subtracted from the taxable base only when the
//!    rate table says so
//! 6. Income tax on the taxable base
//! 7. Tax credits, floored at zero tax
//! 8. Net = gross - 1 - 2 - 3 - 5 - 7 + non-taxed income
//! 9. Employer contribution and total cost
//!
//! The order is fixed. Every stage rounds its own amount, so net pay is the
//! sum of independently rounded stages.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, SalaryInput, SalaryResult, TaxableBaseStep};

use super::{
    calculate_employer_cost, calculate_health_insurance, calculate_income_tax,
    calculate_pension, calculate_union_due, calculate_voluntary_pension,
};

/// Warning code raised when gross pay exceeds the health insurance cap.
pub const WARNING_HEALTH_INSURANCE_CAPPED: &str = "HEALTH_INSURANCE_CAPPED";
/// Warning code raised when credits exceed the computed tax.
pub const WARNING_TAX_CREDIT_EXCEEDS_TAX: &str = "TAX_CREDIT_EXCEEDS_TAX";
/// Warning code raised when deductions exceed gross pay.
pub const WARNING_NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// Applies the ordered deduction chain to a gross amount.
///
/// # Arguments
///
/// * `gross` - Gross pay for the period (normally `GrossBreakdown::total`)
/// * `input` - The salary input, used for the family tax credit and
///   non-taxed income
/// * `rates` - The rate table
///
/// # Returns
///
/// Returns the [`SalaryResult`], or:
/// - `InvalidRateTable` if any rate, cap or threshold is negative
/// - `InvalidInput` if gross, the family credit or the non-taxed income is
///   negative
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::apply_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{DeductionKind, SalaryInput};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
/// let input = SalaryInput::new(Decimal::from(500_000), Decimal::from(176));
///
/// let result = apply_deductions(Decimal::from(500_000), &input, rates).unwrap();
/// assert_eq!(result.deduction(DeductionKind::HealthInsurance), Decimal::from(92_500));
/// assert_eq!(result.net_pay, Decimal::from(345_375));
/// ```
pub fn apply_deductions(
    gross: Decimal,
    input: &SalaryInput,
    rates: &RateTable,
) -> EngineResult<SalaryResult> {
    apply_deductions_from_step(gross, input, rates, 1)
}

/// Runs the pipeline with audit steps numbered from `first_step`.
pub(crate) fn apply_deductions_from_step(
    gross: Decimal,
    input: &SalaryInput,
    rates: &RateTable,
    first_step: u32,
) -> EngineResult<SalaryResult> {
    rates.validate()?;

    if gross < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "gross",
            format!("cannot be negative (got {})", gross),
        ));
    }

    let family_tax_credit = input.family_tax_credit();
    let non_taxed_additions = input.non_taxed_income();
    if family_tax_credit < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "family_tax_credit",
            format!("cannot be negative (got {})", family_tax_credit),
        ));
    }
    if non_taxed_additions < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "non_taxed_income",
            format!("cannot be negative (got {})", non_taxed_additions),
        ));
    }

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number = first_step;

    let mut taxable_base = gross;
    let mut taxable_base_trace = vec![TaxableBaseStep {
        label: "gross".to_string(),
        reduction: Decimal::ZERO,
        taxable_base,
    }];

    // Stage 1
    let health = calculate_health_insurance(gross, rates, step_number);
    step_number += 1;
    if gross > rates.health_insurance_cap {
        warnings.push(AuditWarning {
            code: WARNING_HEALTH_INSURANCE_CAPPED.to_string(),
            message: format!(
                "Gross {} exceeds the health insurance cap {}",
                gross, rates.health_insurance_cap
            ),
            severity: "low".to_string(),
        });
    }

    // Stage 2
    let pension = calculate_pension(gross, rates, step_number);
    step_number += 1;

    // Stage 3
    let voluntary = calculate_voluntary_pension(gross, rates, step_number);
    step_number += 1;

    // Stage 4
    for stage in [&health, &pension, &voluntary] {
        taxable_base -= stage.amount();
        taxable_base_trace.push(TaxableBaseStep {
            label: stage.line.kind.as_str().to_string(),
            reduction: stage.amount(),
            taxable_base,
        });
    }

    // Stage 5
    let union_due = calculate_union_due(gross, rates, step_number);
    step_number += 1;
    if rates.union_due_reduces_tax_base {
        taxable_base -= union_due.amount();
        taxable_base_trace.push(TaxableBaseStep {
            label: union_due.line.kind.as_str().to_string(),
            reduction: union_due.amount(),
            taxable_base,
        });
    }

    // Stages 6 and 7
    let income_tax = calculate_income_tax(taxable_base, family_tax_credit, rates, step_number);
    step_number += income_tax.audit_steps.len() as u32;
    if income_tax.unused_credit > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: WARNING_TAX_CREDIT_EXCEEDS_TAX.to_string(),
            message: format!(
                "Tax credits exceed the computed tax {}; {} of credit is unused",
                income_tax.tax_before_credits, income_tax.unused_credit
            ),
            severity: "low".to_string(),
        });
    }

    // Stage 8
    let deductions = vec![
        health.line,
        pension.line,
        voluntary.line,
        union_due.line,
        income_tax.line.clone(),
    ];
    let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();
    let net_pay = gross - total_deductions + non_taxed_additions;

    audit_steps.push(health.audit_step);
    audit_steps.push(pension.audit_step);
    audit_steps.push(voluntary.audit_step);
    audit_steps.push(union_due.audit_step);
    audit_steps.extend(income_tax.audit_steps.iter().cloned());
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "total_deductions": total_deductions.to_string(),
            "non_taxed_additions": non_taxed_additions.to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "{} - {} + {} = {}",
            gross, total_deductions, non_taxed_additions, net_pay
        ),
    });
    step_number += 1;

    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: WARNING_NEGATIVE_NET_PAY.to_string(),
            message: format!("Deductions {} exceed pay; net is {}", total_deductions, net_pay),
            severity: "high".to_string(),
        });
    }

    // Stage 9
    let employer = calculate_employer_cost(gross, rates, step_number);
    audit_steps.push(employer.audit_step);

    Ok(SalaryResult {
        gross_total: gross,
        deductions,
        taxable_base_trace,
        income_tax_before_credits: income_tax.tax_before_credits,
        tax_credits_applied: income_tax.credits_applied,
        non_taxed_additions,
        net_pay,
        employer_contribution: employer.contribution,
        employer_total_cost: employer.total_cost,
        audit_steps,
        warnings,
    })
}
