//! End-to-end gross-to-net calculation.

use tracing::debug;

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{AuditTrace, PayrollCalculation, SalaryInput};

use super::assemble_gross;
use super::deductions::apply_deductions_from_step;

/// Calculates gross pay, deductions, net pay and employer cost for one
/// pay period.
///
/// The rate table is validated before the input, so a malformed table is
/// reported even when the input is also invalid. Audit steps of the gross
/// breakdown and the deduction pipeline are numbered contiguously from 1.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_salary;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
/// let input = SalaryInput::new(Decimal::from(500_000), Decimal::from(176));
///
/// let calculation = calculate_salary(&input, rates).unwrap();
/// assert_eq!(calculation.salary.net_pay, Decimal::from(345_375));
/// ```
pub fn calculate_salary(input: &SalaryInput, rates: &RateTable) -> EngineResult<PayrollCalculation> {
    rates.validate()?;
    input.validate()?;

    let gross = assemble_gross(input, rates)?;
    let next_step = gross.audit_steps.len() as u32 + 1;
    let salary = apply_deductions_from_step(gross.total, input, rates, next_step)?;

    let mut steps = gross.audit_steps.clone();
    steps.extend(salary.audit_steps.iter().cloned());

    debug!(
        rate_table = %rates.version,
        gross = %gross.total,
        net = %salary.net_pay,
        warnings = salary.warnings.len(),
        "Salary calculated"
    );

    Ok(PayrollCalculation {
        rate_table_version: rates.version.clone(),
        audit_trace: AuditTrace {
            steps,
            warnings: salary.warnings.clone(),
        },
        gross,
        salary,
    })
}
