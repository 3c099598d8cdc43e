//! Employer-side cost.
//!
//! The employer pays a levy on gross pay on top of the salary. It never
//! affects the employee's net pay.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::AuditStep;

use super::round_currency;

/// The result of the employer cost calculation.
#[derive(Debug, Clone)]
pub struct EmployerCostResult {
    /// The employer contribution on gross.
    pub contribution: Decimal,
    /// Gross plus the contribution.
    pub total_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employer contribution and total employer cost.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_employer_cost;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/hu").unwrap();
/// let rates = loader.get_rate_table("hu-2024-a").unwrap();
///
/// let result = calculate_employer_cost(Decimal::from(500_000), rates, 1);
/// assert_eq!(result.contribution, Decimal::from(65_000));
/// assert_eq!(result.total_cost, Decimal::from(565_000));
/// ```
pub fn calculate_employer_cost(
    gross: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> EmployerCostResult {
    let rate = rates.employer_contribution_rate;
    let contribution = round_currency(gross * rate);
    let total_cost = gross + contribution;

    EmployerCostResult {
        contribution,
        total_cost,
        audit_step: AuditStep {
            step_number,
            rule_id: "employer_cost".to_string(),
            rule_name: "Employer Contribution".to_string(),
            input: serde_json::json!({
                "gross": gross.to_string(),
                "rate": rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "contribution": contribution.to_string(),
                "total_cost": total_cost.to_string()
            }),
            reasoning: format!(
                "{} x {} = {}; {} + {} = {}",
                gross,
                rate.normalize(),
                contribution,
                gross,
                contribution,
                total_cost
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, rate_table_a};

    #[test]
    fn test_employer_cost_thirteen_percent() {
        let result = calculate_employer_cost(dec("800000"), &rate_table_a(), 1);

        assert_eq!(result.contribution, dec("104000"));
        assert_eq!(result.total_cost, dec("904000"));
    }

    #[test]
    fn test_employer_contribution_rounds_half_up() {
        // 589506 x 0.13 = 76635.78
        let result = calculate_employer_cost(dec("589506"), &rate_table_a(), 1);
        assert_eq!(result.contribution, dec("76636"));
        assert_eq!(result.total_cost, dec("666142"));
    }

    #[test]
    fn test_zero_gross() {
        let result = calculate_employer_cost(Decimal::ZERO, &rate_table_a(), 1);
        assert_eq!(result.total_cost, Decimal::ZERO);
        assert_eq!(result.audit_step.rule_id, "employer_cost");
    }
}
