//! Hourly wage derivation.
//!
//! The hourly wage is derived once from the base salary and the period's
//! standard hours and reused for every hour-based pay component. It is never
//! rounded on its own; only the component amounts built from it are.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MAX_AMOUNT};

/// The result of deriving the hourly wage, including the audit step.
#[derive(Debug, Clone)]
pub struct HourlyWageResult {
    /// Base salary divided by standard hours, at full precision.
    pub hourly_wage: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives the hourly wage from a monthly base salary.
///
/// # Arguments
///
/// * `base_salary` - The monthly base salary
/// * `standard_hours` - The standard hours of the period (174, 176 and
///   workdays × 8.1 are all in use, so the caller supplies it)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns the wage and an audit step, or `InvalidInput` if `standard_hours`
/// is not strictly positive or so small that the wage would exceed
/// [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::derive_hourly_wage;
/// use rust_decimal::Decimal;
///
/// let result = derive_hourly_wage(Decimal::from(500_000), Decimal::from(162), 1).unwrap();
/// assert_eq!(result.hourly_wage.round_dp(2), Decimal::new(308642, 2));
/// ```
pub fn derive_hourly_wage(
    base_salary: Decimal,
    standard_hours: Decimal,
    step_number: u32,
) -> EngineResult<HourlyWageResult> {
    if standard_hours <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "standard_hours",
            format!("must be greater than zero (got {})", standard_hours),
        ));
    }

    let hourly_wage = base_salary
        .checked_div(standard_hours)
        .filter(|wage| *wage <= MAX_AMOUNT)
        .ok_or_else(|| {
            EngineError::invalid_input(
                "standard_hours",
                format!(
                    "too small for a base salary of {} (got {})",
                    base_salary, standard_hours
                ),
            )
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_wage".to_string(),
        rule_name: "Hourly Wage".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "standard_hours": standard_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_wage": hourly_wage.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} hours = {} per hour (not rounded)",
            base_salary.normalize(),
            standard_hours.normalize(),
            hourly_wage.round_dp(2)
        ),
    };

    Ok(HourlyWageResult {
        hourly_wage,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_division() {
        let result = derive_hourly_wage(dec("400000"), dec("160"), 1).unwrap();
        assert_eq!(result.hourly_wage, dec("2500"));
    }

    #[test]
    fn test_wage_is_not_rounded() {
        let result = derive_hourly_wage(dec("500000"), dec("162"), 1).unwrap();
        assert_eq!(result.hourly_wage.round_dp(2), dec("3086.42"));
        assert!(result.hourly_wage.scale() > 2);
    }

    #[test]
    fn test_fractional_standard_hours() {
        let result = derive_hourly_wage(dec("405000"), dec("162.0"), 1).unwrap();
        assert_eq!(result.hourly_wage, dec("2500"));
    }

    #[test]
    fn test_zero_standard_hours_returns_error() {
        let result = derive_hourly_wage(dec("500000"), Decimal::ZERO, 1);

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "standard_hours"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_tiny_standard_hours_returns_error_instead_of_overflowing() {
        let result = derive_hourly_wage(
            dec("10000000000000000000000000000"),
            dec("0.0000000000000000001"),
            1,
        );

        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "standard_hours");
                assert!(message.contains("too small"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_wage_above_amount_limit_returns_error() {
        let result = derive_hourly_wage(dec("1000000000000"), dec("0.5"), 1);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));

        let result = derive_hourly_wage(dec("1000000000000"), dec("1"), 1).unwrap();
        assert_eq!(result.hourly_wage, dec("1000000000000"));
    }

    #[test]
    fn test_audit_step_records_inputs() {
        let result = derive_hourly_wage(dec("500000"), dec("176"), 3).unwrap();

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "hourly_wage");
        assert_eq!(
            result.audit_step.input["standard_hours"].as_str().unwrap(),
            "176"
        );
        assert!(result.audit_step.reasoning.contains("2840.91"));
    }
}
