//! Calculation logic for the payroll engine.
//!
//! This module contains the gross pay rules (hourly wage, overtime, shift and
//! holiday premiums), the ordered deduction pipeline (health insurance,
//! pension, voluntary deductions, income tax with credits), the employer
//! cost, and [`calculate_salary`], which runs them end to end.

mod contributions;
mod deductions;
mod employer_cost;
mod gross_pay;
mod hourly_wage;
mod income_tax;
mod overtime;
mod payroll;
mod premium_pay;
mod rounding;
mod voluntary;

#[cfg(test)]
pub(crate) mod test_support;

pub use contributions::{ContributionResult, calculate_health_insurance, calculate_pension};
pub use deductions::{
    WARNING_HEALTH_INSURANCE_CAPPED, WARNING_NEGATIVE_NET_PAY, WARNING_TAX_CREDIT_EXCEEDS_TAX,
    apply_deductions,
};
pub use employer_cost::{EmployerCostResult, calculate_employer_cost};
pub use gross_pay::assemble_gross;
pub use hourly_wage::{HourlyWageResult, derive_hourly_wage};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use overtime::{OvertimePayResult, calculate_overtime_pay};
pub use payroll::calculate_salary;
pub use premium_pay::{PremiumPayResult, calculate_holiday_pay, calculate_shift_pay};
pub use rounding::round_currency;
pub use voluntary::{calculate_union_due, calculate_voluntary_pension};
