//! Gross pay breakdown model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;

/// The components of gross pay for one period.
///
/// Every amount is rounded to a whole currency unit on its own, and
/// `total` is exactly the sum of the rounded components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossBreakdown {
    /// Base salary divided by standard hours, kept at full precision.
    pub hourly_wage: Decimal,
    /// The base salary.
    pub regular_pay: Decimal,
    /// Overtime hours at the overtime base multiplier.
    pub overtime_base_pay: Decimal,
    /// Shift differential earned on overtime hours.
    pub overtime_shift_differential: Decimal,
    /// Shift differential earned on shift/night hours.
    pub shift_pay: Decimal,
    /// Pay for hours worked on public holidays.
    pub holiday_pay: Decimal,
    /// One-off allowances.
    pub other_allowances: Decimal,
    /// Sum of all components.
    pub total: Decimal,
    /// Audit steps recording each component.
    pub audit_steps: Vec<AuditStep>,
}

impl GrossBreakdown {
    /// Total overtime pay, base portion plus shift differential.
    pub fn overtime_pay(&self) -> Decimal {
        self.overtime_base_pay + self.overtime_shift_differential
    }

    /// Sum of the individual components, which always equals `total`.
    pub fn component_sum(&self) -> Decimal {
        self.regular_pay
            + self.overtime_base_pay
            + self.overtime_shift_differential
            + self.shift_pay
            + self.holiday_pay
            + self.other_allowances
    }
}
