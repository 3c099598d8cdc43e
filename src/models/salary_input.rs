//! Salary input model.
//!
//! This module defines the [`SalaryInput`] struct, the plain data value a
//! caller hands to the engine for one pay period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted amount (salary, allowance, credit or income).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Largest accepted number of hours in any hour field.
pub const MAX_HOURS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Worked-time and pay inputs for a single pay period.
///
/// Amounts are in whole currency units; hours may be fractional
/// (e.g. `8.1 × 20 = 162.0`).
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::new(500_000, 0), Decimal::new(176, 0));
/// assert_eq!(input.overtime_hours, Decimal::ZERO);
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Base monthly salary.
    pub base_salary: Decimal,
    /// Standard hours for the period, the denominator of the hourly wage.
    pub standard_hours: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Shift or night hours worked.
    #[serde(default)]
    pub shift_hours: Decimal,
    /// Hours worked on public holidays.
    #[serde(default)]
    pub holiday_hours: Decimal,
    /// One-off allowances added to gross pay.
    #[serde(default)]
    pub other_allowances: Decimal,
    /// Family tax relief subtracted from the income tax.
    #[serde(default)]
    pub family_tax_credit: Option<Decimal>,
    /// Additional non-taxed income added to net pay.
    #[serde(default)]
    pub non_taxed_income: Option<Decimal>,
}

impl SalaryInput {
    /// Creates an input with only a base salary and standard hours set.
    pub fn new(base_salary: Decimal, standard_hours: Decimal) -> Self {
        Self {
            base_salary,
            standard_hours,
            overtime_hours: Decimal::ZERO,
            shift_hours: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            other_allowances: Decimal::ZERO,
            family_tax_credit: None,
            non_taxed_income: None,
        }
    }

    /// Returns the family tax credit, or zero when none is claimed.
    pub fn family_tax_credit(&self) -> Decimal {
        self.family_tax_credit.unwrap_or(Decimal::ZERO)
    }

    /// Returns the non-taxed income, or zero when there is none.
    pub fn non_taxed_income(&self) -> Decimal {
        self.non_taxed_income.unwrap_or(Decimal::ZERO)
    }

    /// Checks every field before any computation starts.
    ///
    /// Fails with [`EngineError::InvalidInput`] when `standard_hours` is not
    /// strictly positive, any amount or hour field is negative, an amount
    /// exceeds [`MAX_AMOUNT`], an hour field exceeds [`MAX_HOURS`], or
    /// `base_salary` is not a whole currency amount.
    pub fn validate(&self) -> EngineResult<()> {
        if self.standard_hours <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "standard_hours",
                format!("must be greater than zero (got {})", self.standard_hours),
            ));
        }

        let fields = [
            ("base_salary", self.base_salary),
            ("overtime_hours", self.overtime_hours),
            ("shift_hours", self.shift_hours),
            ("holiday_hours", self.holiday_hours),
            ("other_allowances", self.other_allowances),
            ("family_tax_credit", self.family_tax_credit()),
            ("non_taxed_income", self.non_taxed_income()),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    field,
                    format!("cannot be negative (got {})", value),
                ));
            }
        }

        let limits = [
            ("base_salary", self.base_salary, MAX_AMOUNT),
            ("standard_hours", self.standard_hours, MAX_HOURS),
            ("overtime_hours", self.overtime_hours, MAX_HOURS),
            ("shift_hours", self.shift_hours, MAX_HOURS),
            ("holiday_hours", self.holiday_hours, MAX_HOURS),
            ("other_allowances", self.other_allowances, MAX_AMOUNT),
            ("family_tax_credit", self.family_tax_credit(), MAX_AMOUNT),
            ("non_taxed_income", self.non_taxed_income(), MAX_AMOUNT),
        ];

        for (field, value, limit) in limits {
            if value > limit {
                return Err(EngineError::invalid_input(
                    field,
                    format!("cannot exceed {} (got {})", limit, value),
                ));
            }
        }

        if !self.base_salary.fract().is_zero() {
            return Err(EngineError::invalid_input(
                "base_salary",
                format!("must be a whole currency amount (got {})", self.base_salary),
            ));
        }

        Ok(())
    }
}
