//! Core data models for the payroll engine.
//!
//! This module contains all the plain data values that flow into and out of
//! the calculation engine.

mod calculation_result;
mod gross_breakdown;
mod salary_input;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionKind, DeductionLine, PayrollCalculation,
    SalaryResult, TaxableBaseStep,
};
pub use gross_breakdown::GrossBreakdown;
pub use salary_input::{MAX_AMOUNT, MAX_HOURS, SalaryInput};
