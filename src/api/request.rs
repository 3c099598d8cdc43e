//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::SalaryInput;

/// Request body for the `/calculate` endpoint.
///
/// The rate table is chosen by explicit `rate_table` version when given,
/// otherwise by the table in force on `pay_date`, otherwise by the table in
/// force today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Version of the rate table to use.
    #[serde(default)]
    pub rate_table: Option<String>,
    /// The date the salary is paid, used to pick the table in force.
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    /// The salary and worked-time inputs. Only `base_salary` and
    /// `standard_hours` are required; every other field defaults to zero.
    pub input: SalaryInput,
}
