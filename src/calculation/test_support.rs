//! Shared fixtures for calculation unit tests.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RateTable;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// The values of `config/hu/rate_tables/hu-2024-a.yaml`.
pub fn rate_table_a() -> RateTable {
    RateTable {
        version: "hu-2024-a".to_string(),
        description: "Test table".to_string(),
        effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        overtime_base_multiplier: dec("1.0"),
        shift_differential_rate: dec("0.45"),
        overtime_includes_shift_differential: true,
        holiday_multiplier: dec("2.0"),
        health_insurance_rate: dec("0.185"),
        health_insurance_cap: dec("2000000"),
        pension_rate: dec("0.10"),
        pension_threshold: dec("500000"),
        voluntary_pension_rate: dec("0.02"),
        union_due_rate: dec("0.005"),
        union_due_reduces_tax_base: false,
        income_tax_rate: dec("0.15"),
        general_tax_credit: dec("10000"),
        employer_contribution_rate: dec("0.13"),
    }
}
