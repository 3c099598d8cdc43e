//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_AMOUNT;

/// Largest accepted rate or multiplier.
pub const MAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Metadata about the payroll jurisdiction.
///
/// Contains identifying information about the rule set, including its
/// jurisdiction code, name, currency and source URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollMetadata {
    /// The jurisdiction code (e.g., "HU").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The ISO currency code all amounts are expressed in.
    pub currency: String,
    /// URL to the official rule documentation.
    pub source_url: String,
}

fn default_true() -> bool {
    true
}

/// One versioned set of payroll rules.
///
/// A rate table is immutable once loaded. When the rules change (a new tax
/// year, a new collective agreement) a new table with a new version is
/// created instead of editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Unique identifier of this rule version (e.g., "hu-2024-a").
    pub version: String,
    /// A description of the rule version.
    #[serde(default)]
    pub description: String,
    /// The first date on which this table is in force.
    pub effective_date: NaiveDate,

    /// Multiplier for the base portion of overtime pay.
    pub overtime_base_multiplier: Decimal,
    /// Multiplier for shift/night hours, and for overtime hours when
    /// `overtime_includes_shift_differential` is set.
    pub shift_differential_rate: Decimal,
    /// Whether overtime hours also earn the shift differential.
    #[serde(default = "default_true")]
    pub overtime_includes_shift_differential: bool,
    /// Multiplier for hours worked on public holidays.
    pub holiday_multiplier: Decimal,

    /// Employee health insurance contribution rate.
    pub health_insurance_rate: Decimal,
    /// Gross amount above which health insurance no longer grows.
    pub health_insurance_cap: Decimal,
    /// Employee pension contribution rate.
    pub pension_rate: Decimal,
    /// Gross amount below which no pension contribution is due.
    pub pension_threshold: Decimal,
    /// Voluntary pension fund contribution rate.
    pub voluntary_pension_rate: Decimal,
    /// Union membership due rate.
    pub union_due_rate: Decimal,
    /// Whether the union due is subtracted from the taxable base.
    pub union_due_reduces_tax_base: bool,
    /// Personal income tax rate.
    pub income_tax_rate: Decimal,
    /// Flat credit subtracted from the computed income tax.
    pub general_tax_credit: Decimal,
    /// Employer-side social contribution rate.
    pub employer_contribution_rate: Decimal,
}

impl RateTable {
    /// Checks that the table is usable for calculation.
    ///
    /// Every rate, multiplier, cap, threshold and credit must be
    /// non-negative and the version must not be empty. Rates and multipliers
    /// may not exceed [`MAX_RATE`]; caps, thresholds and credits may not
    /// exceed [`MAX_AMOUNT`].
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::RateTable;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut table = RateTable {
    ///     version: "example".to_string(),
    ///     description: String::new(),
    ///     effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     overtime_base_multiplier: Decimal::ONE,
    ///     shift_differential_rate: Decimal::new(45, 2),
    ///     overtime_includes_shift_differential: true,
    ///     holiday_multiplier: Decimal::TWO,
    ///     health_insurance_rate: Decimal::new(185, 3),
    ///     health_insurance_cap: Decimal::new(2_000_000, 0),
    ///     pension_rate: Decimal::new(10, 2),
    ///     pension_threshold: Decimal::new(500_000, 0),
    ///     voluntary_pension_rate: Decimal::new(2, 2),
    ///     union_due_rate: Decimal::new(5, 3),
    ///     union_due_reduces_tax_base: false,
    ///     income_tax_rate: Decimal::new(15, 2),
    ///     general_tax_credit: Decimal::new(10_000, 0),
    ///     employer_contribution_rate: Decimal::new(13, 2),
    /// };
    /// assert!(table.validate().is_ok());
    ///
    /// table.pension_rate = Decimal::new(-1, 2);
    /// assert!(table.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.version.trim().is_empty() {
            return Err(EngineError::InvalidRateTable {
                version: self.version.clone(),
                field: "version".to_string(),
                message: "cannot be empty".to_string(),
            });
        }

        let fields = [
            ("overtime_base_multiplier", self.overtime_base_multiplier, MAX_RATE),
            ("shift_differential_rate", self.shift_differential_rate, MAX_RATE),
            ("holiday_multiplier", self.holiday_multiplier, MAX_RATE),
            ("health_insurance_rate", self.health_insurance_rate, MAX_RATE),
            ("health_insurance_cap", self.health_insurance_cap, MAX_AMOUNT),
            ("pension_rate", self.pension_rate, MAX_RATE),
            ("pension_threshold", self.pension_threshold, MAX_AMOUNT),
            ("voluntary_pension_rate", self.voluntary_pension_rate, MAX_RATE),
            ("union_due_rate", self.union_due_rate, MAX_RATE),
            ("income_tax_rate", self.income_tax_rate, MAX_RATE),
            ("general_tax_credit", self.general_tax_credit, MAX_AMOUNT),
            ("employer_contribution_rate", self.employer_contribution_rate, MAX_RATE),
        ];

        for (field, value, limit) in fields {
            let message = if value.is_sign_negative() && !value.is_zero() {
                format!("cannot be negative (got {})", value)
            } else if value > limit {
                format!("cannot exceed {} (got {})", limit, value)
            } else {
                continue;
            };

            return Err(EngineError::InvalidRateTable {
                version: self.version.clone(),
                field: field.to_string(),
                message,
            });
        }

        Ok(())
    }
}

/// A summary of a rate table, used when listing what is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableSummary {
    /// The rate table version.
    pub version: String,
    /// The rate table description.
    pub description: String,
    /// The first date on which the table is in force.
    pub effective_date: NaiveDate,
}

impl From<&RateTable> for RateTableSummary {
    fn from(table: &RateTable) -> Self {
        Self {
            version: table.version.clone(),
            description: table.description.clone(),
            effective_date: table.effective_date,
        }
    }
}

/// The complete payroll configuration loaded from YAML files.
///
/// This struct aggregates the jurisdiction metadata and every rate table
/// found in a configuration directory.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction metadata.
    metadata: PayrollMetadata,
    /// Rate tables by effective date (sorted oldest first).
    rate_tables: Vec<RateTable>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: PayrollMetadata, rate_tables: Vec<RateTable>) -> Self {
        let mut sorted = rate_tables;
        sorted.sort_by(|a, b| {
            a.effective_date
                .cmp(&b.effective_date)
                .then_with(|| a.version.cmp(&b.version))
        });
        Self {
            metadata,
            rate_tables: sorted,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rate_tables(&self) -> &[RateTable] {
        &self.rate_tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table(version: &str, effective: (i32, u32, u32)) -> RateTable {
        RateTable {
            version: version.to_string(),
            description: String::new(),
            effective_date: NaiveDate::from_ymd_opt(effective.0, effective.1, effective.2).unwrap(),
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

    #[test]
    fn test_valid_table_passes_validation() {
        assert!(table("hu-2024-a", (2024, 1, 1)).validate().is_ok());
    }

    #[test]
    fn test_zero_rates_are_valid() {
        let mut t = table("zero", (2024, 1, 1));
        t.union_due_rate = Decimal::ZERO;
        t.general_tax_credit = Decimal::ZERO;
        t.pension_threshold = Decimal::ZERO;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_negative_rate_is_rejected_with_field_name() {
        let mut t = table("hu-2024-a", (2024, 1, 1));
        t.voluntary_pension_rate = dec("-0.02");

        match t.validate() {
            Err(EngineError::InvalidRateTable {
                version, field, ..
            }) => {
                assert_eq!(version, "hu-2024-a");
                assert_eq!(field, "voluntary_pension_rate");
            }
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_cap_is_rejected() {
        let mut t = table("hu-2024-a", (2024, 1, 1));
        t.health_insurance_cap = dec("-1");

        match t.validate() {
            Err(EngineError::InvalidRateTable { field, .. }) => {
                assert_eq!(field, "health_insurance_cap");
            }
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_above_limit_is_rejected() {
        let mut t = table("hu-2024-a", (2024, 1, 1));
        t.holiday_multiplier = dec("100.5");

        match t.validate() {
            Err(EngineError::InvalidRateTable { field, message, .. }) => {
                assert_eq!(field, "holiday_multiplier");
                assert!(message.contains("cannot exceed"));
            }
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_cap_is_rejected() {
        let mut t = table("hu-2024-a", (2024, 1, 1));
        t.health_insurance_cap = dec("10000000000000000000000000");

        assert!(matches!(
            t.validate(),
            Err(EngineError::InvalidRateTable { ref field, .. }) if field == "health_insurance_cap"
        ));
    }

    #[test]
    fn test_empty_version_is_rejected() {
        let t = table("  ", (2024, 1, 1));
        assert!(matches!(
            t.validate(),
            Err(EngineError::InvalidRateTable { ref field, .. }) if field == "version"
        ));
    }

    #[test]
    fn test_deserialize_defaults_overtime_shift_differential_to_true() {
        let yaml = r#"
version: hu-test
effective_date: 2024-01-01
overtime_base_multiplier: "1.0"
shift_differential_rate: "0.45"
holiday_multiplier: "2.0"
health_insurance_rate: "0.185"
health_insurance_cap: "2000000"
pension_rate: "0.10"
pension_threshold: "500000"
voluntary_pension_rate: "0.02"
union_due_rate: "0.005"
union_due_reduces_tax_base: false
income_tax_rate: "0.15"
general_tax_credit: "10000"
employer_contribution_rate: "0.13"
"#;
        let t: RateTable = serde_yaml::from_str(yaml).unwrap();
        assert!(t.overtime_includes_shift_differential);
        assert_eq!(t.description, "");
        assert_eq!(t.health_insurance_rate, dec("0.185"));
    }

    #[test]
    fn test_payroll_config_sorts_tables_by_effective_date() {
        let metadata = PayrollMetadata {
            code: "HU".to_string(),
            name: "Hungarian payroll".to_string(),
            currency: "HUF".to_string(),
            source_url: "https://example.com".to_string(),
        };
        let config = PayrollConfig::new(
            metadata,
            vec![
                table("late", (2025, 1, 1)),
                table("early", (2024, 1, 1)),
            ],
        );

        let versions: Vec<&str> = config
            .rate_tables()
            .iter()
            .map(|t| t.version.as_str())
            .collect();
        assert_eq!(versions, vec!["early", "late"]);
    }

    #[test]
    fn test_summary_from_table() {
        let t = table("hu-2024-a", (2024, 1, 1));
        let summary = RateTableSummary::from(&t);
        assert_eq!(summary.version, "hu-2024-a");
        assert_eq!(
            summary.effective_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }
}
