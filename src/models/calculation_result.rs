//! Calculation result models for the payroll engine.
//!
//! This module contains the [`SalaryResult`] produced by the deduction
//! pipeline, the [`PayrollCalculation`] produced by a full gross-to-net run,
//! and the audit trace types that record every calculation decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::GrossBreakdown;

/// The kind of amount withheld from gross pay.
///
/// Variants are listed in pipeline order.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionKind;
///
/// let kind = DeductionKind::HealthInsurance;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"health_insurance\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Employee health insurance contribution.
    HealthInsurance,
    /// Employee pension contribution above the threshold.
    Pension,
    /// Voluntary pension fund contribution.
    VoluntaryPension,
    /// Union membership due.
    UnionDue,
    /// Personal income tax after credits.
    IncomeTax,
}

impl DeductionKind {
    /// Convert to its snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionKind::HealthInsurance => "health_insurance",
            DeductionKind::Pension => "pension",
            DeductionKind::VoluntaryPension => "voluntary_pension",
            DeductionKind::UnionDue => "union_due",
            DeductionKind::IncomeTax => "income_tax",
        }
    }
}

impl std::fmt::Display for DeductionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single amount withheld from gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// What the deduction is.
    pub kind: DeductionKind,
    /// The amount the rate was applied to.
    pub base: Decimal,
    /// The rate applied.
    pub rate: Decimal,
    /// The rounded amount withheld. Never negative.
    pub amount: Decimal,
}

/// The taxable base after one reduction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableBaseStep {
    /// What was subtracted at this step (e.g. "health_insurance").
    pub label: String,
    /// The amount subtracted.
    pub reduction: Decimal,
    /// The taxable base after the subtraction.
    pub taxable_base: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag conditions that don't prevent calculation but may
/// require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The result of the deduction pipeline.
///
/// Satisfies `net_pay = gross_total + non_taxed_additions - sum(deductions)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// Gross pay the deductions were applied to.
    pub gross_total: Decimal,
    /// Amounts withheld, in pipeline order.
    pub deductions: Vec<DeductionLine>,
    /// The taxable base after each reduction step, starting from gross.
    pub taxable_base_trace: Vec<TaxableBaseStep>,
    /// Income tax on the taxable base before credits.
    pub income_tax_before_credits: Decimal,
    /// The part of the general and family credits actually used.
    pub tax_credits_applied: Decimal,
    /// Non-taxed income added to net pay.
    pub non_taxed_additions: Decimal,
    /// Amount paid out.
    pub net_pay: Decimal,
    /// Employer-side contribution on gross.
    pub employer_contribution: Decimal,
    /// Gross plus the employer contribution.
    pub employer_total_cost: Decimal,
    /// Audit steps recording each stage.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised by the pipeline.
    pub warnings: Vec<AuditWarning>,
}

impl SalaryResult {
    /// Returns the amount withheld for `kind`, or zero if there is no such line.
    pub fn deduction(&self, kind: DeductionKind) -> Decimal {
        self.deductions
            .iter()
            .find(|d| d.kind == kind)
            .map(|d| d.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of every deduction line.
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.iter().map(|d| d.amount).sum()
    }

    /// The taxable base income tax was computed against.
    pub fn final_taxable_base(&self) -> Decimal {
        self.taxable_base_trace
            .last()
            .map(|s| s.taxable_base)
            .unwrap_or(self.gross_total)
    }
}

/// A complete gross-to-net calculation.
///
/// Deterministic for a given input and rate table: it carries no
/// identifiers or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The version of the rate table used.
    pub rate_table_version: String,
    /// The gross pay breakdown.
    pub gross: GrossBreakdown,
    /// The deduction pipeline result.
    pub salary: SalaryResult,
    /// Every step of both components, numbered contiguously.
    pub audit_trace: AuditTrace,
}
