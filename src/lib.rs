//! Gross-to-net payroll engine for Hungarian salaries
//!
//! This crate turns a monthly salary and the hours worked in a pay period into
//! gross pay, statutory and voluntary deductions, income tax, net pay and
//! employer cost. Every rate comes from a versioned rate table loaded from
//! YAML, and every calculation carries an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
