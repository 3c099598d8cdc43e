//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load versioned rate tables from
//! YAML files. The engine itself never reads configuration; callers pick a
//! [`RateTable`] here and pass it explicitly.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hu").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{MAX_RATE, PayrollConfig, PayrollMetadata, RateTable, RateTableSummary};
