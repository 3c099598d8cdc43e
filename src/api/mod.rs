//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for running gross-to-net
//! calculations and listing the loaded rate tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse, CalculationResponse, RateTablesResponse};
pub use state::AppState;
