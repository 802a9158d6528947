//! HTTP API for the wage calculator and the dunning dashboard.
//!
//! This module provides the REST endpoints for estimating take-home pay and
//! for viewing, exporting and advancing failed-payment recovery records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{SearchQuery, WageCalculationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
