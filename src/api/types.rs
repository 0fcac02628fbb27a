//! API request, response, and query types.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::report::AnnualReport;
use crate::sim::types::AnnualSummary;

/// Result of a simulation: the core summary plus derived metrics.
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub summary: AnnualSummary,
    pub report: AnnualReport,
}

/// Optional month-index range for the months endpoint (0 = January).
#[derive(Debug, Deserialize)]
pub struct MonthsQuery {
    /// First month index (inclusive).
    pub from: Option<usize>,
    /// Last month index (inclusive).
    pub to: Option<usize>,
}

/// Body of a 422 response: every validation error of the submitted scenario.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<ConfigError>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
