//! Scenario runner: validated config in, summary and report out.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ConfigError, ScenarioConfig};
use crate::report::AnnualReport;
use crate::sim::engine::calculate;
use crate::sim::types::AnnualSummary;

/// Outcome of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRun {
    pub summary: AnnualSummary,
    pub report: AnnualReport,
}

/// Validates `config`, runs the simulation, and derives the report.
///
/// # Errors
///
/// Returns every validation error of `config`; the simulation does not run
/// if there is any.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioRun, Vec<ConfigError>> {
    let errors = config.validate();
    if !errors.is_empty() {
        warn!(n_errors = errors.len(), "rejected scenario");
        return Err(errors);
    }

    let summary = calculate(&config.to_parameters()).map_err(|e| {
        vec![ConfigError {
            field: "scenario".to_string(),
            message: e.to_string(),
        }]
    })?;
    let report = AnnualReport::from_summary(&summary, &config.investment);

    info!(
        savings_no_battery = summary.savings_no_battery,
        savings_with_battery = summary.savings_with_battery,
        "scenario simulated"
    );

    Ok(ScenarioRun { summary, report })
}
