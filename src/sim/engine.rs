//! Annual aggregation: drives the monthly dispatcher across the year and compares costs.

use tracing::debug;

use super::dispatch::{BatteryModel, MonthInput, dispatch_with};
use super::reference::{self, MONTHS};
use super::types::{AnnualSummary, MonthlyResult, Scenario, SimError, SimulationParameters};

/// Runs a full-year simulation for validated parameters.
///
/// # Errors
///
/// Returns [`SimError::InvalidParameters`] if `params` fails
/// [`SimulationParameters::validate`]; nothing is computed in that case.
///
/// # Examples
///
/// ```
/// use pv_battery_sim::sim::engine::calculate;
/// use pv_battery_sim::sim::types::SimulationParameters;
///
/// let summary = calculate(&SimulationParameters::default()).unwrap();
/// assert_eq!(summary.months.len(), 12);
/// assert!(summary.savings_with_battery >= summary.savings_no_battery);
/// ```
pub fn calculate(params: &SimulationParameters) -> Result<AnnualSummary, SimError> {
    Ok(Engine::new(params.clone())?.run())
}

/// Annual simulation over one validated parameter set.
///
/// Holds no mutable state; [`Engine::run`] can be called any number of times
/// and always produces the same summary.
#[derive(Debug, Clone)]
pub struct Engine {
    params: SimulationParameters,
    battery_model: BatteryModel,
}

impl Engine {
    /// Creates an engine with the default one-cycle-per-day battery model.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameters`] for invalid `params`.
    pub fn new(params: SimulationParameters) -> Result<Self, SimError> {
        Self::with_battery_model(params, BatteryModel::default())
    }

    /// Creates an engine with an explicit battery throughput model.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameters`] for invalid `params` or an
    /// invalid `battery_model`.
    pub fn with_battery_model(
        params: SimulationParameters,
        battery_model: BatteryModel,
    ) -> Result<Self, SimError> {
        params.validate()?;
        battery_model.validate()?;
        Ok(Self {
            params,
            battery_model,
        })
    }

    /// Builds the dispatcher input for month index `index` (0 = January).
    ///
    /// # Panics
    ///
    /// Panics if `index >= MONTHS`.
    pub fn month_input(&self, index: usize) -> MonthInput {
        let p = &self.params;
        let row = reference::month(index);
        let consumption_kwh = p.annual_consumption_kwh * row.seasonal_consumption_weight;

        MonthInput {
            generation_kwh: p.pv_capacity_kwp * row.kwh_per_kwp,
            consumption_midday_kwh: consumption_kwh * p.consumption_fraction_midday,
            consumption_morning_evening_kwh: consumption_kwh
                * p.consumption_fraction_morning_evening,
            consumption_night_kwh: consumption_kwh * p.consumption_fraction_night,
            battery_capacity_kwh: p.battery_capacity_kwh,
            days_in_month: row.days_in_month,
        }
    }

    /// Simulates a single month.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MONTHS`.
    pub fn step(&self, index: usize) -> MonthlyResult {
        let row = reference::month(index);
        let input = self.month_input(index);
        let dispatch = dispatch_with(&input, &self.battery_model);

        MonthlyResult {
            month: row.label.to_string(),
            generation_kwh: input.generation_kwh,
            consumption_kwh: self.params.annual_consumption_kwh * row.seasonal_consumption_weight,
            no_battery: dispatch.no_battery,
            with_battery: dispatch.with_battery,
        }
    }

    /// Simulates all twelve months and folds them into the annual cost comparison.
    pub fn run(&self) -> AnnualSummary {
        let months: Vec<MonthlyResult> = (0..MONTHS).map(|i| self.step(i)).collect();
        let p = &self.params;

        let baseline_cost = p.annual_consumption_kwh * p.grid_price;
        let cost_no_battery = self.scenario_cost(&months, Scenario::NoBattery);
        let cost_with_battery = self.scenario_cost(&months, Scenario::WithBattery);

        let summary = AnnualSummary {
            baseline_cost,
            cost_no_battery,
            cost_with_battery,
            savings_no_battery: baseline_cost - cost_no_battery,
            savings_with_battery: baseline_cost - cost_with_battery,
            months,
        };

        debug!(
            pv_capacity_kwp = p.pv_capacity_kwp,
            battery_capacity_kwh = p.battery_capacity_kwh,
            baseline_cost = summary.baseline_cost,
            savings_no_battery = summary.savings_no_battery,
            savings_with_battery = summary.savings_with_battery,
            "simulated year"
        );

        summary
    }

    /// Returns the parameters this engine was built with.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    fn scenario_cost(&self, months: &[MonthlyResult], scenario: Scenario) -> f64 {
        let (grid_purchase_kwh, export_kwh) = months
            .iter()
            .map(|m| m.outcome(scenario))
            .fold((0.0, 0.0), |(grid, export), o| {
                (grid + o.grid_purchase_kwh, export + o.export_kwh)
            });
        grid_purchase_kwh * self.params.grid_price - export_kwh * self.params.feed_in_price
    }
}
