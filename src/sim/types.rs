//! Core simulation types: input parameters, per-month dispatch outcomes, and the annual summary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance accepted on the sum of the three consumption fractions.
pub const FRACTION_SUM_TOLERANCE: f64 = 1e-3;

/// Input parameters for one simulation run.
///
/// Values are expected to be validated by the caller (see
/// [`crate::config::ScenarioConfig::validate`]). [`SimulationParameters::validate`]
/// re-checks them so the aggregator can fail fast instead of producing
/// nonsensical output.
///
/// # Examples
///
/// ```
/// use pv_battery_sim::sim::types::SimulationParameters;
///
/// let params = SimulationParameters::default();
/// assert!(params.validate().is_ok());
/// assert_eq!(params.annual_consumption_kwh, 4000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Installed PV peak power (kWp).
    pub pv_capacity_kwp: f64,
    /// Usable battery capacity (kWh). Zero means no battery.
    pub battery_capacity_kwh: f64,
    /// Household consumption over one year (kWh).
    pub annual_consumption_kwh: f64,
    /// Share of daily consumption between 22:00 and 06:00.
    pub consumption_fraction_night: f64,
    /// Share of daily consumption between 06:00–09:00 and 17:00–22:00.
    pub consumption_fraction_morning_evening: f64,
    /// Share of daily consumption between 09:00 and 17:00.
    pub consumption_fraction_midday: f64,
    /// Price paid per kWh purchased from the grid.
    pub grid_price: f64,
    /// Compensation per kWh exported to the grid.
    pub feed_in_price: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            pv_capacity_kwp: 5.0,
            battery_capacity_kwh: 10.0,
            annual_consumption_kwh: 4000.0,
            consumption_fraction_night: 0.30,
            consumption_fraction_morning_evening: 0.60,
            consumption_fraction_midday: 0.10,
            grid_price: 0.30,
            feed_in_price: 0.01,
        }
    }
}

impl SimulationParameters {
    /// Checks magnitudes and consumption fractions.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameters`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        let magnitudes = [
            ("pv_capacity_kwp", self.pv_capacity_kwp),
            ("battery_capacity_kwh", self.battery_capacity_kwh),
            ("annual_consumption_kwh", self.annual_consumption_kwh),
            ("grid_price", self.grid_price),
            ("feed_in_price", self.feed_in_price),
        ];
        for (field, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::invalid(
                    field,
                    format!("must be a finite value >= 0, got {value}"),
                ));
            }
        }

        let fractions = [
            ("consumption_fraction_night", self.consumption_fraction_night),
            (
                "consumption_fraction_morning_evening",
                self.consumption_fraction_morning_evening,
            ),
            ("consumption_fraction_midday", self.consumption_fraction_midday),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::invalid(
                    field,
                    format!("must be in [0.0, 1.0], got {value}"),
                ));
            }
        }

        // Slack for the rounding of the sum itself, so 0.999 and 1.001 both pass.
        let sum = self.consumption_fraction_sum();
        if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE + 4.0 * f64::EPSILON {
            return Err(SimError::invalid(
                "consumption_fractions",
                format!("must sum to 1.0, got {sum}"),
            ));
        }

        Ok(())
    }

    /// Sum of the three time-window consumption fractions.
    pub fn consumption_fraction_sum(&self) -> f64 {
        self.consumption_fraction_night
            + self.consumption_fraction_morning_evening
            + self.consumption_fraction_midday
    }
}

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Input parameters violate a precondition of the model.
    #[error("invalid parameters: {field} {reason}")]
    InvalidParameters {
        /// Offending parameter name.
        field: &'static str,
        /// Violated constraint.
        reason: String,
    },
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: String) -> Self {
        Self::InvalidParameters { field, reason }
    }
}

/// Energy split of one month under one scenario.
///
/// Conservation holds within floating-point tolerance:
/// `self_use + export == generation` and `self_use + grid_purchase == consumption`.
/// A lossy battery model takes its storage loss out of the first balance only
/// (see `BatteryModel`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Generated energy consumed on site (kWh).
    pub self_use_kwh: f64,
    /// Generated energy sent to the grid (kWh).
    pub export_kwh: f64,
    /// Consumed energy bought from the grid (kWh).
    pub grid_purchase_kwh: f64,
}

/// Simulation result for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResult {
    /// Short month label (`"Jan"` … `"Dec"`).
    pub month: String,
    /// PV generation in this month (kWh).
    pub generation_kwh: f64,
    /// Household consumption in this month (kWh).
    pub consumption_kwh: f64,
    /// Energy split without a battery.
    pub no_battery: DispatchOutcome,
    /// Energy split with the configured battery.
    pub with_battery: DispatchOutcome,
}

/// Annual cost comparison and the twelve monthly results, in calendar order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// Cost if all consumption were bought from the grid.
    pub baseline_cost: f64,
    /// Net annual cost with PV only.
    pub cost_no_battery: f64,
    /// Net annual cost with PV and battery.
    pub cost_with_battery: f64,
    /// `baseline_cost - cost_no_battery`.
    pub savings_no_battery: f64,
    /// `baseline_cost - cost_with_battery`.
    pub savings_with_battery: f64,
    /// Monthly results, index 0 = January.
    pub months: Vec<MonthlyResult>,
}

impl AnnualSummary {
    /// Annual totals of one scenario, summed across all months.
    pub fn totals(&self, scenario: Scenario) -> DispatchOutcome {
        self.months
            .iter()
            .map(|m| m.outcome(scenario))
            .fold(DispatchOutcome::default(), |acc, o| DispatchOutcome {
                self_use_kwh: acc.self_use_kwh + o.self_use_kwh,
                export_kwh: acc.export_kwh + o.export_kwh,
                grid_purchase_kwh: acc.grid_purchase_kwh + o.grid_purchase_kwh,
            })
    }

    /// Total PV generation over the year (kWh).
    pub fn total_generation_kwh(&self) -> f64 {
        self.months.iter().map(|m| m.generation_kwh).sum()
    }

    /// Total consumption over the year (kWh).
    pub fn total_consumption_kwh(&self) -> f64 {
        self.months.iter().map(|m| m.consumption_kwh).sum()
    }
}

/// Which of the two compared installations a figure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    NoBattery,
    WithBattery,
}

impl MonthlyResult {
    /// Returns the outcome for the given scenario.
    pub fn outcome(&self, scenario: Scenario) -> DispatchOutcome {
        match scenario {
            Scenario::NoBattery => self.no_battery,
            Scenario::WithBattery => self.with_battery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_valid() {
        assert!(SimulationParameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_capacity() {
        let params = SimulationParameters {
            pv_capacity_kwp: -1.0,
            ..SimulationParameters::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidParameters {
                field: "pv_capacity_kwp",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_finite_price() {
        let params = SimulationParameters {
            grid_price: f64::NAN,
            ..SimulationParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_fraction_out_of_range() {
        let params = SimulationParameters {
            consumption_fraction_midday: 1.2,
            ..SimulationParameters::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("consumption_fraction_midday"));
    }

    #[test]
    fn rejects_fractions_not_summing_to_one() {
        let params = SimulationParameters {
            consumption_fraction_night: 0.5,
            ..SimulationParameters::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn tolerates_rounding_in_fraction_sum() {
        let params = SimulationParameters {
            consumption_fraction_night: 0.3005,
            ..SimulationParameters::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn fraction_sum_tolerance_is_symmetric() {
        for midday in [0.099, 0.101] {
            let params = SimulationParameters {
                consumption_fraction_midday: midday,
                ..SimulationParameters::default()
            };
            assert!(params.validate().is_ok(), "midday {midday} should pass");
        }
        for midday in [0.0985, 0.1015] {
            let params = SimulationParameters {
                consumption_fraction_midday: midday,
                ..SimulationParameters::default()
            };
            assert!(params.validate().is_err(), "midday {midday} should fail");
        }
    }

    #[test]
    fn totals_sum_each_scenario_independently() {
        let outcome = |v: f64| DispatchOutcome {
            self_use_kwh: v,
            export_kwh: 2.0 * v,
            grid_purchase_kwh: 3.0 * v,
        };
        let months = (1..=3)
            .map(|i| MonthlyResult {
                month: format!("M{i}"),
                generation_kwh: 10.0,
                consumption_kwh: 5.0,
                no_battery: outcome(f64::from(i)),
                with_battery: outcome(10.0 * f64::from(i)),
            })
            .collect();
        let summary = AnnualSummary {
            baseline_cost: 0.0,
            cost_no_battery: 0.0,
            cost_with_battery: 0.0,
            savings_no_battery: 0.0,
            savings_with_battery: 0.0,
            months,
        };

        let no = summary.totals(Scenario::NoBattery);
        assert_eq!(no.self_use_kwh, 6.0);
        assert_eq!(no.export_kwh, 12.0);
        assert_eq!(no.grid_purchase_kwh, 18.0);
        assert_eq!(summary.totals(Scenario::WithBattery).self_use_kwh, 60.0);
        assert_eq!(summary.total_generation_kwh(), 30.0);
        assert_eq!(summary.total_consumption_kwh(), 15.0);
    }
}
