//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::types::SimulationParameters;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the default household. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::default_household`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Installed PV, inverter, and battery sizes.
    #[serde(default)]
    pub system: SystemConfig,
    /// Grid purchase and feed-in prices.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Annual consumption and its daily shape.
    #[serde(default)]
    pub consumption: ConsumptionConfig,
    /// Component costs, used for payback estimates only.
    #[serde(default)]
    pub investment: InvestmentConfig,
}

/// Installed system sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// PV array peak power (kWp).
    pub pv_capacity_kwp: f64,
    /// Inverter AC output limit (kW). Reported, not used by the monthly model.
    pub inverter_power_kw: f64,
    /// Usable battery capacity (kWh). 0 = no battery.
    pub battery_capacity_kwh: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            pv_capacity_kwp: 5.0,
            inverter_power_kw: 5.0,
            battery_capacity_kwh: 10.0,
        }
    }
}

/// Electricity prices (currency per kWh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    pub grid_price: f64,
    pub feed_in_price: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            grid_price: 0.30,
            feed_in_price: 0.01,
        }
    }
}

/// Household consumption.
///
/// The daily shape is given in whole percent and must add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsumptionConfig {
    /// Annual consumption (kWh). A 2 adults + 2 children household uses about 4000.
    pub annual_kwh: f64,
    /// 22:00–06:00 (%).
    pub night_pct: u32,
    /// 06:00–09:00 and 17:00–22:00 (%).
    pub morning_evening_pct: u32,
    /// 09:00–17:00 (%).
    pub midday_pct: u32,
}

impl Default for ConsumptionConfig {
    fn default() -> Self {
        Self {
            annual_kwh: 4000.0,
            night_pct: 30,
            morning_evening_pct: 60,
            midday_pct: 10,
        }
    }
}

/// Component prices (currency).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvestmentConfig {
    pub pv_cost: f64,
    pub inverter_cost: f64,
    pub battery_cost: f64,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            pv_cost: 9000.0,
            inverter_cost: 1500.0,
            battery_cost: 6000.0,
        }
    }
}

impl InvestmentConfig {
    /// Total up-front cost of PV, inverter, and battery.
    pub fn total(&self) -> f64 {
        self.pv_cost + self.inverter_cost + self.battery_cost
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"consumption.night_pct"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the default household: 5 kWp, 10 kWh battery, 4000 kWh/year.
    pub fn default_household() -> Self {
        Self::default()
    }

    /// Returns the PV-only preset: same household, no battery.
    pub fn no_battery() -> Self {
        Self {
            system: SystemConfig {
                battery_capacity_kwh: 0.0,
                ..SystemConfig::default()
            },
            investment: InvestmentConfig {
                battery_cost: 0.0,
                ..InvestmentConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the large-array preset: 10 kWp with a 15 kWh battery.
    pub fn large_array() -> Self {
        Self {
            system: SystemConfig {
                pv_capacity_kwp: 10.0,
                inverter_power_kw: 10.0,
                battery_capacity_kwh: 15.0,
            },
            investment: InvestmentConfig {
                pv_cost: 16000.0,
                inverter_cost: 2500.0,
                battery_cost: 8500.0,
            },
            ..Self::default()
        }
    }

    /// Returns the evening-household preset: nobody home at midday, higher consumption.
    pub fn evening_household() -> Self {
        Self {
            consumption: ConsumptionConfig {
                annual_kwh: 5500.0,
                night_pct: 35,
                morning_evening_pct: 60,
                midday_pct: 5,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "no_battery", "large_array", "evening_household"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default_household()),
            "no_battery" => Ok(Self::no_battery()),
            "large_array" => Ok(Self::large_array()),
            "evening_household" => Ok(Self::evening_household()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let magnitudes = [
            ("system.pv_capacity_kwp", self.system.pv_capacity_kwp),
            ("system.inverter_power_kw", self.system.inverter_power_kw),
            ("system.battery_capacity_kwh", self.system.battery_capacity_kwh),
            ("tariff.grid_price", self.tariff.grid_price),
            ("tariff.feed_in_price", self.tariff.feed_in_price),
            ("consumption.annual_kwh", self.consumption.annual_kwh),
            ("investment.pv_cost", self.investment.pv_cost),
            ("investment.inverter_cost", self.investment.inverter_cost),
            ("investment.battery_cost", self.investment.battery_cost),
        ];
        for (field, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be a finite value >= 0"));
            }
        }

        let c = &self.consumption;
        let shares = [
            ("consumption.night_pct", c.night_pct),
            ("consumption.morning_evening_pct", c.morning_evening_pct),
            ("consumption.midday_pct", c.midday_pct),
        ];
        for (field, pct) in shares {
            if pct > 100 {
                errors.push(ConfigError::new(field, "must be in [0, 100]"));
            }
        }

        let total_pct: u64 = shares.iter().map(|&(_, pct)| u64::from(pct)).sum();
        if total_pct != 100 {
            errors.push(ConfigError::new(
                "consumption",
                format!("night_pct + morning_evening_pct + midday_pct must be 100, got {total_pct}"),
            ));
        }

        errors
    }

    /// Converts the scenario into simulation parameters.
    ///
    /// Percentages become fractions; inverter power and costs are not part of
    /// the energy model.
    pub fn to_parameters(&self) -> SimulationParameters {
        let c = &self.consumption;
        SimulationParameters {
            pv_capacity_kwp: self.system.pv_capacity_kwp,
            battery_capacity_kwh: self.system.battery_capacity_kwh,
            annual_consumption_kwh: c.annual_kwh,
            consumption_fraction_night: f64::from(c.night_pct) / 100.0,
            consumption_fraction_morning_evening: f64::from(c.morning_evening_pct) / 100.0,
            consumption_fraction_midday: f64::from(c.midday_pct) / 100.0,
            grid_price: self.tariff.grid_price,
            feed_in_price: self.tariff.feed_in_price,
        }
    }
}
