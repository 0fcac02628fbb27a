//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Rooftop PV and battery monthly benefit simulator.
///
/// Runs a one-year simulation of a household with and without a battery and
/// prints the monthly energy split and the annual cost comparison.
#[derive(Debug, Parser)]
#[command(name = "pv-battery-sim", author, version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset: default, no_battery, large_array, evening_household.
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Write the monthly results to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv_out: Option<PathBuf>,

    /// Print summary and report as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Start the REST API server after the simulation.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}
