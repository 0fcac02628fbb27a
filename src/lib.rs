//! Rooftop PV and battery monthly benefit simulator.
//!
//! Estimates, month by month over one year, how a household's grid
//! purchases and exports change with a PV array alone and with a PV array
//! plus battery, and folds the energy split into an annual cost comparison.

/// Scenario configuration: TOML loading, presets, and validation.
pub mod config;
/// CSV export of monthly results.
pub mod io;
/// Derived metrics and text rendering.
pub mod report;
pub mod runner;
/// Reference data, monthly dispatch, and annual aggregation.
pub mod sim;

/// REST API (enabled with the `api` feature).
#[cfg(feature = "api")]
pub mod api;
