//! Shared test fixtures for integration tests.

use pv_battery_sim::sim::types::{DispatchOutcome, MonthlyResult, SimulationParameters};

/// Conservation tolerance (kWh).
pub const EPS: f64 = 1e-6;

/// Reference household: 5 kWp, 4000 kWh/year split 30/60/10, 0.30 grid, 0.01 feed-in.
pub fn reference_params(battery_capacity_kwh: f64) -> SimulationParameters {
    SimulationParameters {
        pv_capacity_kwp: 5.0,
        battery_capacity_kwh,
        annual_consumption_kwh: 4000.0,
        consumption_fraction_night: 0.30,
        consumption_fraction_morning_evening: 0.60,
        consumption_fraction_midday: 0.10,
        grid_price: 0.30,
        feed_in_price: 0.01,
    }
}

/// Reference household with a different array size.
pub fn params_with_pv(pv_capacity_kwp: f64, battery_capacity_kwh: f64) -> SimulationParameters {
    SimulationParameters {
        pv_capacity_kwp,
        ..reference_params(battery_capacity_kwh)
    }
}

/// Asserts both energy balances of one scenario of one month.
pub fn assert_month_conserves(month: &MonthlyResult, outcome: &DispatchOutcome) {
    assert!(
        (outcome.self_use_kwh + outcome.export_kwh - month.generation_kwh).abs() < EPS,
        "{}: self_use + export != generation ({outcome:?})",
        month.month
    );
    assert!(
        (outcome.self_use_kwh + outcome.grid_purchase_kwh - month.consumption_kwh).abs() < EPS,
        "{}: self_use + grid_purchase != consumption ({outcome:?})",
        month.month
    );
}
