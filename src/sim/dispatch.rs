//! Monthly energy dispatch for the no-battery and with-battery installations.

use super::types::{DispatchOutcome, SimError};

/// Battery throughput assumptions used by [`dispatch_with`].
///
/// The monthly model cannot track state of charge, so the battery is
/// represented by how much energy it may shift per day.
///
/// With `round_trip_efficiency < 1.0` the energy lost in storage is in no
/// field of [`DispatchOutcome`]: generation then equals
/// `self_use + export + loss`, where `loss` is the charged energy times
/// `1.0 - round_trip_efficiency`. Consumption still balances exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryModel {
    /// Full charge/discharge cycles per day. No carry-over between days.
    pub cycles_per_day: f64,
    /// Fraction of stored energy that comes back out.
    pub round_trip_efficiency: f64,
}

impl Default for BatteryModel {
    /// One full cycle per day at 100% round-trip efficiency.
    fn default() -> Self {
        Self {
            cycles_per_day: 1.0,
            round_trip_efficiency: 1.0,
        }
    }
}

impl BatteryModel {
    /// Checks that the model can only shift a non-negative amount of energy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameters`] unless `cycles_per_day` is
    /// finite and > 0 and `round_trip_efficiency` is in (0, 1].
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.cycles_per_day.is_finite() || self.cycles_per_day <= 0.0 {
            return Err(SimError::invalid(
                "cycles_per_day",
                format!("must be a finite value > 0, got {}", self.cycles_per_day),
            ));
        }
        if !(self.round_trip_efficiency > 0.0 && self.round_trip_efficiency <= 1.0) {
            return Err(SimError::invalid(
                "round_trip_efficiency",
                format!("must be in (0.0, 1.0], got {}", self.round_trip_efficiency),
            ));
        }
        Ok(())
    }
}

/// Energy figures of one month fed to the dispatcher. All values must be >= 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthInput {
    /// PV generation (kWh).
    pub generation_kwh: f64,
    /// Consumption between 09:00 and 17:00 (kWh).
    pub consumption_midday_kwh: f64,
    /// Consumption between 06:00–09:00 and 17:00–22:00 (kWh).
    pub consumption_morning_evening_kwh: f64,
    /// Consumption between 22:00 and 06:00 (kWh).
    pub consumption_night_kwh: f64,
    /// Usable battery capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Days in the month (1..=31).
    pub days_in_month: u32,
}

impl MonthInput {
    /// Total consumption across all three time windows (kWh).
    pub fn consumption_kwh(&self) -> f64 {
        self.consumption_midday_kwh + self.consumption_off_peak_kwh()
    }

    /// Consumption outside the midday window, the load a battery can cover (kWh).
    pub fn consumption_off_peak_kwh(&self) -> f64 {
        self.consumption_morning_evening_kwh + self.consumption_night_kwh
    }
}

/// Dispatch result of one month for both installations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthDispatch {
    /// PV only: generation can only meet midday load.
    pub no_battery: DispatchOutcome,
    /// PV with battery shifting midday surplus into the evening and night.
    pub with_battery: DispatchOutcome,
}

/// Dispatches one month with the default [`BatteryModel`].
pub fn dispatch(input: &MonthInput) -> MonthDispatch {
    dispatch_with(input, &BatteryModel::default())
}

/// Dispatches one month for both installations.
///
/// Priority with a battery: direct midday self-use, charging from the midday
/// surplus, discharging against morning/evening and night load, export of the
/// remaining surplus, and finally grid purchase for the remaining load.
/// A battery capacity of zero yields the no-battery outcome exactly.
///
/// `model` is expected to pass [`BatteryModel::validate`]; an invalid model
/// produces negative energy figures.
pub fn dispatch_with(input: &MonthInput, model: &BatteryModel) -> MonthDispatch {
    let no_battery = dispatch_no_battery(input);

    if input.battery_capacity_kwh <= 0.0 {
        return MonthDispatch {
            no_battery,
            with_battery: no_battery,
        };
    }

    MonthDispatch {
        no_battery,
        with_battery: dispatch_battery(input, model),
    }
}

fn dispatch_no_battery(input: &MonthInput) -> DispatchOutcome {
    let self_use_kwh = input.generation_kwh.min(input.consumption_midday_kwh);
    DispatchOutcome {
        self_use_kwh,
        export_kwh: (input.generation_kwh - input.consumption_midday_kwh).max(0.0),
        grid_purchase_kwh: input.consumption_kwh() - self_use_kwh,
    }
}

fn dispatch_battery(input: &MonthInput, model: &BatteryModel) -> DispatchOutcome {
    let self_use_midday_kwh = input.generation_kwh.min(input.consumption_midday_kwh);
    let surplus_kwh = (input.generation_kwh - input.consumption_midday_kwh).max(0.0);

    let monthly_limit_kwh =
        input.battery_capacity_kwh * f64::from(input.days_in_month) * model.cycles_per_day;
    let off_peak_kwh = input.consumption_off_peak_kwh();

    // Never store more than the same month can use.
    let charge_kwh = surplus_kwh.min(monthly_limit_kwh).min(off_peak_kwh);
    let discharge_kwh = charge_kwh * model.round_trip_efficiency;

    // Midday load not covered by generation is bought as well.
    let midday_shortfall_kwh = input.consumption_midday_kwh - self_use_midday_kwh;

    DispatchOutcome {
        self_use_kwh: self_use_midday_kwh + discharge_kwh,
        export_kwh: surplus_kwh - charge_kwh,
        grid_purchase_kwh: midday_shortfall_kwh + (off_peak_kwh - discharge_kwh).max(0.0),
    }
}
