//! Derived metrics and text rendering of an annual summary.

use std::fmt;

use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};
use serde::Serialize;

use crate::config::InvestmentConfig;
use crate::sim::types::{AnnualSummary, DispatchOutcome, Scenario};

/// Annual energy totals and ratios of one installation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// Energy totals summed across the year.
    pub totals: DispatchOutcome,
    /// Self-used share of generation (%).
    pub self_consumption_pct: f64,
    /// Self-covered share of consumption (%).
    pub self_sufficiency_pct: f64,
    /// Net annual electricity cost.
    pub cost: f64,
    /// Savings against the no-solar baseline.
    pub savings: f64,
}

impl ScenarioReport {
    fn new(
        totals: DispatchOutcome,
        generation_kwh: f64,
        consumption_kwh: f64,
        cost: f64,
        savings: f64,
    ) -> Self {
        Self {
            totals,
            self_consumption_pct: percent(totals.self_use_kwh, generation_kwh),
            self_sufficiency_pct: percent(totals.self_use_kwh, consumption_kwh),
            cost,
            savings,
        }
    }
}

/// Aggregate figures derived from an [`AnnualSummary`] and the component costs.
///
/// Payback figures are simple ratios of up-front cost to first-year savings;
/// they are `None` whenever the savings they divide by are not positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReport {
    /// Annual PV generation (kWh).
    pub generation_kwh: f64,
    /// Annual household consumption (kWh).
    pub consumption_kwh: f64,
    /// Annual cost without solar.
    pub baseline_cost: f64,
    pub no_battery: ScenarioReport,
    pub with_battery: ScenarioReport,
    /// Additional yearly savings attributable to the battery.
    pub extra_savings: f64,
    /// Years for the battery to pay for itself from `extra_savings`.
    pub battery_payback_years: Option<f64>,
    /// Years for the whole installation to pay for itself.
    pub system_payback_years: Option<f64>,
}

impl AnnualReport {
    /// Computes the report from a finished summary.
    pub fn from_summary(summary: &AnnualSummary, investment: &InvestmentConfig) -> Self {
        let generation_kwh = summary.total_generation_kwh();
        let consumption_kwh = summary.total_consumption_kwh();
        let extra_savings = summary.savings_with_battery - summary.savings_no_battery;

        Self {
            generation_kwh,
            consumption_kwh,
            baseline_cost: summary.baseline_cost,
            no_battery: ScenarioReport::new(
                summary.totals(Scenario::NoBattery),
                generation_kwh,
                consumption_kwh,
                summary.cost_no_battery,
                summary.savings_no_battery,
            ),
            with_battery: ScenarioReport::new(
                summary.totals(Scenario::WithBattery),
                generation_kwh,
                consumption_kwh,
                summary.cost_with_battery,
                summary.savings_with_battery,
            ),
            extra_savings,
            battery_payback_years: payback_years(investment.battery_cost, extra_savings),
            system_payback_years: payback_years(investment.total(), summary.savings_with_battery),
        }
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { 100.0 * part / whole } else { 0.0 }
}

fn payback_years(cost: f64, yearly_savings: f64) -> Option<f64> {
    (yearly_savings > 0.0).then(|| cost / yearly_savings)
}

impl fmt::Display for AnnualReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Annual Report ---")?;
        writeln!(f, "Generation:            {:.0} kWh", self.generation_kwh)?;
        writeln!(f, "Consumption:           {:.0} kWh", self.consumption_kwh)?;
        writeln!(f, "Baseline cost:         {:.2}", self.baseline_cost)?;
        for (label, s) in [("PV only", &self.no_battery), ("PV + battery", &self.with_battery)] {
            writeln!(
                f,
                "{label:<13}          cost {:.2}, savings {:.2}, self-consumption {:.1}%, self-sufficiency {:.1}%",
                s.cost, s.savings, s.self_consumption_pct, s.self_sufficiency_pct
            )?;
        }
        writeln!(f, "Battery extra savings: {:.2} per year", self.extra_savings)?;
        match self.battery_payback_years {
            Some(years) => writeln!(f, "Battery payback:       {years:.1} years")?,
            None => writeln!(f, "Battery payback:       never")?,
        }
        match self.system_payback_years {
            Some(years) => write!(f, "System payback:        {years:.1} years"),
            None => write!(f, "System payback:        never"),
        }
    }
}

/// Renders the monthly energy split as a table.
pub fn build_monthly_table(summary: &AnnualSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        "Month",
        "Generation",
        "Consumption",
        "Self-use",
        "Export",
        "Grid",
        "Self-use (bat)",
        "Export (bat)",
        "Grid (bat)",
    ]);
    for m in &summary.months {
        let mut row = vec![Cell::new(&m.month)];
        let values = [
            m.generation_kwh,
            m.consumption_kwh,
            m.no_battery.self_use_kwh,
            m.no_battery.export_kwh,
            m.no_battery.grid_purchase_kwh,
            m.with_battery.self_use_kwh,
            m.with_battery.export_kwh,
            m.with_battery.grid_purchase_kwh,
        ];
        row.extend(
            values
                .iter()
                .map(|v| Cell::new(format!("{v:.1}")).set_alignment(CellAlignment::Right)),
        );
        table.add_row(row);
    }
    table
}
