//! Fixed monthly reference data: irradiance profile, calendar, and seasonal consumption shape.

use std::sync::LazyLock;

/// Number of months in the simulated year.
pub const MONTHS: usize = 12;

/// Annual yield of 1 kWp under the reference irradiance profile (kWh/kWp/year).
///
/// This is a calibration assumption of the model, not a physical constant:
/// the monthly irradiance weights only shape the year, this value scales it.
pub const KWH_PER_KWP_YEAR: f64 = 1000.0;

/// Monthly mean horizontal irradiance for Germany (kWh/m²/day).
const IRRADIANCE: [f64; MONTHS] = [
    0.83, 1.54, 2.56, 3.75, 4.81, 5.16, 5.33, 4.98, 3.42, 2.07, 1.02, 0.70,
];

/// Non-leap calendar.
const DAYS_IN_MONTH: [u32; MONTHS] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Raw seasonal consumption factors, higher in winter (heating, lighting).
const SEASONAL_FACTORS: [f64; MONTHS] = [
    0.095, 0.085, 0.09, 0.08, 0.08, 0.075, 0.075, 0.075, 0.08, 0.085, 0.095, 0.105,
];

const LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Reference data for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyReferenceRow {
    /// Short month label.
    pub label: &'static str,
    /// Relative solar resource of the month.
    pub irradiance_weight: f64,
    /// Days in the month (non-leap year).
    pub days_in_month: u32,
    /// Share of annual consumption falling into this month; all twelve sum to 1.0.
    pub seasonal_consumption_weight: f64,
    /// PV yield per installed kWp in this month (kWh/kWp).
    pub kwh_per_kwp: f64,
}

static TABLE: LazyLock<[MonthlyReferenceRow; MONTHS]> = LazyLock::new(build_table);

fn build_table() -> [MonthlyReferenceRow; MONTHS] {
    let seasonal_sum: f64 = SEASONAL_FACTORS.iter().sum();
    let irradiance_sum: f64 = IRRADIANCE.iter().sum();

    std::array::from_fn(|i| MonthlyReferenceRow {
        label: LABELS[i],
        irradiance_weight: IRRADIANCE[i],
        days_in_month: DAYS_IN_MONTH[i],
        seasonal_consumption_weight: SEASONAL_FACTORS[i] / seasonal_sum,
        kwh_per_kwp: KWH_PER_KWP_YEAR * IRRADIANCE[i] / irradiance_sum,
    })
}

/// All twelve months, January first.
pub fn rows() -> &'static [MonthlyReferenceRow; MONTHS] {
    &TABLE
}

/// Reference row for month index `index` (0 = January).
///
/// # Panics
///
/// Panics if `index >= MONTHS`.
pub fn month(index: usize) -> &'static MonthlyReferenceRow {
    &TABLE[index]
}

/// PV yield per installed kWp for month index `index` (kWh/kWp).
pub fn kwh_per_kwp(index: usize) -> f64 {
    month(index).kwh_per_kwp
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn seasonal_weights_sum_to_one() {
        let sum: f64 = rows().iter().map(|r| r.seasonal_consumption_weight).sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn yield_per_kwp_sums_to_calibration() {
        let sum: f64 = (0..MONTHS).map(kwh_per_kwp).sum();
        assert_abs_diff_eq!(sum, KWH_PER_KWP_YEAR, epsilon = 1e-9);
    }

    #[test]
    fn february_has_28_days() {
        assert_eq!(month(1).days_in_month, 28);
        let total: u32 = rows().iter().map(|r| r.days_in_month).sum();
        assert_eq!(total, 365);
    }

    #[test]
    fn july_yields_most_and_december_least() {
        let best = (0..MONTHS)
            .max_by(|&a, &b| kwh_per_kwp(a).total_cmp(&kwh_per_kwp(b)))
            .unwrap();
        let worst = (0..MONTHS)
            .min_by(|&a, &b| kwh_per_kwp(a).total_cmp(&kwh_per_kwp(b)))
            .unwrap();
        assert_eq!(month(best).label, "Jul");
        assert_eq!(month(worst).label, "Dec");
    }

    #[test]
    fn all_weights_positive() {
        for row in rows() {
            assert!(row.irradiance_weight > 0.0, "{}", row.label);
            assert!(row.seasonal_consumption_weight > 0.0, "{}", row.label);
        }
    }

    #[test]
    fn repeated_access_returns_same_table() {
        assert!(std::ptr::eq(rows(), rows()));
    }
}
