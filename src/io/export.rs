//! CSV export for monthly simulation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::MonthlyResult;

/// Column header for the monthly CSV export.
pub const HEADER: &str = "month,generation_kwh,consumption_kwh,\
                          self_use_no_battery_kwh,export_no_battery_kwh,grid_purchase_no_battery_kwh,\
                          self_use_with_battery_kwh,export_with_battery_kwh,grid_purchase_with_battery_kwh";

/// Exports monthly results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per month in the order
/// given. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(months: &[MonthlyResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(months, buf)
}

/// Writes monthly results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(months: &[MonthlyResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for m in months {
        wtr.write_record(&[
            m.month.clone(),
            format!("{:.3}", m.generation_kwh),
            format!("{:.3}", m.consumption_kwh),
            format!("{:.3}", m.no_battery.self_use_kwh),
            format!("{:.3}", m.no_battery.export_kwh),
            format!("{:.3}", m.no_battery.grid_purchase_kwh),
            format!("{:.3}", m.with_battery.self_use_kwh),
            format!("{:.3}", m.with_battery.export_kwh),
            format!("{:.3}", m.with_battery.grid_purchase_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
