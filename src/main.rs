//! PV + battery simulator entry point: CLI wiring and scenario loading.

mod cli;

use std::io;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pv_battery_sim::config::ScenarioConfig;
use pv_battery_sim::io::export::export_csv;
use pv_battery_sim::report::build_monthly_table;
use pv_battery_sim::runner::run_scenario;

use crate::cli::Args;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let scenario = match load_scenario(&args) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let run = match run_scenario(&scenario) {
        Ok(run) => run,
        Err(errors) => {
            for e in &errors {
                eprintln!("error: {e}");
            }
            process::exit(1);
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&run).context("failed to encode results as JSON")?
        );
    } else {
        println!("{}", build_monthly_table(&run.summary));
        println!("\n{}", run.report);
    }

    if let Some(path) = &args.csv_out {
        export_csv(&run.summary.months, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "monthly results written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(pv_battery_sim::api::AppState {
            scenario,
            summary: run.summary,
            report: run.report,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(pv_battery_sim::api::serve(state, addr))
            .context("API server failed")?;
    }

    Ok(())
}

/// Resolves the scenario from `--scenario` or `--preset`, defaulting to the
/// `default` preset.
fn load_scenario(args: &Args) -> Result<ScenarioConfig, pv_battery_sim::config::ConfigError> {
    if let Some(path) = &args.scenario {
        info!(path = %path.display(), "loading scenario");
        return ScenarioConfig::from_toml_file(path);
    }
    let name = args.preset.as_deref().unwrap_or("default");
    info!(preset = name, "using preset");
    ScenarioConfig::from_preset(name)
}
