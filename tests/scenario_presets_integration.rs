use std::path::Path;
use std::process::Command;

use pv_battery_sim::config::ScenarioConfig;

#[derive(Debug)]
struct Figures {
    baseline_cost: f64,
    extra_savings: f64,
}

#[test]
fn scenario_files_match_builtin_presets() {
    for (path, preset) in [
        ("scenarios/default.toml", ScenarioConfig::default_household()),
        ("scenarios/no_battery.toml", ScenarioConfig::no_battery()),
        ("scenarios/large_array.toml", ScenarioConfig::large_array()),
        ("scenarios/evening_household.toml", ScenarioConfig::evening_household()),
    ] {
        let loaded = ScenarioConfig::from_toml_file(Path::new(path))
            .unwrap_or_else(|e| panic!("failed to load {path}: {e}"));
        assert_eq!(loaded, preset, "{path} drifted from its preset");
    }
}

#[test]
fn scenario_files_run_via_cli_and_differ() {
    let default = run_and_parse("scenarios/default.toml");
    let no_battery = run_and_parse("scenarios/no_battery.toml");
    let evening = run_and_parse("scenarios/evening_household.toml");

    assert!((default.baseline_cost - 1200.0).abs() < 0.01, "{default:?}");
    assert!(default.extra_savings > 0.0, "{default:?}");
    assert_eq!(no_battery.extra_savings, 0.0, "{no_battery:?}");
    assert!(
        evening.baseline_cost > default.baseline_cost,
        "expected higher baseline for evening household: default={:.2}, evening={:.2}",
        default.baseline_cost,
        evening.baseline_cost
    );
}

#[test]
fn unknown_preset_fails_with_exit_code_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-battery-sim"))
        .args(["--preset", "does_not_exist"])
        .output()
        .expect("pv-battery-sim process should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr={stderr}");
}

#[test]
fn json_output_is_parseable() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-battery-sim"))
        .args(["--preset", "large_array", "--json"])
        .output()
        .expect("pv-battery-sim process should run");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["summary"]["months"].as_array().map(Vec::len), Some(12));
    assert!(json["report"]["battery_payback_years"].is_number());
}

fn run_and_parse(path: &str) -> Figures {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-battery-sim"))
        .args(["--scenario", path])
        .output()
        .expect("pv-battery-sim process should run");

    assert!(
        output.status.success(),
        "scenario run failed for {path}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    Figures {
        baseline_cost: parse_metric(&stdout, "Baseline cost:", ""),
        extra_savings: parse_metric(&stdout, "Battery extra savings:", "per year"),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from report line `{line}`"))
}
