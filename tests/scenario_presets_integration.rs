use std::process::Command;

#[derive(Debug)]
struct Headline {
    lcoe_per_kwh: f64,
    breakeven_year: Option<u32>,
}

#[test]
fn scenario_files_run_via_cli_and_report_expected_breakeven() {
    let baseline = run_and_parse("scenarios/baseline.toml");
    let east_facing = run_and_parse("scenarios/east_facing.toml");
    let high_inflation = run_and_parse("scenarios/high_inflation.toml");

    assert_eq!(baseline.breakeven_year, Some(15), "baseline: {baseline:?}");
    assert_eq!(east_facing.breakeven_year, Some(9), "east_facing: {east_facing:?}");
    assert_eq!(
        high_inflation.breakeven_year,
        Some(14),
        "high_inflation: {high_inflation:?}"
    );

    assert!(
        (baseline.lcoe_per_kwh - 0.1067).abs() < 1e-4,
        "unexpected baseline LCOE {:.4}",
        baseline.lcoe_per_kwh
    );
    assert!(
        high_inflation.lcoe_per_kwh > baseline.lcoe_per_kwh,
        "higher investment should raise LCOE: baseline={:.4}, high_inflation={:.4}",
        baseline.lcoe_per_kwh,
        high_inflation.lcoe_per_kwh
    );
}

#[test]
fn conflicting_sources_exit_with_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-roi-sim"))
        .args(["--scenario", "scenarios/baseline.toml", "--preset", "baseline"])
        .output()
        .expect("pv-roi-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mutually exclusive"), "stderr: {stderr}");
}

#[test]
fn invalid_scenario_reports_field_and_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[finance]\nyearly_production_kwh = 0.0\n").expect("write scenario");

    let output = Command::new(env!("CARGO_BIN_EXE_pv-roi-sim"))
        .arg("--scenario")
        .arg(&path)
        .output()
        .expect("pv-roi-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("finance.yearly_production_kwh"),
        "stderr: {stderr}"
    );
}

#[cfg(feature = "tui")]
#[test]
fn tui_with_unknown_preset_exits_before_opening_the_terminal() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-roi-sim"))
        .args(["--tui", "--preset", "bogus"])
        .output()
        .expect("pv-roi-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

#[cfg(feature = "tui")]
#[test]
fn tui_with_invalid_scenario_reports_field_and_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[system]\ncapacity_kwp = -5.0\n").expect("write scenario");

    let output = Command::new(env!("CARGO_BIN_EXE_pv-roi-sim"))
        .arg("--tui")
        .arg("--scenario")
        .arg(&path)
        .output()
        .expect("pv-roi-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("system.capacity_kwp"), "stderr: {stderr}");
}

fn run_and_parse(path: &str) -> Headline {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-roi-sim"))
        .args(["--scenario", path])
        .output()
        .expect("pv-roi-sim process should run");

    assert!(
        output.status.success(),
        "scenario run failed for {path}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    let lcoe_raw = parse_field(&stdout, "LCOE:");
    let lcoe_per_kwh = lcoe_raw
        .trim_end_matches("/kWh")
        .trim()
        .parse::<f64>()
        .unwrap_or_else(|err| panic!("invalid LCOE value `{lcoe_raw}`: {err}"));
    let breakeven_raw = parse_field(&stdout, "Break-even year:");
    let breakeven_year = match breakeven_raw.as_str() {
        "none" => None,
        raw => Some(
            raw.parse::<u32>()
                .unwrap_or_else(|err| panic!("invalid break-even value `{raw}`: {err}")),
        ),
    };

    Headline {
        lcoe_per_kwh,
        breakeven_year,
    }
}

fn parse_field(stdout: &str, label: &str) -> String {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    line.split_once(':')
        .map(|(_, right)| right.trim().to_string())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"))
}
