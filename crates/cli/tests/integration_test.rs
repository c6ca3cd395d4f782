use std::io::Write;
use std::process::Command;

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_insti-signal"));
    cmd.env("RUST_LOG", "warn").env_remove("INSTI_CONFIG");
    cmd
}

fn sample_input() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "time,open,high,low,close,volume,dxy").unwrap();
    for i in 0..30i64 {
        let open = 100.0 + (i % 4) as f64;
        writeln!(
            file,
            "{},{open},{},{},{},{},{}",
            1_704_117_600 + i * 900,
            open + 1.5,
            open - 1.0,
            open + 0.5,
            1_000 + i * 10,
            104.0 + i as f64 * 0.02
        )
        .unwrap();
    }
    file
}

#[test]
fn process_prints_summary_and_writes_csv() {
    let input = sample_input();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out_signals.csv");

    let result = binary()
        .args(["process", "--timeframe", "m15", "--input"])
        .arg(input.path())
        .arg("--output")
        .arg(&output)
        .output()
        .expect("Failed to run binary");

    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Latest Signal"));
    assert!(stdout.contains("Batch  30 bars"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 31);
    assert!(written.starts_with("time,open,high,low,close,volume,dxy_delta,dV,dP"));
}

#[test]
fn process_rejects_malformed_time() {
    let mut input = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(input, "time,open,high,low,close,volume").unwrap();
    writeln!(input, "2024-01-01T00:00:00Z,1,2,0.5,1.5,10").unwrap();
    writeln!(input, "not-a-date,1,2,0.5,1.5,10").unwrap();

    let result = binary()
        .args(["process", "--input"])
        .arg(input.path())
        .output()
        .expect("Failed to run binary");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("invalid time format found: not-a-date"));
}

#[test]
fn unknown_timeframe_is_a_usage_error() {
    let input = sample_input();
    let result = binary()
        .args(["process", "--timeframe", "d1", "--input"])
        .arg(input.path())
        .output()
        .expect("Failed to run binary");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Invalid timeframe"));
}

#[test]
fn config_prints_defaults_as_json() {
    let result = binary().arg("config").output().expect("Failed to run binary");
    assert!(result.status.success());

    let config: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(config["lookbacks"]["m1"], 24);
    assert_eq!(config["cross_asset"]["lag"], 12);
    assert_eq!(config["thresholds"]["buy"], 0.7);
}

#[test]
fn process_summary_reports_configured_thresholds() {
    let input = sample_input();
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[thresholds]\nbuy = 0.25\nsell = -0.4").unwrap();

    let result = binary()
        .args(["process", "--input"])
        .arg(input.path())
        .arg("--config")
        .arg(config.path())
        .output()
        .expect("Failed to run binary");

    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Thresholds: >= +0.25 -> BUY | <= -0.40 -> SELL"));
}
