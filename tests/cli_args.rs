//! Integration tests for CLI argument handling
//!
//! Runs the binary offline (no --at, no key) and checks what it prints.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tacklor"))
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tacklor")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tacklor"), "Help should mention tacklor");
    assert!(stdout.contains("--expert"), "Help should mention --expert flag");
    assert!(stdout.contains("--preset"), "Help should mention --preset flag");
}

#[test]
fn test_invalid_water_type_prints_error_and_exits() {
    let output = run_cli(&["--water", "swimming_pool"]);
    assert!(!output.status.success(), "Expected invalid water type to fail");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid water type"),
        "Should print error message about invalid water type: {}",
        stderr
    );
}

#[test]
fn test_out_of_range_slider_is_rejected_by_clap() {
    let output = run_cli(&["--tide", "140"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("140"), "stderr: {}", stderr);
}

#[test]
fn test_text_report_for_night_on_the_coast() {
    let output = run_cli(&[
        "--month",
        "juin",
        "--time",
        "23:30",
        "--region",
        "Finistère",
        "--water",
        "jetty",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Finistère (Atlantique / Manche, littoral)"));
    assert!(stdout.contains("Juin 23:30 (Nuit"));
    assert!(stdout.contains("Poissons nocturnes : Calamar, Seiche"));
    assert!(stdout.contains("Marée"));
}

#[test]
fn test_json_report() {
    let output = run_cli(&["--json", "--month", "3", "--fish", "truite", "--region", "Cantal"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["conditions"]["period"], "Mars");
    assert_eq!(report["conditions"]["targetFish"], "truite");
    assert_eq!(report["derived"]["coastal"], false);
    assert_eq!(report["derived"]["zone"], "inland");
}

#[test]
fn test_refused_expert_is_reported_not_fatal() {
    let output = run_cli(&["--expert", "--region", "Var"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Mode expert refusé"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Niveau      : Débutant"));
}

#[test]
fn test_expert_granted_when_spot_is_described() {
    let output = run_cli(&[
        "--expert",
        "--region",
        "Var",
        "--water",
        "cliffs",
        "--bottom",
        "rock",
        "--wind-dir",
        "E",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Niveau      : Expert"));
}

#[test]
fn test_strategy_without_key_is_reported() {
    let output = run_cli(&["--strategy", "--water", "lake", "--bottom", "weed"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Stratégie indisponible"), "stderr: {}", stderr);
    assert!(stderr.contains("GEMINI_API_KEY"), "stderr: {}", stderr);
}

#[test]
fn test_strategy_requires_spot_description() {
    let output = run_cli(&["--strategy", "--api-key", "dummy"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("water type and a bottom type"), "stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use tacklor::cli::{parse_depth_arg, Cli, OutputFormat, StartupConfig};
    use tacklor::data::{DepthRange, Technique};

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::parse_from(["tacklor"]);
        assert!(cli.month.is_none());
        assert!(!cli.expert);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_technique_and_depth() {
        let cli = Cli::parse_from(["tacklor", "--technique", "appâts", "--depth", "3-12"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.update.technique, Some(Technique::NaturalBait));
        assert_eq!(config.update.depth, Some(DepthRange { min: 3, max: 12 }));
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_parse_depth_arg_rejects_inverted_range() {
        assert!(parse_depth_arg("12-3").is_err());
    }
}
