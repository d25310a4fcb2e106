use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get path to test fixtures
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[allow(deprecated)]
fn sitecheck() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin("sitecheck"))
}

/// Absent scores must not count towards a category's denominator
#[test]
fn test_summarize_averages_present_scores_only() {
    use sitecheck_core::lighthouse::CategoryKey;

    let summary =
        sitecheck_cli::commands::lighthouse::summarize(&fixture_path("lighthouse")).unwrap();

    // manifest.json is not a report
    assert_eq!(summary.reports_analyzed, 3);

    let performance = summary.scores.get(CategoryKey::Performance).unwrap();
    assert!((performance.average - 0.9).abs() < 1e-9);
    assert_eq!(performance.samples, 2);
    assert_eq!(performance.range_label(), "80%-100%");

    let accessibility = summary.scores.get(CategoryKey::Accessibility).unwrap();
    assert_eq!(accessibility.samples, 3);
}

#[test]
fn test_summarize_ranks_opportunities_by_average_savings() {
    let summary =
        sitecheck_cli::commands::lighthouse::summarize(&fixture_path("lighthouse")).unwrap();

    let ids: Vec<&str> = summary
        .opportunities
        .iter()
        .map(|o| o.audit_id.as_str())
        .collect();
    assert_eq!(ids, vec!["unused-javascript", "render-blocking-resources"]);
    assert_eq!(summary.opportunities[0].average_savings_ms(), 350.0);
    assert_eq!(summary.opportunities[0].count, 2);

    let speed_index = summary
        .metrics
        .iter()
        .find(|m| m.audit_id == "speed-index")
        .unwrap();
    assert_eq!(speed_index.stats.as_ref().unwrap().samples, 1);
}

#[test]
fn test_lighthouse_command_prints_markdown() {
    let mut cmd = sitecheck();
    cmd.arg("lighthouse").arg("--dir").arg(fixture_path("lighthouse"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "# 🚦 Lighthouse Report Summary (3 runs)",
        ))
        .stdout(predicate::str::contains("## 🟢 Overall Performance: 91%"))
        .stdout(predicate::str::contains("| Performance    | 🟢 90% | Excellent | 80%-100% |"))
        .stdout(predicate::str::contains("https://quickchart.io/chart?c="))
        .stdout(predicate::str::contains(
            "1. **Reduce unused JavaScript** - Potential savings: 350ms",
        ))
        .stdout(predicate::str::contains("*Commit: `"));
}

#[test]
fn test_lighthouse_command_json_format() {
    let mut cmd = sitecheck();
    cmd.arg("lighthouse")
        .arg("--dir")
        .arg(fixture_path("lighthouse"))
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["reports_analyzed"], 3);
    assert_eq!(json["scores"]["categories"][0]["category"], "performance");
    assert_eq!(json["scores"]["categories"][0]["samples"], 2);
}

#[test]
fn test_lighthouse_command_fails_without_reports() {
    let dir = TempDir::new().unwrap();

    let mut cmd = sitecheck();
    cmd.arg("lighthouse").arg("--dir").arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No Lighthouse JSON reports found"));
}

#[test]
fn test_lighthouse_dir_from_environment() {
    let mut cmd = sitecheck();
    cmd.arg("lighthouse")
        .env("SITECHECK_LIGHTHOUSE_DIR", fixture_path("lighthouse"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(3 runs)"));
}
