// system-tests/tests/suites/lifecycle.rs
// ============================================================================
// Module: Lifecycle Suite
// Description: Full seven-step scenario runs against the story stub.
// Purpose: Prove the happy path end to end, including the CLI surface.
// Dependencies: system-tests helpers, storyspoiler-client, storyspoiler-core
// ============================================================================

//! Hermetic lifecycle coverage: the built-in scenario against a loopback
//! stub, the captured-identifier thread into the delete route, and the CLI
//! `run` and `steps` commands end to end.

use std::time::Duration;

use helpers::artifacts::TestReporter;
use helpers::cli::cli_binary;
use helpers::cli::run_cli;
use helpers::cli::write_stub_config;
use helpers::readiness::wait_for_stub_ready;
use helpers::story_stub::spawn_story_stub;
use helpers::timeouts::resolve_timeout;
use storyspoiler_client::Credentials;
use storyspoiler_client::run_scenario;
use storyspoiler_core::ScenarioReport;
use storyspoiler_core::story_lifecycle_suite;
use url::Url;

use crate::helpers;

const RUN_TIMEOUT: Duration = Duration::from_secs(10);
const READY_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_passes_against_stub() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("full_lifecycle_passes_against_stub")?;
    let stub = spawn_story_stub().await?;
    wait_for_stub_ready(stub.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let base_url = Url::parse(stub.base_url())?;
    let credentials = Credentials::new("reex", "qwerty123")?;
    let spec = story_lifecycle_suite();
    let report = run_scenario(&base_url, &credentials, RUN_TIMEOUT, &spec).await?;

    if !report.passed() {
        let failed: Vec<&str> =
            report.failures().iter().map(|step| step.name.as_str()).collect();
        return Err(format!("lifecycle steps failed: {}", failed.join(", ")).into());
    }
    if report.steps.len() != 7 {
        return Err(format!("expected 7 steps, got {}", report.steps.len()).into());
    }

    let Some(captured) = report.steps[0].captured_id.clone() else {
        return Err("create step captured no story identifier".into());
    };
    let delete_path = format!("/api/Story/Delete/{captured}");
    let requests = stub.requests();
    if !requests.iter().any(|request| request.method == "DELETE" && request.path == delete_path)
    {
        return Err(format!("no delete request for captured id at {delete_path}").into());
    }

    let unauthorized: Vec<String> = stub
        .story_requests()
        .iter()
        .filter(|request| !request.authorized)
        .map(|request| format!("{} {}", request.method, request.path))
        .collect();
    if !unauthorized.is_empty() {
        return Err(
            format!("story requests without bearer token: {}", unauthorized.join(", ")).into()
        );
    }
    if stub.story_count() != 0 {
        return Err(
            format!("stub still stores {} stories after the run", stub.story_count()).into()
        );
    }

    reporter.artifacts().write_json("report.json", &report)?;
    reporter.artifacts().write_json("stub_requests.json", &requests)?;
    reporter.finish(
        "pass",
        vec!["seven-step lifecycle passed against the stub".to_string()],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "report.json".to_string(),
            "stub_requests.json".to_string(),
        ],
    )?;
    drop(reporter);
    drop(stub);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_run_writes_report_and_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("cli_run_writes_report_and_exits_zero")?;
    let stub = spawn_story_stub().await?;
    wait_for_stub_ready(stub.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let Some(binary) = cli_binary() else {
        return Err("storyspoiler binary not found".into());
    };
    let dir = tempfile::tempdir()?;
    let config_path = write_stub_config(dir.path(), stub.base_url())?;
    let report_path = dir.path().join("report.json");

    let config_arg = config_path.to_string_lossy().to_string();
    let report_arg = report_path.to_string_lossy().to_string();
    let output = run_cli(&binary, &["run", "--config", &config_arg, "--report", &report_arg])?;
    if output.status.code() != Some(0) {
        return Err(format!(
            "expected exit code 0, got {:?}; stderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if !stdout.contains("scenario story-lifecycle: passed (7/7 steps)") {
        return Err(format!("stdout missing pass summary: {stdout}").into());
    }

    let report_bytes = std::fs::read(&report_path)?;
    let report: ScenarioReport = serde_json::from_slice(&report_bytes)?;
    if !report.passed() || report.steps.len() != 7 {
        return Err("report artifact does not describe a passing seven-step run".into());
    }

    reporter.artifacts().write_text("cli_stdout.txt", &stdout)?;
    reporter.finish(
        "pass",
        vec!["CLI run passed against the stub".to_string()],
        vec!["summary.json".to_string(), "summary.md".to_string(), "cli_stdout.txt".to_string()],
    )?;
    drop(reporter);
    drop(stub);
    Ok(())
}

#[test]
fn cli_steps_prints_the_scenario_table() -> Result<(), Box<dyn std::error::Error>> {
    let Some(binary) = cli_binary() else {
        return Err("storyspoiler binary not found".into());
    };
    let output = run_cli(&binary, &["steps"])?;
    if output.status.code() != Some(0) {
        return Err(format!("expected exit code 0, got {:?}", output.status.code()).into());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    for needle in [
        "scenario: story-lifecycle",
        "create-missing-fields",
        "/api/Story/Delete/42442",
        "expect 404",
    ] {
        if !stdout.contains(needle) {
            return Err(format!("steps table missing {needle:?}: {stdout}").into());
        }
    }
    Ok(())
}
