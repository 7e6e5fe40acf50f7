// storyspoiler-cli/src/main.rs
// ============================================================================
// Module: StorySpoiler CLI Entry Point
// Description: Command dispatcher for the story contract harness.
// Purpose: Run the built-in scenario against a deployment and report results.
// Dependencies: clap, serde_jcs, storyspoiler-client, storyspoiler-core, tokio
// ============================================================================

//! ## Overview
//! The StorySpoiler CLI loads target configuration, authenticates once, and
//! drives the built-in story lifecycle scenario step by step. Exit codes
//! separate the two failure tiers: fatal setup failures (configuration,
//! credentials, authentication) exit 2, step failures exit 1, a clean run
//! exits 0.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use storyspoiler_cli::config::StorySpoilerConfig;
use storyspoiler_cli::render::render_step_line;
use storyspoiler_cli::render::render_step_table;
use storyspoiler_cli::render::render_summary;
use storyspoiler_client::Credentials;
use storyspoiler_client::run_scenario_with_observer;
use storyspoiler_core::ScenarioObserver;
use storyspoiler_core::ScenarioReport;
use storyspoiler_core::StepReport;
use storyspoiler_core::story_lifecycle_suite;
use thiserror::Error;

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

/// Exit code when every step passes.
const EXIT_SUCCESS: u8 = 0;
/// Exit code when at least one step fails.
const EXIT_STEP_FAILURE: u8 = 1;
/// Exit code for fatal setup failures (configuration, authentication).
const EXIT_FATAL: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "storyspoiler", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the built-in story lifecycle scenario.
    Run(RunCommand),
    /// Print the built-in scenario step table.
    Steps,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to storyspoiler.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Optional output path for the canonical JSON report.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a message and the exit code to report.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Exit code reported to the shell.
    code: u8,
}

impl CliError {
    /// Constructs a fatal setup error (exit code 2).
    const fn fatal(message: String) -> Self {
        Self {
            message,
            code: EXIT_FATAL,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };
    match command {
        Commands::Run(command) => command_run(command).await,
        Commands::Steps => command_steps(),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = StorySpoilerConfig::load(command.config.as_deref())
        .map_err(|err| CliError::fatal(format!("config load failed: {err}")))?;
    let base_url = config
        .base_url()
        .map_err(|err| CliError::fatal(format!("config load failed: {err}")))?;
    let credentials = Credentials::new(&config.credentials.username, &config.credentials.password)
        .map_err(|err| CliError::fatal(format!("credentials rejected: {err}")))?;
    let spec = story_lifecycle_suite();

    write_stdout_line(&format!("target: {base_url}"))
        .map_err(|err| CliError::fatal(output_error("stdout", &err)))?;

    let observer = ConsoleObserver::new();
    let report =
        run_scenario_with_observer(&base_url, &credentials, config.timeout(), &spec, observer)
            .await
            .map_err(|err| CliError::fatal(format!("run aborted: {err}")))?;

    write_stdout_line(&render_summary(&report))
        .map_err(|err| CliError::fatal(output_error("stdout", &err)))?;

    if let Some(path) = &command.report {
        write_report(path, &report)?;
    }

    Ok(ExitCode::from(exit_code_for(&report)))
}

/// Maps a finished report to the process exit code.
fn exit_code_for(report: &ScenarioReport) -> u8 {
    if report.passed() { EXIT_SUCCESS } else { EXIT_STEP_FAILURE }
}

/// Writes the canonical JSON report to disk.
fn write_report(path: &Path, report: &ScenarioReport) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(report)
        .map_err(|err| CliError::fatal(format!("report serialization failed: {err}")))?;
    bytes.push(b'\n');
    fs::write(path, &bytes).map_err(|err| {
        CliError::fatal(format!("report write failed for {}: {err}", path.display()))
    })?;
    write_stdout_line(&format!("report written to {}", path.display()))
        .map_err(|err| CliError::fatal(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Steps Command
// ============================================================================

/// Executes the `steps` command.
fn command_steps() -> CliResult<ExitCode> {
    let table = render_step_table(&story_lifecycle_suite());
    write_stdout_bytes(table.as_bytes())
        .map_err(|err| CliError::fatal(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Console Observer
// ============================================================================

/// Progress observer printing one line per completed step.
struct ConsoleObserver {
    /// Step count of the running scenario, set at scenario start.
    total_steps: AtomicUsize,
}

impl ConsoleObserver {
    /// Creates an observer with no scenario attached yet.
    const fn new() -> Self {
        Self {
            total_steps: AtomicUsize::new(0),
        }
    }
}

impl ScenarioObserver for ConsoleObserver {
    fn scenario_started(&self, scenario: &str, total_steps: usize) {
        self.total_steps.store(total_steps, Ordering::Relaxed);
        let _ = write_stdout_line(&format!("scenario {scenario}: {total_steps} steps"));
    }

    fn step_completed(&self, report: &StepReport) {
        let total = self.total_steps.load(Ordering::Relaxed);
        let _ = write_stdout_line(&render_step_line(report, total));
    }

    fn scenario_finished(&self, _report: &ScenarioReport) {}
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::fatal(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::fatal(output_error("stdout", &err)))?;
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns its exit code.
fn emit_error(error: &CliError) -> ExitCode {
    let _ = write_stderr_line(&format!("error: {error}"));
    ExitCode::from(error.code)
}
