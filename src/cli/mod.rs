//! CLI module for gentests
//!
//! ## Usage
//!
//! `gentests [--only REGEX] [--excl REGEX] [--exported] [--all] [-i] [-w] [PATH]...`
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Flags map one-to-one onto
//! [`crate::process::Options`]; validation (including "no criterion selected" and "no paths") happens in
//! [`crate::process::run`], which reports on stdout. Only the top-level `run()` function handles errors and
//! exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::engine::RustTestGenerator;
use crate::process::{self as batch, Options};
use crate::version::GENTESTS_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate table-driven unit test skeletons for Rust source files
#[derive(Parser, Debug)]
#[command(name = "gentests")]
#[command(version = GENTESTS_VERSION)]
#[command(about = "Generate table-driven unit test skeletons for Rust source files", long_about = None)]
pub struct Cli {
    /// Source files or directories to generate tests for
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Only generate tests for functions whose name matches REGEX
    #[arg(long = "only", value_name = "REGEX", default_value = "")]
    pub only: String,

    /// Skip functions whose name matches REGEX
    #[arg(long = "excl", value_name = "REGEX", default_value = "")]
    pub excl: String,

    /// Only generate tests for exported (`pub`) functions
    #[arg(long)]
    pub exported: bool,

    /// Generate tests for all functions
    #[arg(long)]
    pub all: bool,

    /// Print test inputs in failing assertions
    #[arg(short = 'i', long = "print-inputs")]
    pub print_inputs: bool,

    /// Write output to the test file instead of stdout
    #[arg(short = 'w', long = "write")]
    pub write: bool,
}

impl Cli {
    /// Map parsed flags onto run options.
    pub fn options(&self) -> Options {
        Options::new()
            .with_only_funcs(self.only.clone())
            .with_excl_funcs(self.excl.clone())
            .with_exported_funcs(self.exported)
            .with_all_funcs(self.all)
            .with_print_inputs(self.print_inputs)
            .with_write_output(self.write)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        if !e.message.is_empty() {
            eprintln!("{}", e.message);
        }
        process::exit(e.exit_code.0);
    }
}

/// Execute a parsed command line against stdout and the default engine.
///
/// Per-path problems are reported on stdout and still succeed; only a failing stdout is an error.
fn execute(cli: Cli) -> CliResult<()> {
    let options = cli.options();
    let generator = RustTestGenerator::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    batch::run(&mut out, &cli.paths, &options, &generator).map_err(sink_error)?;
    out.flush().map_err(sink_error)
}

fn sink_error(e: io::Error) -> CliError {
    CliError::failure(format!("Error writing output: {e}"))
}

// ============================================================================
// Tests
// ============================================================================
