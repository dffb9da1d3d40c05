//! CLI module for the Kira front end
//!
//! ## Commands
//!
//! - `tokens <file>` - Dump the token stream
//! - `ast <file>` - Print the parsed tree
//! - `check <file>` - Parse only; report the first diagnostic
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use kira_syntax::diagnostics::DiagnosticStyle;
use kira_syntax::token_buffer::DEFAULT_WINDOW_SIZE;

use crate::config::KiraConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Front end for the Kira programming language
#[derive(Parser, Debug)]
#[command(name = "kira")]
#[command(version = VERSION)]
#[command(about = "Lex and parse Kira source files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: GlobalOptions,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Lookahead window of the token buffer (power of two, 4..=64)
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Draw diagnostic underlines with Unicode arrows
    #[arg(long, global = true)]
    pub unicode: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Feed the file to the lexer without stripping comments
    #[arg(long = "no-preprocess", global = true)]
    pub no_preprocess: bool,
}

impl GlobalOptions {
    /// The configuration these flags describe.
    pub fn to_config(&self) -> KiraConfig {
        let style = if self.unicode {
            DiagnosticStyle::Unicode
        } else {
            DiagnosticStyle::Ascii
        };
        KiraConfig::new()
            .with_window_size(self.window_size)
            .with_diagnostic_style(style)
            .with_verbose(self.verbose)
            .with_strip_comments(!self.no_preprocess)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream of a file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the syntax tree of a file
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a file and report the first error
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run(cli: Cli) {
    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.options.to_config();
    config
        .validate()
        .map_err(|e| CliError::failure(format!("error: {e}")))?;
    tracing::debug!(?config, "configuration");

    match cli.command {
        Command::Tokens { file } => commands::tokens_file(&file, &config),
        Command::Ast { file } => commands::ast_file(&file, &config),
        Command::Check { file } => commands::check_file(&file, &config),
    }
}

// ============================================================================
// Tests
// ============================================================================
