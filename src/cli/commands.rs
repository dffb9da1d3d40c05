//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Each command is split into a pure `*_source` function over a string (used by tests) and a `*_file` wrapper that
//! reads the file and prints.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use kira_syntax::ast::Program;
use kira_syntax::diagnostics::Diagnostic;
use kira_syntax::lexer::{self, Token};
use kira_syntax::parser;

use super::{CliError, CliResult, ExitCode};
use crate::config::KiraConfig;
use crate::preprocess;
use crate::printer;

// ============================================================================
// Pipeline
// ============================================================================

/// Read a source file.
fn read_source(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("error: cannot read '{}': {e}", path.display())))
}

/// Preprocess (when enabled) and lex.
pub fn lex_source(source: &str, config: &KiraConfig) -> Result<Vec<Token>, Diagnostic> {
    if config.strip_comments {
        lexer::lex(&preprocess::strip_comments(source).source)
    } else {
        lexer::lex(source)
    }
}

/// Preprocess, lex and parse with the configured token window.
pub fn parse_source(source: &str, config: &KiraConfig) -> Result<Program, Diagnostic> {
    let tokens = lex_source(source, config)?;
    parser::parse_with_window_size(&tokens, config.window_size)
        .map_err(|e| Diagnostic::internal("KiraConfig::window_size", e.to_string()))?
}

/// Turn a diagnostic into a CLI failure carrying the rendered report.
///
/// Rendering uses the original text: preprocessing keeps every line in place, so positions line up.
fn report(path: &Path, source: &str, diagnostic: &Diagnostic, config: &KiraConfig) -> CliError {
    tracing::debug!(tag = diagnostic.tag, kind = ?diagnostic.kind, "command failed");
    let rendered = diagnostic.render(source, config.diagnostic_style);
    CliError::failure(format!("{}: {}", path.display(), rendered.trim_end()))
}

// ============================================================================
// tokens
// ============================================================================

/// One line per token: `line:column  kind  text`.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let location = format!("{}:{}", token.position.line, token.position.column);
        let _ = writeln!(out, "{location:<8} {:<12} {:?}", token.kind.to_string(), token.text);
    }
    out
}

pub fn tokens_source(source: &str, config: &KiraConfig) -> Result<String, Diagnostic> {
    Ok(format_tokens(&lex_source(source, config)?))
}

/// Print the token stream of a file.
pub fn tokens_file(path: &Path, config: &KiraConfig) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let out = tokens_source(&source, config).map_err(|d| report(path, &source, &d, config))?;
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// ast
// ============================================================================

pub fn ast_source(source: &str, config: &KiraConfig) -> Result<String, Diagnostic> {
    Ok(printer::print_program(&parse_source(source, config)?))
}

/// Print the syntax tree of a file.
pub fn ast_file(path: &Path, config: &KiraConfig) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let out = ast_source(&source, config).map_err(|d| report(path, &source, &d, config))?;
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// check
// ============================================================================

/// Parse a file; succeed silently apart from a one-line summary.
pub fn check_file(path: &Path, config: &KiraConfig) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = parse_source(&source, config).map_err(|d| report(path, &source, &d, config))?;
    println!("{}: ok ({} statements)", path.display(), program.statements.len());
    Ok(ExitCode::SUCCESS)
}
