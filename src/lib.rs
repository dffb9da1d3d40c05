#![forbid(unsafe_code)]
//! Kira Programming Language Front End
//!
//! The syntax core lives in two workspace crates:
//!
//! - `kira_core` - language vocabulary (keywords, operators, precedence, modifiers, intrinsics)
//! - `kira_syntax` - lexer, token buffer, prediction engine, parser, AST and diagnostics
//!
//! This crate is the host around them: comment stripping, configuration, the AST tree printer and the `kira` CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: Registry lookups on closed enums (`info_for`) panic when a table entry is missing; that is
//!   a compiler bug, never a user error.

pub mod cli;
pub mod config;
pub mod preprocess;
pub mod printer;

pub use config::{ConfigError, KiraConfig};
pub use kira_syntax::{ast, diagnostics, lexer, parser};
pub use preprocess::{Preprocessed, strip_comments};
pub use printer::print_program;
