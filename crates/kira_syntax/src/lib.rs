//! Syntax front end for the Kira language: lexer, token buffer, prediction engine, parser, AST, diagnostics.
//!
//! Source text flows through the crate in one direction:
//!
//! ```text
//! &str ──► lexer::lex ──► Vec<Token> ──► TokenBuffer ──► parser::parse ──► ast::Program
//!                                              ▲                │
//!                                              └── prediction ──┘
//! ```
//!
//! ## Notes
//! - This crate is "syntax-only": no name resolution, no type checking.
//! - Every failure is a single fatal [`diagnostics::Diagnostic`]; there is no multi-error recovery.
//! - Each `Lexer`/`Parser` owns its own state. Files can be parsed on separate threads without locking because the
//!   only shared data is the read-only vocabulary in `kira_core::lang`.
//!
//! ## Examples
//! ```rust
//! use kira_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("module \"me:demo\"\nx: Int32 = 1 + 2\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.module().map(|m| m.author()), Some("me"));
//! assert_eq!(program.statements.len(), 2);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod prediction;
pub mod source;
pub mod token_buffer;
pub mod token_helpers;
