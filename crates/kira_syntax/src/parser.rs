//! Parser for the Kira programming language
//!
//! Converts a token stream into an AST. The parser reads through a [`TokenBuffer`] and resolves the grammar's two
//! context-sensitive spots (runs of `>` and `name(` call-vs-declaration) with the prediction engine and bounded
//! lookahead.
//!
//! ## Examples
//!
//! ```rust
//! use kira_syntax::{ast::Statement, lexer, parser};
//!
//! let source = "module \"me:demo\"\nadd(a: Int32, b: Int32): Int32 { return a + b }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert!(matches!(program.statements[1].node, Statement::Decl(_)));
//! ```

use crate::ast::*;
use crate::diagnostics::{ContractViolation, Diagnostic};
use crate::lexer::{Token, TokenKind};
use crate::prediction::{Candidate, ParserState, PredictionStack, Speculative};
use crate::source::SourcePosition;
use crate::token_buffer::{Checkpoint, InvalidWindowSize, TokenBuffer};
use kira_core::lang::intrinsics;
use kira_core::lang::keywords::KeywordId;
use kira_core::lang::modifiers::{self, ModifierContext, ModifierId};
use kira_core::lang::operators::{self, OperatorCategory, OperatorId};
use kira_core::lang::precedence::{self, BinaryOp, BinaryShape, UNARY_PRECEDENCE};
use kira_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
