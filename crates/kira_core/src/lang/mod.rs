//! Kira language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`, `BinaryOp`) and look up spellings and metadata
//! via registry tables instead of comparing strings at every use site.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings, precedence and legality tables.
//!
//! ## Examples
//! ```rust
//! use kira_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! ```

pub mod intrinsics;
pub mod keywords;
pub mod modifiers;
pub mod operators;
pub mod precedence;
pub mod punctuation;
pub mod registry;
