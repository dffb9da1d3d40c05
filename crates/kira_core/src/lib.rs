//! Provide the canonical language vocabulary for the Kira front end.
//!
//! This crate is intentionally small and dependency-free. It holds the const registries that both the lexer and the
//! parser consult: reserved words, fixed operator and punctuation spellings, binary/unary operator precedence, the
//! modifier context table and the intrinsic table.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global mutable state, and no AST types.
//! - Every table is read-only, so any number of lexers/parsers may consult it concurrently.

pub mod lang;
