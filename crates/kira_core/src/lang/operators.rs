//! Operator vocabulary.
//!
//! This module defines every operator spelling the lexer resolves at the lex site, together with a coarse category
//! and whether it may appear in prefix position.
//!
//! ## Notes
//! - The closing angle bracket is registered **only** as the single-character [`OperatorId::Gt`]. Runs such as `>>`,
//!   `>>>`, `>=` and `>>=` are never lexed as one token; the parser assembles them from consecutive `>` tokens (see
//!   [`crate::lang::precedence`]). The opening side (`<`, `<=`, `<<`, `<<=`) is unambiguous and lexed greedily.
//! - Binding strength is not stored here; operators map onto [`crate::lang::precedence::BinaryOp`] for that.
//!
//! ## Examples
//! ```rust
//! use kira_core::lang::operators::{self, OperatorCategory, OperatorId};
//!
//! assert_eq!(operators::from_str("<<="), Some(OperatorId::ShlEq));
//! assert_eq!(operators::category(OperatorId::ShlEq), OperatorCategory::CompoundAssignment);
//! assert_eq!(operators::from_str(">>"), None);
//! ```

use super::registry::Since;

/// Stable identifier for every lexed operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    /// A single `>`; also closes generic argument lists.
    Gt,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,

    // Access / ranges
    Dot,
    DotDot,
}

/// Coarse operator grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    Arithmetic,
    Comparison,
    Logical,
    Bitwise,
    Assignment,
    CompoundAssignment,
    Access,
    Range,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub category: OperatorCategory,
    /// Whether the operator may start a unary prefix expression.
    pub prefix: bool,
    pub since: Since,
}

/// Registry of all lexed operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", OperatorCategory::Arithmetic, true),
    op(OperatorId::Minus, "-", OperatorCategory::Arithmetic, true),
    op(OperatorId::Star, "*", OperatorCategory::Arithmetic, false),
    op(OperatorId::Slash, "/", OperatorCategory::Arithmetic, false),
    op(OperatorId::Percent, "%", OperatorCategory::Arithmetic, false),
    // Comparison
    op(OperatorId::EqEq, "==", OperatorCategory::Comparison, false),
    op(OperatorId::NotEq, "!=", OperatorCategory::Comparison, false),
    op(OperatorId::Lt, "<", OperatorCategory::Comparison, false),
    op(OperatorId::LtEq, "<=", OperatorCategory::Comparison, false),
    op(OperatorId::Gt, ">", OperatorCategory::Comparison, false),
    // Logical
    op(OperatorId::AndAnd, "&&", OperatorCategory::Logical, false),
    op(OperatorId::OrOr, "||", OperatorCategory::Logical, false),
    op(OperatorId::Bang, "!", OperatorCategory::Logical, true),
    // Bitwise
    op(OperatorId::Amp, "&", OperatorCategory::Bitwise, false),
    op(OperatorId::Pipe, "|", OperatorCategory::Bitwise, false),
    op(OperatorId::Caret, "^", OperatorCategory::Bitwise, false),
    op(OperatorId::Tilde, "~", OperatorCategory::Bitwise, true),
    op(OperatorId::Shl, "<<", OperatorCategory::Bitwise, false),
    // Assignment
    op(OperatorId::Eq, "=", OperatorCategory::Assignment, false),
    op(OperatorId::PlusEq, "+=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::MinusEq, "-=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::StarEq, "*=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::SlashEq, "/=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::PercentEq, "%=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::AmpEq, "&=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::PipeEq, "|=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::CaretEq, "^=", OperatorCategory::CompoundAssignment, false),
    op(OperatorId::ShlEq, "<<=", OperatorCategory::CompoundAssignment, false),
    // Access / ranges
    op(OperatorId::Dot, ".", OperatorCategory::Access, false),
    op(OperatorId::DotDot, "..", OperatorCategory::Range, false),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Category.
pub fn category(id: OperatorId) -> OperatorCategory {
    info_for(id).category
}

/// Whether `id` can open a unary prefix expression.
pub fn is_prefix(id: OperatorId) -> bool {
    info_for(id).prefix
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Lookup by exact spelling.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, category: OperatorCategory, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        category,
        prefix,
        since: Since(0, 1),
    }
}
