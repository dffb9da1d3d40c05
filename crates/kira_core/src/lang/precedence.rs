//! Binary and unary operator precedence.
//!
//! Precedence is a relative ordering where higher binds tighter. The parser's precedence-climbing loop recurses on
//! the right-hand side with `precedence + 1`, so every binary operator here is left-associative.
//!
//! | prec | operators                         |
//! |------|-----------------------------------|
//! | 14   | `.` `::` `..`                     |
//! | 13   | unary `-` `+` `!` `~`             |
//! | 12   | `*` `/` `%`                       |
//! | 11   | `+` `-`                           |
//! | 10   | `<<` `>>` `>>>`                   |
//! | 9    | `<` `<=` `>` `>=` `is` `as`       |
//! | 8    | `==` `!=`                         |
//! | 7    | `&`                               |
//! | 6    | `^`                               |
//! | 5    | `\|`                              |
//! | 4    | `&&`                              |
//! | 3    | `\|\|`                            |
//!
//! ## Notes
//! - [`BinaryOp::Shr`], [`BinaryOp::UShr`] and [`BinaryOp::Ge`] have no single lexed spelling. The parser builds them
//!   from runs of `>` tokens and maps the result here.
//! - Four operators carry a [`BinaryShape`] other than `Generic`; the parser builds a dedicated node for them.

use std::fmt;

use super::keywords::KeywordId;
use super::operators::OperatorId;
use super::punctuation::PunctuationId;

/// Binding strength of every unary prefix operator.
pub const UNARY_PRECEDENCE: u8 = 13;

/// Every binary operator the expression grammar knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    BitAnd,
    BitOr,
    Xor,
    Shl,
    Shr,
    UShr,
    Member,
    Scope,
    Range,
    TypeCheck,
    TypeCast,
}

impl BinaryOp {
    /// All binary operators, in table order.
    pub const ALL: [BinaryOp; 24] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::Xor,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::UShr,
        BinaryOp::Member,
        BinaryOp::Scope,
        BinaryOp::Range,
        BinaryOp::TypeCheck,
        BinaryOp::TypeCast,
    ];
}

/// Which node shape the parser builds for a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryShape {
    /// `lhs op rhs` with an expression on both sides.
    Generic,
    /// `lhs.name` or `lhs::name`.
    Member,
    /// `lhs..rhs`.
    Range,
    /// `lhs is Type`; the right side is a type.
    TypeCheck,
    /// `lhs as Type`; the right side is a type.
    TypeCast,
}

/// Metadata for a binary operator.
#[derive(Debug, Clone, Copy)]
pub struct BinaryOpInfo {
    pub op: BinaryOp,
    pub spelling: &'static str,
    /// Upper-case tag used by tree dumps (`ADD`, `USHR`, ...).
    pub name: &'static str,
    pub precedence: u8,
    pub shape: BinaryShape,
}

/// Precedence table for binary operators.
pub const BINARY_OPS: &[BinaryOpInfo] = &[
    bin(BinaryOp::Member, ".", "DOT", 14, BinaryShape::Member),
    bin(BinaryOp::Scope, "::", "SCOPE", 14, BinaryShape::Member),
    bin(BinaryOp::Range, "..", "RANGE", 14, BinaryShape::Range),
    bin(BinaryOp::Mul, "*", "MUL", 12, BinaryShape::Generic),
    bin(BinaryOp::Div, "/", "DIV", 12, BinaryShape::Generic),
    bin(BinaryOp::Mod, "%", "MOD", 12, BinaryShape::Generic),
    bin(BinaryOp::Add, "+", "ADD", 11, BinaryShape::Generic),
    bin(BinaryOp::Sub, "-", "SUB", 11, BinaryShape::Generic),
    bin(BinaryOp::Shl, "<<", "SHL", 10, BinaryShape::Generic),
    bin(BinaryOp::Shr, ">>", "SHR", 10, BinaryShape::Generic),
    bin(BinaryOp::UShr, ">>>", "USHR", 10, BinaryShape::Generic),
    bin(BinaryOp::Lt, "<", "LST", 9, BinaryShape::Generic),
    bin(BinaryOp::Le, "<=", "LTE", 9, BinaryShape::Generic),
    bin(BinaryOp::Gt, ">", "GRT", 9, BinaryShape::Generic),
    bin(BinaryOp::Ge, ">=", "GTE", 9, BinaryShape::Generic),
    bin(BinaryOp::TypeCheck, "is", "IS", 9, BinaryShape::TypeCheck),
    bin(BinaryOp::TypeCast, "as", "AS", 9, BinaryShape::TypeCast),
    bin(BinaryOp::Eq, "==", "EQL", 8, BinaryShape::Generic),
    bin(BinaryOp::NotEq, "!=", "NEQ", 8, BinaryShape::Generic),
    bin(BinaryOp::BitAnd, "&", "BIT_AND", 7, BinaryShape::Generic),
    bin(BinaryOp::Xor, "^", "XOR", 6, BinaryShape::Generic),
    bin(BinaryOp::BitOr, "|", "BIT_OR", 5, BinaryShape::Generic),
    bin(BinaryOp::And, "&&", "AND", 4, BinaryShape::Generic),
    bin(BinaryOp::Or, "||", "OR", 3, BinaryShape::Generic),
];

/// Table lookup that reports a miss instead of panicking.
///
/// The parser turns a miss into an internal diagnostic; a miss means the table above is incomplete.
pub fn lookup(op: BinaryOp) -> Option<&'static BinaryOpInfo> {
    BINARY_OPS.iter().find(|info| info.op == op)
}

/// Full metadata.
///
/// ## Panics
/// - If the table is missing an entry for `op` (this indicates a programming error).
pub fn info_for(op: BinaryOp) -> &'static BinaryOpInfo {
    lookup(op).expect("binary operator info missing")
}

pub fn precedence(op: BinaryOp) -> u8 {
    info_for(op).precedence
}

pub fn shape(op: BinaryOp) -> BinaryShape {
    info_for(op).shape
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(info_for(*self).spelling)
    }
}

/// Map a single lexed operator to the binary operator it starts.
///
/// `>` maps to [`BinaryOp::Gt`] here; whether it is really the head of `>>`, `>>>` or `>=` is decided by the parser
/// before it consults this function.
pub fn binary_from_operator(id: OperatorId) -> Option<BinaryOp> {
    Some(match id {
        OperatorId::Plus => BinaryOp::Add,
        OperatorId::Minus => BinaryOp::Sub,
        OperatorId::Star => BinaryOp::Mul,
        OperatorId::Slash => BinaryOp::Div,
        OperatorId::Percent => BinaryOp::Mod,
        OperatorId::EqEq => BinaryOp::Eq,
        OperatorId::NotEq => BinaryOp::NotEq,
        OperatorId::Lt => BinaryOp::Lt,
        OperatorId::LtEq => BinaryOp::Le,
        OperatorId::Gt => BinaryOp::Gt,
        OperatorId::AndAnd => BinaryOp::And,
        OperatorId::OrOr => BinaryOp::Or,
        OperatorId::Amp => BinaryOp::BitAnd,
        OperatorId::Pipe => BinaryOp::BitOr,
        OperatorId::Caret => BinaryOp::Xor,
        OperatorId::Shl => BinaryOp::Shl,
        OperatorId::Dot => BinaryOp::Member,
        OperatorId::DotDot => BinaryOp::Range,
        _ => return None,
    })
}

/// Map a word operator keyword (`is`, `as`) to its binary operator.
pub fn binary_from_keyword(id: KeywordId) -> Option<BinaryOp> {
    match id {
        KeywordId::Is => Some(BinaryOp::TypeCheck),
        KeywordId::As => Some(BinaryOp::TypeCast),
        _ => None,
    }
}

/// Map punctuation that acts as a binary operator (`::`).
pub fn binary_from_punctuation(id: PunctuationId) -> Option<BinaryOp> {
    match id {
        PunctuationId::ColonColon => Some(BinaryOp::Scope),
        _ => None,
    }
}

/// The arithmetic/bitwise operator a lexed compound assignment applies.
///
/// ## Returns
/// - `None` for anything that is not a lexed compound assignment. `>>=` and `>>>=` are never lexed as one token and
///   are handled by the parser directly.
pub fn compound_base(id: OperatorId) -> Option<BinaryOp> {
    Some(match id {
        OperatorId::PlusEq => BinaryOp::Add,
        OperatorId::MinusEq => BinaryOp::Sub,
        OperatorId::StarEq => BinaryOp::Mul,
        OperatorId::SlashEq => BinaryOp::Div,
        OperatorId::PercentEq => BinaryOp::Mod,
        OperatorId::AmpEq => BinaryOp::BitAnd,
        OperatorId::PipeEq => BinaryOp::BitOr,
        OperatorId::CaretEq => BinaryOp::Xor,
        OperatorId::ShlEq => BinaryOp::Shl,
        _ => return None,
    })
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn spelling(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }

    /// Upper-case tag used by tree dumps.
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "NEG",
            UnaryOp::Plus => "POS",
            UnaryOp::Not => "NOT",
            UnaryOp::BitNot => "BIT_NOT",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

pub fn unary_from_operator(id: OperatorId) -> Option<UnaryOp> {
    match id {
        OperatorId::Minus => Some(UnaryOp::Neg),
        OperatorId::Plus => Some(UnaryOp::Plus),
        OperatorId::Bang => Some(UnaryOp::Not),
        OperatorId::Tilde => Some(UnaryOp::BitNot),
        _ => None,
    }
}

const fn bin(op: BinaryOp, spelling: &'static str, name: &'static str, precedence: u8, shape: BinaryShape) -> BinaryOpInfo {
    BinaryOpInfo {
        op,
        spelling,
        name,
        precedence,
        shape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_binds_tighter_than_comparison_and_logic() {
        assert!(precedence(BinaryOp::Mul) > precedence(BinaryOp::Add));
        assert!(precedence(BinaryOp::Add) > precedence(BinaryOp::Lt));
        assert!(precedence(BinaryOp::Lt) > precedence(BinaryOp::Eq));
        assert!(precedence(BinaryOp::Eq) > precedence(BinaryOp::And));
        assert!(precedence(BinaryOp::And) > precedence(BinaryOp::Or));
    }

    #[test]
    fn unary_binds_tighter_than_every_generic_binary_operator() {
        for info in BINARY_OPS.iter().filter(|i| i.shape == BinaryShape::Generic) {
            assert!(UNARY_PRECEDENCE > info.precedence, "{} binds too tightly", info.spelling);
        }
    }

    #[test]
    fn shifts_share_one_level() {
        assert_eq!(precedence(BinaryOp::Shl), precedence(BinaryOp::Shr));
        assert_eq!(precedence(BinaryOp::Shr), precedence(BinaryOp::UShr));
        assert_eq!(info_for(BinaryOp::Shl).name, "SHL");
        assert_eq!(info_for(BinaryOp::Shr).name, "SHR");
    }

    #[test]
    fn every_compound_assignment_has_a_base_operator() {
        use crate::lang::operators::{OPERATORS, OperatorCategory};
        for info in OPERATORS.iter().filter(|o| o.category == OperatorCategory::CompoundAssignment) {
            assert!(compound_base(info.id).is_some(), "{} has no base operator", info.spelling);
        }
    }
}
