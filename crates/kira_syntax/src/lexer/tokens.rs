//! Token types for the Kira lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words, including the literal words `true`, `false`, `null`
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation, including the statement terminator
//!
//! ## Notes
//! - Every token keeps its source text, so identifiers and literals carry no separate payload.
//! - Tokens are immutable once produced. The token buffer only indexes into the lexer's output.

use kira_core::lang::keywords::{self, KeywordId};
use kira_core::lang::operators::{self, OperatorId};
use kira_core::lang::punctuation::{self, PunctuationId};

use crate::source::SourcePosition;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    Ident,
    /// `@name`; the token text omits the `@`.
    IntrinsicIdent,
    Integer,
    Float,
    Str,

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    /// Fixed spelling for ID-based kinds.
    pub fn spelling(&self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword(id) => Some(keywords::as_str(*id)),
            TokenKind::Operator(id) => Some(operators::as_str(*id)),
            TokenKind::Punctuation(id) => Some(punctuation::as_str(*id)),
            _ => None,
        }
    }
}

/// A lexed token.
///
/// ## Notes
/// - `text` is the exact lexeme for symbols and identifiers, the unquoted body for strings and the decimal rendering
///   for integer literals (so `0xFF` carries `"255"`).
/// - `byte_offset` is where the lexeme starts in the (preprocessed) source and `len` is its length in bytes, quotes
///   and `0x` prefixes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub byte_offset: usize,
    pub len: usize,
    pub position: SourcePosition,
}

impl Token {
    /// A lexeme whose text comes from the source (identifiers, literals).
    pub fn raw(kind: TokenKind, text: impl Into<String>, byte_offset: usize, position: SourcePosition) -> Self {
        let text = text.into();
        Self {
            kind,
            len: text.len(),
            text,
            byte_offset,
            position,
        }
    }

    /// Override the lexeme length for tokens whose text is not the lexeme (strings, hex literals, intrinsics).
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Width of the source lexeme in characters.
    ///
    /// Only `text` can hold non-ASCII characters; quotes, `@` and `0x` digits are ASCII.
    pub fn width(&self) -> usize {
        self.len - (self.text.len() - self.text.chars().count())
    }

    /// A fixed symbol; single characters and linked sequences like `<<=` alike take their text from the registry.
    pub fn symbol(kind: TokenKind, byte_offset: usize, position: SourcePosition) -> Self {
        debug_assert!(kind.spelling().is_some(), "{kind:?} has no fixed spelling");
        let text = kind.spelling().unwrap_or_default();
        Self {
            kind,
            text: text.to_string(),
            byte_offset,
            len: text.len(),
            position,
        }
    }

    /// End of input.
    pub fn eof(byte_offset: usize, position: SourcePosition) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            byte_offset,
            len: 0,
            position,
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
