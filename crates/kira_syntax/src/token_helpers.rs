//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites.

use std::fmt;

use kira_core::lang::keywords::{self, KeywordCategory, KeywordId};
use kira_core::lang::operators::{self, OperatorId};
use kira_core::lang::punctuation::{self, PunctuationId};

use crate::lexer::{Token, TokenKind};

impl TokenKind {
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// `;` or a newline.
    pub fn is_terminator(&self) -> bool {
        self.is_punctuation(PunctuationId::Semicolon)
    }

    /// `true`, `false`, `null`, and the literal token kinds.
    pub fn is_literal(&self) -> bool {
        match self {
            TokenKind::Integer | TokenKind::Float | TokenKind::Str => true,
            TokenKind::Keyword(id) => keywords::category(*id) == KeywordCategory::Literal,
            _ => false,
        }
    }

    /// How a token of this kind is named when its text is not at hand.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => format!("'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(PunctuationId::Semicolon) => "a terminator".to_string(),
            TokenKind::Punctuation(id) => format!("'{}'", punctuation::as_str(*id)),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Ident => "an identifier".to_string(),
            TokenKind::IntrinsicIdent => "an intrinsic".to_string(),
            TokenKind::Integer => "an integer".to_string(),
            TokenKind::Float => "a float".to_string(),
            TokenKind::Str => "a string".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(_) => f.write_str("keyword"),
            TokenKind::Operator(_) => f.write_str("operator"),
            TokenKind::Punctuation(PunctuationId::Semicolon) => f.write_str("terminator"),
            TokenKind::Punctuation(_) => f.write_str("punctuation"),
            TokenKind::Ident => f.write_str("identifier"),
            TokenKind::IntrinsicIdent => f.write_str("intrinsic"),
            TokenKind::Integer => f.write_str("integer"),
            TokenKind::Float => f.write_str("float"),
            TokenKind::Str => f.write_str("string"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

impl Token {
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    pub fn is_keyword(&self, id: KeywordId) -> bool {
        self.kind.is_keyword(id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        self.kind.is_operator(id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        self.kind.is_punctuation(id)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// How a token is named in "X is not allowed here" style messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Punctuation(PunctuationId::Semicolon) if self.text != ";" => "a line break".to_string(),
            TokenKind::Str => format!("string \"{}\"", self.text),
            TokenKind::IntrinsicIdent => format!("'@{}'", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}
