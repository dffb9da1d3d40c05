//! Define the reserved keyword vocabulary for the Kira language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) recording spellings, categories and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - The lexer matches identifiers against this table *after* scanning them, so a keyword is never a prefix match:
//!   `iffy` stays an identifier.
//! - `is` and `as` are word operators; their precedence lives in [`crate::lang::precedence`].
//!
//! ## Examples
//! ```rust
//! use kira_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("null"), Some(KeywordId::Null));
//! assert_eq!(keywords::category(KeywordId::Null), KeywordCategory::Literal);
//! assert_eq!(keywords::from_str("Null"), None);
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    While,
    Do,
    For,
    Return,
    Break,
    Continue,

    // Modifiers
    Mut,
    Pub,
    Require,
    Weak,

    // Declarations
    Class,
    Enum,
    Namespace,
    Trait,
    Type,
    Variant,
    Fx,
    With,

    // Modules
    Module,
    Use,

    // Word operators
    As,
    Is,

    // Literals
    True,
    False,
    Null,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - [`KeywordCategory::Literal`] is load-bearing: the parser treats literal keywords as primary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Modifier,
    Declaration,
    Module,
    Operator,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, "Conditional branch.", Since(0, 1)),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, "Alternative branch of an `if`.", Since(0, 1)),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, "Pre-tested loop.", Since(0, 1)),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, "Post-tested `do { } while (c)` loop.", Since(0, 1)),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, "Iteration over a target.", Since(0, 1)),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, "Return from a function.", Since(0, 1)),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, "Exit the innermost loop.", Since(0, 1)),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, "Skip to the next iteration.", Since(0, 1)),
    // Modifiers
    info(KeywordId::Mut, "mut", KeywordCategory::Modifier, "Mutable binding or collection.", Since(0, 1)),
    info(KeywordId::Pub, "pub", KeywordCategory::Modifier, "Public visibility.", Since(0, 1)),
    info(KeywordId::Require, "require", KeywordCategory::Modifier, "Member an implementor must supply.", Since(0, 1)),
    info(KeywordId::Weak, "weak", KeywordCategory::Modifier, "Non-owning reference.", Since(0, 2)),
    // Declarations
    info(KeywordId::Class, "class", KeywordCategory::Declaration, "Class declaration.", Since(0, 1)),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration, "Enumeration declaration.", Since(0, 1)),
    info(KeywordId::Namespace, "namespace", KeywordCategory::Declaration, "Named group of declarations.", Since(0, 2)),
    info(KeywordId::Trait, "trait", KeywordCategory::Declaration, "Trait (interface) declaration.", Since(0, 2)),
    info(KeywordId::Type, "type", KeywordCategory::Declaration, "Type alias declaration.", Since(0, 2)),
    info(KeywordId::Variant, "variant", KeywordCategory::Declaration, "Closed family of classes.", Since(0, 2)),
    info(KeywordId::Fx, "fx", KeywordCategory::Declaration, "Anonymous function literal.", Since(0, 2)),
    info(KeywordId::With, "with", KeywordCategory::Declaration, "Structural record expression.", Since(0, 2)),
    // Modules
    info(KeywordId::Module, "module", KeywordCategory::Module, "Module declaration; must come first.", Since(0, 1)),
    info(KeywordId::Use, "use", KeywordCategory::Module, "Import another module by URI.", Since(0, 1)),
    // Word operators
    info(KeywordId::As, "as", KeywordCategory::Operator, "Type cast.", Since(0, 1)),
    info(KeywordId::Is, "is", KeywordCategory::Operator, "Type check.", Since(0, 1)),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal, "Boolean true.", Since(0, 1)),
    info(KeywordId::False, "false", KeywordCategory::Literal, "Boolean false.", Since(0, 1)),
    info(KeywordId::Null, "null", KeywordCategory::Literal, "The absent value of a nullable type.", Since(0, 2)),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is a reserved word, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
    since: Since,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
        since,
        stability: if since.1 > 1 { Stability::Draft } else { Stability::Stable },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_words_are_keywords() {
        for word in ["true", "false", "null"] {
            let id = from_str(word).expect("literal keyword");
            assert_eq!(category(id), KeywordCategory::Literal);
        }
    }

    #[test]
    fn later_keywords_are_marked_draft() {
        assert_eq!(info_for(KeywordId::Weak).stability, Stability::Draft);
        assert_eq!(info_for(KeywordId::If).stability, Stability::Stable);
    }
}
