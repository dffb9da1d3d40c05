//! Declaration modifiers and the contexts they may appear in.
//!
//! A modifier is validated against the construct it ends up attached to (a class, a class member, a module-level
//! variable, ...), never against its own spelling. The parser records each modifier while scanning and checks it
//! once it knows which declaration follows.
//!
//! ## Examples
//! ```rust
//! use kira_core::lang::modifiers::{self, ModifierContext, ModifierId};
//!
//! assert!(modifiers::is_allowed(ModifierId::Public, ModifierContext::Variable));
//! assert!(!modifiers::is_allowed(ModifierId::Require, ModifierContext::Variable));
//! assert!(modifiers::is_allowed(ModifierId::Require, ModifierContext::ClassMember));
//! ```

use std::fmt;

use super::keywords::{self, KeywordId};

/// Stable identifier for every modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierId {
    Mutable,
    Public,
    Require,
    Weak,
}

/// Syntactic construct a modifier is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierContext {
    Module,
    Class,
    ClassMember,
    Variable,
    Function,
    FunctionParameter,
    Namespace,
    NamespaceMember,
    Enum,
    Trait,
    TraitMember,
    TypeAlias,
    Variant,
}

impl ModifierContext {
    /// Human-readable name used in diagnostics ("a class member").
    pub fn description(self) -> &'static str {
        match self {
            ModifierContext::Module => "module",
            ModifierContext::Class => "class",
            ModifierContext::ClassMember => "class member",
            ModifierContext::Variable => "variable",
            ModifierContext::Function => "function",
            ModifierContext::FunctionParameter => "function parameter",
            ModifierContext::Namespace => "namespace",
            ModifierContext::NamespaceMember => "namespace member",
            ModifierContext::Enum => "enum",
            ModifierContext::Trait => "trait",
            ModifierContext::TraitMember => "trait member",
            ModifierContext::TypeAlias => "type alias",
            ModifierContext::Variant => "variant",
        }
    }
}

impl fmt::Display for ModifierContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Metadata for a modifier.
#[derive(Debug, Clone, Copy)]
pub struct ModifierInfo {
    pub id: ModifierId,
    pub keyword: KeywordId,
    pub contexts: &'static [ModifierContext],
}

use ModifierContext as Ctx;

/// Registry of all modifiers and where each is legal.
///
/// ## Notes
/// - `require` is deliberately limited to members: a free-standing variable or function has nothing that could
///   satisfy the requirement.
pub const MODIFIERS: &[ModifierInfo] = &[
    ModifierInfo {
        id: ModifierId::Mutable,
        keyword: KeywordId::Mut,
        contexts: &[
            Ctx::Class,
            Ctx::ClassMember,
            Ctx::Variable,
            Ctx::Function,
            Ctx::NamespaceMember,
            Ctx::Module,
        ],
    },
    ModifierInfo {
        id: ModifierId::Public,
        keyword: KeywordId::Pub,
        contexts: &[
            Ctx::Class,
            Ctx::ClassMember,
            Ctx::Variable,
            Ctx::Function,
            Ctx::Namespace,
            Ctx::NamespaceMember,
            Ctx::Enum,
            Ctx::Trait,
            Ctx::TypeAlias,
            Ctx::Variant,
        ],
    },
    ModifierInfo {
        id: ModifierId::Require,
        keyword: KeywordId::Require,
        contexts: &[Ctx::ClassMember, Ctx::TraitMember],
    },
    ModifierInfo {
        id: ModifierId::Weak,
        keyword: KeywordId::Weak,
        contexts: &[Ctx::ClassMember, Ctx::Variable, Ctx::Function, Ctx::FunctionParameter],
    },
];

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ModifierId) -> &'static ModifierInfo {
    MODIFIERS.iter().find(|m| m.id == id).expect("modifier info missing")
}

/// Source spelling of a modifier (`mut`, `pub`, ...).
pub fn as_str(id: ModifierId) -> &'static str {
    keywords::as_str(info_for(id).keyword)
}

/// The modifier a keyword denotes, if any.
pub fn from_keyword(keyword: KeywordId) -> Option<ModifierId> {
    MODIFIERS.iter().find(|m| m.keyword == keyword).map(|m| m.id)
}

pub fn is_allowed(id: ModifierId, context: ModifierContext) -> bool {
    info_for(id).contexts.contains(&context)
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_modifier_keyword_maps_back() {
        for info in MODIFIERS {
            assert_eq!(from_keyword(info.keyword), Some(info.id));
            assert_eq!(keywords::category(info.keyword), keywords::KeywordCategory::Modifier);
        }
    }

    #[test]
    fn weak_is_the_only_parameter_modifier() {
        let allowed: Vec<_> = MODIFIERS
            .iter()
            .filter(|m| m.contexts.contains(&ModifierContext::FunctionParameter))
            .map(|m| m.id)
            .collect();
        assert_eq!(allowed, vec![ModifierId::Weak]);
    }
}
