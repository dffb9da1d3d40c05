//! Shareable metadata for `kira_core::lang` registries.
//!
//! These types are `Copy` so registries can live in `const` tables.

use std::fmt;

/// Identify the language version a vocabulary item is available since.
///
/// ## Examples
/// ```rust
/// use kira_core::lang::registry::Since;
///
/// assert_eq!(Since(0, 2).to_string(), "0.2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u8, pub u8);

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - Intended for docs/tooling (e.g. to flag draft syntax), not for feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}
