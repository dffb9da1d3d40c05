//! Source positions.

use std::fmt;

/// A 1-based line/column position in source text.
///
/// ## Notes
/// - Both fields are strictly positive, except for [`SourcePosition::UNKNOWN`].
/// - Columns count characters, not bytes.
/// - Ordering is by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    pub line: i32,
    pub column: i32,
}

impl SourcePosition {
    /// Sentinel for synthesized tokens and nodes with no source.
    pub const UNKNOWN: SourcePosition = SourcePosition { line: -1, column: -1 };

    /// Start of a file.
    pub const START: SourcePosition = SourcePosition { line: 1, column: 1 };

    /// Create a position.
    ///
    /// ## Panics
    /// - In debug builds, if either coordinate is not positive.
    pub fn new(line: i32, column: i32) -> Self {
        debug_assert!(line >= 1 && column >= 1, "positions are 1-based: {line}:{column}");
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            f.write_str("<unknown>")
        }
    }
}
