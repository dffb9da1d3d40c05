//! Fatal diagnostics for the lexer and parser.
//!
//! Every failure in this crate is a single [`Diagnostic`] returned through `Result`. There is no accumulation: the
//! first lexical or syntax error aborts the compilation unit.
//!
//! ## Notes
//! - [`Diagnostic::render`] is the deterministic, colour-free rendering used by tests and plain terminals.
//! - [`Diagnostic`] also implements [`miette::Diagnostic`] so hosts can attach the source with
//!   `miette::Report::new(d).with_source_code(..)` and get the graphical report instead.
//! - Internal errors ([`ContractViolation`]) are bugs in the front end and render with a distinct header so tooling
//!   never confuses them with mistakes in the input program.

use std::fmt;

use miette::{LabeledSpan, Severity};

use crate::lexer::Token;
use crate::source::SourcePosition;

/// Which layer produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Unknown character, unterminated string, invalid hex literal, illegal underscore.
    Lexical,
    /// Unexpected token, unmatched delimiter, out-of-context modifier, missing module declaration.
    Syntax,
    /// A broken internal contract (a front-end bug).
    Internal,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical | DiagnosticKind::Syntax => f.write_str("error"),
            DiagnosticKind::Internal => f.write_str("internal error"),
        }
    }
}

/// Marker style for the underline in [`Diagnostic::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticStyle {
    /// `^^^`
    #[default]
    Ascii,
    /// `↑↑↑`
    Unicode,
}

impl DiagnosticStyle {
    fn marker(self) -> char {
        match self {
            DiagnosticStyle::Ascii => '^',
            DiagnosticStyle::Unicode => '↑',
        }
    }
}

/// A fatal, positioned diagnostic.
///
/// ## Notes
/// - `tag` names the routine that raised the diagnostic (`"Lexer::lex_string"`, `"Parser::parse_type"`).
/// - `underline_length` counts characters starting at `location`; rendering never draws fewer than one marker.
/// - `underline_bytes` is the same span in bytes, for hosts that label the source by offset (miette).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub tag: &'static str,
    pub message: String,
    pub location: Option<SourcePosition>,
    pub byte_offset: Option<usize>,
    pub underline_length: usize,
    pub underline_bytes: usize,
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            tag,
            message: message.into(),
            location: None,
            byte_offset: None,
            underline_length: 1,
            underline_bytes: 1,
            help: None,
        }
    }

    pub fn lexical(tag: &'static str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Lexical, tag, message)
    }

    pub fn syntax(tag: &'static str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Syntax, tag, message)
    }

    pub fn internal(tag: &'static str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Internal, tag, message)
    }

    /// Anchor the diagnostic at a position and byte offset.
    pub fn at(mut self, location: SourcePosition, byte_offset: usize) -> Self {
        if location.is_known() {
            self.location = Some(location);
            self.byte_offset = Some(byte_offset);
        }
        self
    }

    /// Anchor the diagnostic at a token and underline its whole lexeme.
    pub fn at_token(self, token: &Token) -> Self {
        self.at(token.position, token.byte_offset).with_span(token.width(), token.len)
    }

    /// Underline `length` ASCII characters.
    pub fn with_underline(self, length: usize) -> Self {
        self.with_span(length, length)
    }

    /// Underline exactly `text`, which starts at the diagnostic's location.
    pub fn underline_text(self, text: &str) -> Self {
        self.with_span(text.chars().count(), text.len())
    }

    pub fn with_span(mut self, chars: usize, bytes: usize) -> Self {
        self.underline_length = chars.max(1);
        self.underline_bytes = bytes.max(1);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_internal(&self) -> bool {
        self.kind == DiagnosticKind::Internal
    }

    /// Render the diagnostic against the source it was produced from.
    ///
    /// ```text
    /// error[Lexer::lex_string]: Unterminated string. Insert '"' to terminate it
    ///  --> 1:5
    ///   |
    /// 1 | x = "abc
    ///   |     ^
    /// ```
    ///
    /// ## Notes
    /// - The gutter is as wide as the line number.
    /// - No line carries trailing whitespace; the result always ends with `\n`.
    /// - Without a location (or when the line is outside `source`) only the header and help are emitted.
    pub fn render(&self, source: &str, style: DiagnosticStyle) -> String {
        let mut lines = vec![format!("{}[{}]: {}", self.kind, self.tag, self.message)];
        let mut gutter = String::new();

        if let Some(location) = self.location {
            gutter = " ".repeat(location.line.to_string().len());
            lines.push(format!("{gutter}--> {}:{}", location.line, location.column));
            let text = usize::try_from(location.line - 1)
                .ok()
                .and_then(|index| source.lines().nth(index));
            if let Some(text) = text {
                let indent = " ".repeat(usize::try_from(location.column - 1).unwrap_or(0));
                let markers: String = std::iter::repeat_n(style.marker(), self.underline_length.max(1)).collect();
                lines.push(format!("{gutter} |"));
                lines.push(format!("{} | {text}", location.line));
                lines.push(format!("{gutter} | {indent}{markers}"));
            }
        }

        if let Some(help) = &self.help {
            lines.push(format!("{gutter} = help: {help}"));
        }

        let mut out = String::new();
        for line in lines {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.tag))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.as_ref().map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let offset = self.byte_offset?;
        let label = LabeledSpan::at((offset, self.underline_bytes), self.kind.to_string());
        Some(Box::new(std::iter::once(label)))
    }
}

/// A broken internal contract.
///
/// These never describe bad input; they mean a table or a caller inside the front end is wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("a prediction was rolled back after it had been committed")]
    RollbackAfterCommit,
    #[error("a prediction was committed after it had been rolled back")]
    CommitAfterRollback,
    #[error("checkpoint {checkpoint} is outside the retained window (cursor {cursor}, window {window})")]
    CheckpointOutOfWindow {
        checkpoint: usize,
        cursor: usize,
        window: usize,
    },
    #[error("operator `{operator}` has no entry in the operator table")]
    OperatorTableMiss { operator: String },
}

impl From<ContractViolation> for Diagnostic {
    fn from(violation: ContractViolation) -> Self {
        let tag = match violation {
            ContractViolation::RollbackAfterCommit | ContractViolation::CommitAfterRollback => {
                "PredictionContext::finish"
            }
            ContractViolation::CheckpointOutOfWindow { .. } => "TokenBuffer::restore_checkpoint",
            ContractViolation::OperatorTableMiss { .. } => "Parser::operator_table",
        };
        Diagnostic::internal(tag, violation.to_string())
            .with_help("this is a bug in the Kira front end, not in the program being compiled")
    }
}
