//! Prediction engine: speculative parsing with explicit snapshots.
//!
//! A parser that implements [`Speculative`] can try a production, inspect the outcome, and rewind to where it
//! started. State is saved as a [`ParserState`] (cursor index plus the kind and location of the current token) and
//! restored through the token buffer's checkpoints, so a rewind is only possible while the start is still inside the
//! token window.
//!
//! ## Notes
//! - Failure is a value, not an unwind: [`PredictionResult::Failure`] and [`Exhausted`] carry the diagnostics.
//! - [`PredictionContext`] enforces the commit/rollback protocol. Rolling back after a commit (or the reverse) is a
//!   [`ContractViolation`], reported as an internal diagnostic.
//! - Every parser owns its own [`PredictionStack`]; nothing here is shared between parsers.
//!
//! ## Examples
//! ```rust
//! use kira_syntax::{lexer, parser::Parser, prediction::Speculative};
//!
//! // An unclosed generic list fails after consuming three tokens; the parser is rewound.
//! let tokens = lexer::lex("Array<Int32").unwrap();
//! let mut parser = Parser::new(&tokens);
//! assert!(parser.evaluate(|p| p.parse_type()).is_err());
//! assert_eq!(parser.snapshot().cursor, 0);
//! ```

use std::fmt;
use std::time::Instant;

use crate::diagnostics::{ContractViolation, Diagnostic};
use crate::lexer::{Token, TokenKind};
use crate::source::SourcePosition;

/// Snapshot of everything the parser needs to resume from a point.
///
/// The token itself stays in the token list; only its kind and location are copied, so taking a snapshot never
/// allocates.
#[derive(Debug, Clone, Copy)]
pub struct ParserState {
    pub cursor: usize,
    pub current: TokenKind,
    pub position: SourcePosition,
    pub byte_offset: usize,
    /// Width of the current token in characters.
    pub width: usize,
    /// Length of the current token in bytes.
    pub len: usize,
    pub timestamp: Instant,
}

impl ParserState {
    pub fn new(cursor: usize, current: &Token) -> Self {
        Self {
            cursor,
            current: current.kind,
            position: current.position,
            byte_offset: current.byte_offset,
            width: current.width(),
            len: current.len,
            timestamp: Instant::now(),
        }
    }

    /// Whether the snapshot points at a real token (not the synthetic sentinel of an empty stream).
    pub fn is_valid(&self) -> bool {
        self.position.is_known()
    }

    pub fn is_ahead_of(&self, other: &ParserState) -> bool {
        self.cursor > other.cursor
    }

    /// Number of tokens between two snapshots, regardless of order.
    pub fn distance_from(&self, other: &ParserState) -> usize {
        self.cursor.abs_diff(other.cursor)
    }
}

impl PartialEq for ParserState {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor && self.current == other.current
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} at {}", self.cursor, self.current.describe(), self.position)
    }
}

/// Stack of saved states for nested speculation.
#[derive(Debug, Default)]
pub struct PredictionStack {
    states: Vec<ParserState>,
}

impl PredictionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: ParserState) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<ParserState> {
        self.states.pop()
    }

    pub fn peek(&self) -> Option<&ParserState> {
        self.states.last()
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Outcome of a single speculative attempt.
#[derive(Debug)]
pub enum PredictionResult<T> {
    /// The candidate succeeded; `state` is where it left the parser.
    Success { value: T, state: ParserState },
    /// The candidate failed; the parser was rewound to `state`.
    Failure { error: Diagnostic, state: ParserState },
}

impl<T> PredictionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResult::Success { .. })
    }

    pub fn state(&self) -> &ParserState {
        match self {
            PredictionResult::Success { state, .. } | PredictionResult::Failure { state, .. } => state,
        }
    }

    pub fn into_result(self) -> Result<T, Diagnostic> {
        match self {
            PredictionResult::Success { value, .. } => Ok(value),
            PredictionResult::Failure { error, .. } => Err(error),
        }
    }
}

/// Every candidate failed.
#[derive(Debug, Clone)]
pub struct Exhausted {
    pub attempts: usize,
    /// The diagnostic of the candidate that got furthest before failing (ties go to the later candidate).
    pub furthest_error: Option<Diagnostic>,
    /// Where all candidates started; the parser is back here.
    pub start: ParserState,
}

impl Exhausted {
    /// The diagnostic to report when there is no better fallback.
    pub fn into_diagnostic(self, tag: &'static str) -> Diagnostic {
        match self.furthest_error {
            Some(error) => error,
            None => Diagnostic::syntax(tag, format!("{} is not allowed here.", self.start.current.describe()))
                .at(self.start.position, self.start.byte_offset)
                .with_span(self.start.width, self.start.len),
        }
    }
}

/// A candidate production.
pub type Candidate<P, T> = fn(&mut P) -> Result<T, Diagnostic>;

/// Lifecycle of a [`PredictionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionStatus {
    Pending,
    Committed,
    RolledBack,
}

/// One speculative region: created with [`PredictionContext::begin`], finished exactly once by
/// [`commit`](PredictionContext::commit) or [`rollback`](PredictionContext::rollback).
#[derive(Debug)]
pub struct PredictionContext {
    start: ParserState,
    status: PredictionStatus,
}

impl PredictionContext {
    /// Save the parser state and push it onto the parser's prediction stack.
    pub fn begin<P: Speculative + ?Sized>(parser: &mut P) -> Self {
        let start = parser.snapshot();
        parser.prediction_stack().push(start);
        Self {
            start,
            status: PredictionStatus::Pending,
        }
    }

    pub fn start(&self) -> &ParserState {
        &self.start
    }

    pub fn status(&self) -> PredictionStatus {
        self.status
    }

    pub fn is_committed(&self) -> bool {
        self.status == PredictionStatus::Committed
    }

    pub fn is_rolled_back(&self) -> bool {
        self.status == PredictionStatus::RolledBack
    }

    /// Keep everything consumed since `begin`.
    pub fn commit<P: Speculative + ?Sized>(&mut self, parser: &mut P) -> Result<(), ContractViolation> {
        match self.status {
            PredictionStatus::Pending => {
                parser.prediction_stack().pop();
                self.status = PredictionStatus::Committed;
                Ok(())
            }
            PredictionStatus::Committed => Ok(()),
            PredictionStatus::RolledBack => Err(ContractViolation::CommitAfterRollback),
        }
    }

    /// Rewind the parser to where `begin` was called.
    pub fn rollback<P: Speculative + ?Sized>(&mut self, parser: &mut P) -> Result<(), ContractViolation> {
        match self.status {
            PredictionStatus::Pending => {
                parser.prediction_stack().pop();
                self.status = PredictionStatus::RolledBack;
                parser.restore(&self.start)
            }
            PredictionStatus::RolledBack => Ok(()),
            PredictionStatus::Committed => Err(ContractViolation::RollbackAfterCommit),
        }
    }
}

/// Speculative execution over a parser.
///
/// Implementors provide snapshot/restore and the stack; the search strategies come for free.
pub trait Speculative {
    /// Capture the current parser state.
    fn snapshot(&self) -> ParserState;

    /// Return the parser to `state`.
    ///
    /// ## Errors
    /// [`ContractViolation::CheckpointOutOfWindow`] when `state` is no longer inside the token window.
    fn restore(&mut self, state: &ParserState) -> Result<(), ContractViolation>;

    fn prediction_stack(&mut self) -> &mut PredictionStack;

    /// Push the current state onto the prediction stack.
    fn push_state(&mut self) {
        let state = self.snapshot();
        self.prediction_stack().push(state);
    }

    /// Pop the most recent saved state without restoring it.
    fn pop_state(&mut self) -> Option<ParserState> {
        self.prediction_stack().pop()
    }

    /// Run `block`; commit on success, roll back and return the error on failure.
    fn evaluate<T>(&mut self, block: impl FnOnce(&mut Self) -> Result<T, Diagnostic>) -> Result<T, Diagnostic>
    where
        Self: Sized,
    {
        let mut context = PredictionContext::begin(self);
        match block(self) {
            Ok(value) => {
                context.commit(self)?;
                Ok(value)
            }
            Err(error) => {
                context.rollback(self)?;
                Err(error)
            }
        }
    }

    /// Run `block` and rewind on failure, without touching the prediction stack.
    fn with_recovery<T>(&mut self, block: impl FnOnce(&mut Self) -> Result<T, Diagnostic>) -> Result<T, Diagnostic>
    where
        Self: Sized,
    {
        let start = self.snapshot();
        block(self).or_else(|error| {
            self.restore(&start)?;
            Err(error)
        })
    }

    /// Run one candidate and report the outcome as a value.
    ///
    /// On failure the parser is already rewound. If the rewind itself is impossible the failure carries the internal
    /// diagnostic instead of the candidate's.
    fn try_candidate<T>(&mut self, candidate: impl FnOnce(&mut Self) -> Result<T, Diagnostic>) -> PredictionResult<T>
    where
        Self: Sized,
    {
        let mut context = PredictionContext::begin(self);
        match candidate(self) {
            Ok(value) => match context.commit(self) {
                Ok(()) => PredictionResult::Success {
                    value,
                    state: self.snapshot(),
                },
                Err(violation) => PredictionResult::Failure {
                    error: violation.into(),
                    state: self.snapshot(),
                },
            },
            Err(error) => {
                let reached = self.snapshot();
                tracing::trace!(from = %context.start(), reached = %reached, "candidate failed, rolling back");
                let error = match context.rollback(self) {
                    Ok(()) => error,
                    Err(violation) => violation.into(),
                };
                PredictionResult::Failure {
                    error,
                    state: self.snapshot(),
                }
            }
        }
    }

    /// Try candidates in order and keep the first that succeeds.
    ///
    /// When all fail, `fallback` receives an [`Exhausted`] describing the attempts.
    fn try_in_order<T>(
        &mut self,
        candidates: &[Candidate<Self, T>],
        fallback: impl FnOnce(&mut Self, Exhausted) -> Result<T, Diagnostic>,
    ) -> Result<T, Diagnostic>
    where
        Self: Sized,
    {
        match self.find_first_success(candidates) {
            Ok((_, value)) => Ok(value),
            Err(exhausted) => fallback(self, exhausted),
        }
    }

    /// Like [`Speculative::try_in_order`] but also returns which candidate matched.
    fn find_first_success<T>(&mut self, candidates: &[Candidate<Self, T>]) -> Result<(usize, T), Exhausted>
    where
        Self: Sized,
    {
        let start = self.snapshot();
        let mut furthest: Option<(usize, Diagnostic)> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let before = self.snapshot();
            match self.try_candidate(*candidate) {
                PredictionResult::Success { value, .. } => return Ok((index, value)),
                PredictionResult::Failure { error, .. } => {
                    if error.is_internal() {
                        return Err(Exhausted {
                            attempts: index + 1,
                            furthest_error: Some(error),
                            start,
                        });
                    }
                    let reach = error.byte_offset.unwrap_or(0).max(before.byte_offset);
                    if furthest.as_ref().is_none_or(|(best, _)| reach >= *best) {
                        furthest = Some((reach, error));
                    }
                }
            }
        }

        Err(Exhausted {
            attempts: candidates.len(),
            furthest_error: furthest.map(|(_, error)| error),
            start,
        })
    }

    /// Run every candidate, score the successful ones, and re-run the best.
    ///
    /// `scorer` sees the value and the distance (in tokens) the candidate consumed. Ties go to the earlier candidate.
    fn find_best_match<T>(
        &mut self,
        candidates: &[Candidate<Self, T>],
        scorer: impl Fn(&T, usize) -> i64,
    ) -> Result<(usize, T), Exhausted>
    where
        Self: Sized,
    {
        let start = self.snapshot();
        let mut best: Option<(usize, i64)> = None;
        let mut last_error = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let mut context = PredictionContext::begin(self);
            let outcome = candidate(self);
            let consumed = self.snapshot().distance_from(&start);
            if let Err(violation) = context.rollback(self) {
                return Err(Exhausted {
                    attempts: index + 1,
                    furthest_error: Some(violation.into()),
                    start,
                });
            }
            match outcome {
                Ok(value) => {
                    let score = scorer(&value, consumed);
                    if best.is_none_or(|(_, top)| score > top) {
                        best = Some((index, score));
                    }
                }
                Err(error) => last_error = Some(error),
            }
        }

        let Some((index, _)) = best else {
            return Err(Exhausted {
                attempts: candidates.len(),
                furthest_error: last_error,
                start,
            });
        };
        match self.try_candidate(candidates[index]) {
            PredictionResult::Success { value, .. } => Ok((index, value)),
            PredictionResult::Failure { error, .. } => Err(Exhausted {
                attempts: candidates.len(),
                furthest_error: Some(error),
                start,
            }),
        }
    }

    /// The successful candidate that consumed the most tokens.
    fn find_longest_match<T>(&mut self, candidates: &[Candidate<Self, T>]) -> Result<(usize, T), Exhausted>
    where
        Self: Sized,
    {
        self.find_best_match(candidates, |_, consumed| consumed as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{TokenKind, lex};
    use crate::token_buffer::{Checkpoint, TokenBuffer};

    /// Minimal speculative consumer over a token buffer.
    struct Walker<'a> {
        buffer: TokenBuffer<'a>,
        stack: PredictionStack,
    }

    impl<'a> Walker<'a> {
        fn new(tokens: &'a [Token]) -> Self {
            Self {
                buffer: TokenBuffer::with_window_size(tokens, 4).unwrap(),
                stack: PredictionStack::new(),
            }
        }

        fn expect_text(&mut self, text: &str) -> Result<(), Diagnostic> {
            if self.buffer.current().text == text {
                self.buffer.advance();
                Ok(())
            } else {
                Err(Diagnostic::syntax("Walker::expect_text", format!("expected {text}")).at_token(self.buffer.current()))
            }
        }
    }

    impl Speculative for Walker<'_> {
        fn snapshot(&self) -> ParserState {
            ParserState::new(self.buffer.position(), self.buffer.current())
        }

        fn restore(&mut self, state: &ParserState) -> Result<(), ContractViolation> {
            if self.buffer.restore_checkpoint(Checkpoint::at(state.cursor)) {
                Ok(())
            } else {
                Err(ContractViolation::CheckpointOutOfWindow {
                    checkpoint: state.cursor,
                    cursor: self.buffer.position(),
                    window: self.buffer.window_size(),
                })
            }
        }

        fn prediction_stack(&mut self) -> &mut PredictionStack {
            &mut self.stack
        }
    }

    fn a(w: &mut Walker<'_>) -> Result<&'static str, Diagnostic> {
        w.expect_text("a")?;
        Ok("a")
    }

    fn a_b(w: &mut Walker<'_>) -> Result<&'static str, Diagnostic> {
        w.expect_text("a")?;
        w.expect_text("b")?;
        Ok("a b")
    }

    fn a_c(w: &mut Walker<'_>) -> Result<&'static str, Diagnostic> {
        w.expect_text("a")?;
        w.expect_text("c")?;
        Ok("a c")
    }

    #[test]
    fn evaluate_rolls_back_on_failure() {
        let toks = lex("a x").unwrap();
        let mut w = Walker::new(&toks);
        assert!(w.evaluate(a_b).is_err());
        assert_eq!(w.buffer.position(), 0);
        assert!(w.stack.is_empty());
        assert_eq!(w.evaluate(a), Ok("a"));
        assert_eq!(w.buffer.position(), 1);
    }

    #[test]
    fn try_candidate_reports_failure_without_raising() {
        let toks = lex("a x").unwrap();
        let mut w = Walker::new(&toks);
        let result = w.try_candidate(a_b);
        assert!(!result.is_success());
        assert_eq!(result.state().cursor, 0);
    }

    #[test]
    fn try_in_order_takes_the_first_success() {
        let toks = lex("a c").unwrap();
        let mut w = Walker::new(&toks);
        let got = w.try_in_order(&[a_b as Candidate<Walker<'_>, _>, a_c as Candidate<Walker<'_>, _>, a as Candidate<Walker<'_>, _>], |_, ex| Err(ex.into_diagnostic("test")));
        assert_eq!(got, Ok("a c"));
        assert_eq!(w.buffer.position(), 2);
    }

    #[test]
    fn try_in_order_falls_back_when_exhausted() {
        let toks = lex("a z").unwrap();
        let mut w = Walker::new(&toks);
        let got = w.try_in_order(&[a_b as Candidate<Walker<'_>, _>, a_c as Candidate<Walker<'_>, _>], |p, ex| {
            assert_eq!(ex.attempts, 2);
            assert_eq!(ex.start.cursor, 0);
            assert_eq!(p.buffer.position(), 0);
            Ok("fallback")
        });
        assert_eq!(got, Ok("fallback"));
    }

    #[test]
    fn exhausted_reports_the_furthest_error() {
        let toks = lex("a z").unwrap();
        let mut w = Walker::new(&toks);
        let ex = w.find_first_success(&[a_b as Candidate<Walker<'_>, _>, a_c as Candidate<Walker<'_>, _>]).unwrap_err();
        let diag = ex.furthest_error.unwrap();
        assert_eq!(diag.message, "expected c");
    }

    #[test]
    fn longest_match_prefers_more_tokens() {
        let toks = lex("a b").unwrap();
        let mut w = Walker::new(&toks);
        let (index, value) = w.find_longest_match(&[a as Candidate<Walker<'_>, _>, a_b as Candidate<Walker<'_>, _>]).unwrap();
        assert_eq!((index, value), (1, "a b"));
        assert_eq!(w.buffer.position(), 2);
        assert!(w.stack.is_empty());
    }

    #[test]
    fn best_match_uses_the_scorer() {
        let toks = lex("a b").unwrap();
        let mut w = Walker::new(&toks);
        let (index, _) = w.find_best_match(&[a as Candidate<Walker<'_>, _>, a_b as Candidate<Walker<'_>, _>], |_, consumed| -(consumed as i64)).unwrap();
        assert_eq!(index, 0);
        assert_eq!(w.buffer.position(), 1);
    }

    #[test]
    fn rollback_after_commit_is_a_contract_violation() {
        let toks = lex("a").unwrap();
        let mut w = Walker::new(&toks);
        let mut context = PredictionContext::begin(&mut w);
        context.commit(&mut w).unwrap();
        assert_eq!(context.rollback(&mut w), Err(ContractViolation::RollbackAfterCommit));
        assert!(context.is_committed());

        let mut other = PredictionContext::begin(&mut w);
        other.rollback(&mut w).unwrap();
        assert_eq!(other.commit(&mut w), Err(ContractViolation::CommitAfterRollback));
        assert!(other.is_rolled_back());
    }

    #[test]
    fn rollback_beyond_the_window_is_internal() {
        let toks = lex("a a a a a a a a x").unwrap();
        let mut w = Walker::new(&toks);
        let result = w.evaluate(|w| {
            for _ in 0..8 {
                w.expect_text("a")?;
            }
            w.expect_text("b")
        });
        let err = result.unwrap_err();
        assert!(err.is_internal());
        assert_eq!(w.buffer.current().kind, TokenKind::Ident);
        assert_eq!(w.buffer.position(), 8);
    }

    #[test]
    fn with_recovery_rewinds_without_using_the_stack() {
        let toks = lex("a x").unwrap();
        let mut w = Walker::new(&toks);
        assert!(w.with_recovery(a_b).is_err());
        assert_eq!(w.buffer.position(), 0);
        assert_eq!(w.stack.depth(), 0);
    }

    #[test]
    fn state_helpers() {
        let toks = lex("a b").unwrap();
        let mut w = Walker::new(&toks);
        let first = w.snapshot();
        w.buffer.advance();
        let second = w.snapshot();
        assert!(second.is_ahead_of(&first));
        assert_eq!(first.distance_from(&second), 1);
        assert!(first.is_valid());
        assert_eq!(first.to_string(), "#0 an identifier at 1:1");

        let copy = first;
        assert_eq!(copy, first);
        assert_eq!((copy.byte_offset, copy.width), (0, 1));
    }
}
