//! Sliding-window token buffer.
//!
//! The parser never indexes the token list directly. It reads through a [`TokenBuffer`]: a power-of-two circular
//! cache of `window_size` token references starting at the cursor, plus cheap [`Checkpoint`]s for backtracking.
//!
//! ## Notes
//! - `peek(k)` for `k < window_size` is served from the cache; larger offsets read the token list directly. Both
//!   return an EOF sentinel past the end, never panic.
//! - A checkpoint can only be restored while it is still covered by the window, i.e. the cursor has moved at most
//!   `window_size - 1` tokens past it. Older checkpoints are refused with `false` and the cursor is left untouched.
//! - The buffer never mutates tokens.

use std::fmt::Write as _;

use crate::lexer::Token;
use crate::source::SourcePosition;

/// Default window size.
pub const DEFAULT_WINDOW_SIZE: usize = 16;
/// Smallest accepted window size.
pub const MIN_WINDOW_SIZE: usize = 4;
/// Largest accepted window size.
pub const MAX_WINDOW_SIZE: usize = 64;

/// Rejected window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token window size {0} must be a power of two between {MIN_WINDOW_SIZE} and {MAX_WINDOW_SIZE}")]
pub struct InvalidWindowSize(pub usize);

/// Check a window size without building a buffer.
pub fn validate_window_size(size: usize) -> Result<(), InvalidWindowSize> {
    if (MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&size) && size.is_power_of_two() {
        Ok(())
    } else {
        Err(InvalidWindowSize(size))
    }
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint {
    position: usize,
}

impl Checkpoint {
    /// A checkpoint for an arbitrary index (used when restoring a parser snapshot).
    pub fn at(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Fixed-capacity sliding window over a token list.
pub struct TokenBuffer<'a> {
    tokens: &'a [Token],
    cache: Vec<Option<&'a Token>>,
    mask: usize,
    position: usize,
    eof: Token,
}

impl<'a> TokenBuffer<'a> {
    /// Create a buffer with the default window.
    pub fn new(tokens: &'a [Token]) -> Self {
        let mut buffer = Self::build(tokens, DEFAULT_WINDOW_SIZE);
        buffer.reload();
        buffer
    }

    /// Create a buffer with a custom window size.
    ///
    /// ## Errors
    /// Returns [`InvalidWindowSize`] unless `window_size` is a power of two in `4..=64`.
    pub fn with_window_size(tokens: &'a [Token], window_size: usize) -> Result<Self, InvalidWindowSize> {
        validate_window_size(window_size)?;
        let mut buffer = Self::build(tokens, window_size);
        buffer.reload();
        Ok(buffer)
    }

    fn build(tokens: &'a [Token], window_size: usize) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token::eof(last.byte_offset + last.len, last.position),
            None => Token::eof(0, SourcePosition::UNKNOWN),
        };
        Self {
            tokens,
            cache: vec![None; window_size],
            mask: window_size - 1,
            position: 0,
            eof,
        }
    }

    pub fn window_size(&self) -> usize {
        self.cache.len()
    }

    /// Index of the current token in the full list.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True once the cursor sits on (or past) the final `Eof`.
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Token `k` positions ahead of the cursor.
    pub fn peek(&self, k: usize) -> &Token {
        if k < self.cache.len() {
            self.cache[(self.position + k) & self.mask].unwrap_or(&self.eof)
        } else {
            self.tokens.get(self.position + k).unwrap_or(&self.eof)
        }
    }

    /// Move one token forward, refilling the slot that fell out of the window.
    pub fn advance(&mut self) {
        if self.position >= self.tokens.len() {
            return;
        }
        self.position += 1;
        let incoming = self.position + self.cache.len() - 1;
        self.cache[incoming & self.mask] = self.tokens.get(incoming);
    }

    /// Move `n` tokens forward.
    ///
    /// Jumps of at least half a window reload the whole cache instead of sliding slot by slot.
    pub fn advance_by(&mut self, n: usize) {
        if n >= self.cache.len() / 2 {
            self.position = (self.position + n).min(self.tokens.len());
            self.reload();
        } else {
            for _ in 0..n {
                self.advance();
            }
        }
    }

    pub fn create_checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
        }
    }

    /// Rewind to `checkpoint`.
    ///
    /// ## Returns
    /// - `true` if the checkpoint was within the retained window and the cursor was restored.
    /// - `false` if the checkpoint is ahead of the cursor or `window_size` or more tokens behind it; the cursor does
    ///   not move.
    pub fn restore_checkpoint(&mut self, checkpoint: Checkpoint) -> bool {
        let Some(distance) = self.position.checked_sub(checkpoint.position) else {
            return false;
        };
        if distance >= self.cache.len() {
            return false;
        }
        if distance > 0 {
            self.position = checkpoint.position;
            self.reload();
        }
        true
    }

    fn reload(&mut self) {
        for k in 0..self.cache.len() {
            let index = self.position + k;
            self.cache[index & self.mask] = self.tokens.get(index);
        }
    }

    /// Human-readable dump of the window, one slot per line, marking the cursor slot.
    pub fn debug_dump(&self) -> String {
        let mut out = format!(
            "TokenBuffer {{ position: {}, window: {}, tokens: {} }}\n",
            self.position,
            self.cache.len(),
            self.tokens.len()
        );
        for k in 0..self.cache.len() {
            let slot = (self.position + k) & self.mask;
            let marker = if k == 0 { '>' } else { ' ' };
            let _ = match self.cache[slot] {
                Some(token) => writeln!(out, "{marker} [{slot:2}] {:?} {:?} @ {}", token.kind, token.text, token.position),
                None => writeln!(out, "{marker} [{slot:2}] <eof>"),
            };
        }
        out
    }
}
