/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`current`, `peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Terminator handling (`skip_terminators`)
/// - Shared diagnostics (`unexpected`, `expect_closing`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.buffer.is_at_end()
    }

    fn current(&self) -> &Token {
        self.buffer.current()
    }

    /// Token `k` positions ahead; beyond the window this reads the token list directly.
    fn peek(&self, k: usize) -> &Token {
        self.buffer.peek(k)
    }

    fn position(&self) -> SourcePosition {
        self.current().position
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        self.buffer.advance();
        token
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.current().is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.current().is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.current().is_operator(id)
    }

    fn check_ident(&self) -> bool {
        self.current().kind == TokenKind::Ident
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.buffer.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.buffer.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.buffer.advance();
            true
        } else {
            false
        }
    }

    /// `Expected 'x' but found y.` anchored at the current token.
    fn expected(&self, tag: &'static str, what: &str) -> Diagnostic {
        Diagnostic::syntax(
            tag,
            format!("Expected {what} but found {}.", self.current().describe()),
        )
        .at_token(self.current())
    }

    /// `X is not allowed here.` anchored at the current token.
    fn unexpected(&self, tag: &'static str) -> Diagnostic {
        Diagnostic::syntax(tag, format!("{} is not allowed here.", self.current().describe()))
            .at_token(self.current())
    }

    fn expect_keyword(&mut self, id: KeywordId, tag: &'static str) -> Result<Token, Diagnostic> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(tag, &format!("'{}'", kira_core::lang::keywords::as_str(id))))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, tag: &'static str) -> Result<Token, Diagnostic> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(tag, &format!("'{}'", punctuation::as_str(id))))
        }
    }

    fn expect_op(&mut self, id: OperatorId, tag: &'static str) -> Result<Token, Diagnostic> {
        if self.check_op(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(tag, &format!("'{}'", operators::as_str(id))))
        }
    }

    fn expect_ident(&mut self, tag: &'static str) -> Result<Identifier, Diagnostic> {
        if self.check_ident() {
            Ok(Identifier::new(self.advance().text))
        } else {
            Err(self.expected(tag, "an identifier"))
        }
    }

    fn expect_string(&mut self, tag: &'static str) -> Result<Token, Diagnostic> {
        if self.current().kind == TokenKind::Str {
            Ok(self.advance())
        } else {
            Err(self.expected(tag, "a string"))
        }
    }

    /// Consume the delimiter closing `open`, or report the unmatched opener.
    fn expect_closing(&mut self, close: PunctuationId, open: &Token, tag: &'static str) -> Result<(), Diagnostic> {
        if self.match_punct(close) {
            return Ok(());
        }
        Err(self.expected(tag, &format!("'{}'", punctuation::as_str(close))).with_help(format!(
            "The '{}' at {} is never closed.",
            open.text, open.position
        )))
    }

    /// Skip `;` and newline terminators.
    fn skip_terminators(&mut self) {
        while self.current().kind.is_terminator() {
            self.buffer.advance();
        }
    }

    /// Skip terminators, then report whether `id` follows.
    ///
    /// Used where a construct may continue on the next line (`else`, the `while` of `do-while`).
    fn continues_with_keyword(&mut self, id: KeywordId) -> bool {
        let mut k = 0;
        while self.peek(k).kind.is_terminator() {
            k += 1;
        }
        if self.peek(k).is_keyword(id) {
            self.buffer.advance_by(k);
            true
        } else {
            false
        }
    }

    /// Parse `open element (, element)* ,? close` with terminators allowed between elements.
    ///
    /// The opening delimiter must be the current token.
    fn parse_delimited<T>(
        &mut self,
        open: PunctuationId,
        close: PunctuationId,
        tag: &'static str,
        mut element: impl FnMut(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<Vec<T>, Diagnostic> {
        let open_token = self.expect_punct(open, tag)?;
        let mut items = Vec::new();
        loop {
            self.skip_terminators();
            if self.check_punct(close) || self.is_at_end() {
                break;
            }
            items.push(element(self)?);
            self.skip_terminators();
            if !self.check_punct(close) && !self.match_punct(PunctuationId::Comma) {
                if self.is_at_end() {
                    break;
                }
                return Err(self.expected(
                    tag,
                    &format!("',' or '{}'", punctuation::as_str(close)),
                ));
            }
        }
        self.expect_closing(close, &open_token, tag)?;
        Ok(items)
    }
}
