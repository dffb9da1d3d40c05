/// Statement parsing methods.
///
/// Statements dispatch on the leading token: control-flow keywords have dedicated productions, everything else goes
/// through the shared "modifiers, then declaration or expression" path.
///
/// ## Notes
/// - Terminators (`;` or a newline) are optional between statements and skipped by the callers.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> Result<Spanned<Statement>, Diagnostic> {
        let position = self.position();
        let kind = self.current().kind;
        let node = match kind {
            TokenKind::Keyword(KeywordId::If) => Statement::If(self.parse_if_stmt()?),
            TokenKind::Keyword(KeywordId::While) => Statement::While(self.parse_while_stmt()?),
            TokenKind::Keyword(KeywordId::Do) => Statement::DoWhile(self.parse_do_while_stmt()?),
            TokenKind::Keyword(KeywordId::For) => Statement::For(self.parse_for_stmt()?),
            TokenKind::Keyword(KeywordId::Return) => Statement::Return(self.parse_return_stmt()?),
            TokenKind::Keyword(KeywordId::Break) => {
                self.buffer.advance();
                Statement::Break
            }
            TokenKind::Keyword(KeywordId::Continue) => {
                self.buffer.advance();
                Statement::Continue
            }
            TokenKind::Keyword(KeywordId::Use) => Statement::Use(self.parse_use_stmt()?),
            TokenKind::Keyword(KeywordId::Module) => Statement::Decl(Decl::Module(self.parse_module_decl()?)),
            _ => return self.parse_declaration_or_expression(),
        };
        Ok(Spanned::new(node, position))
    }

    fn parse_declaration_or_expression(&mut self) -> Result<Spanned<Statement>, Diagnostic> {
        let position = self.position();
        let parsed = self.parse_modifiers()?;
        if self.declaration_ahead() {
            let decl = self.parse_declaration(parsed, None)?;
            return Ok(Spanned::new(Statement::Decl(decl), position));
        }
        if let Some(first) = parsed.first() {
            return Err(Diagnostic::syntax(
                "Parser::parse_statement",
                format!(
                    "The modifier '{}' must be followed by a declaration, but found {}.",
                    first.modifier.id,
                    self.current().describe()
                ),
            )
            .at_token(self.current()));
        }
        let expr = self.parse_expr(0)?;
        Ok(Spanned::new(Statement::Expr(expr.node), position))
    }

    /// `{ statements }`
    fn parse_block(&mut self) -> Result<Block, Diagnostic> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> Result<Block, Diagnostic> {
        let open = self.expect_punct(PunctuationId::LBrace, "Parser::parse_block")?;
        let mut statements = Vec::new();
        loop {
            self.skip_terminators();
            if self.check_punct(PunctuationId::RBrace) || self.is_at_end() {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        self.expect_closing(PunctuationId::RBrace, &open, "Parser::parse_block")?;
        Ok(statements)
    }

    /// `( expr )` around a condition.
    fn parse_condition(&mut self, tag: &'static str) -> Result<Spanned<Expr>, Diagnostic> {
        let open = self.expect_punct(PunctuationId::LParen, tag)?;
        let condition = self.parse_expr(0)?;
        self.expect_closing(PunctuationId::RParen, &open, tag)?;
        Ok(condition)
    }

    /// `if (c) { } else if (c) { } else { }`
    fn parse_if_stmt(&mut self) -> Result<IfStmt, Diagnostic> {
        const TAG: &str = "Parser::parse_if_stmt";
        self.expect_keyword(KeywordId::If, TAG)?;
        let condition = self.parse_condition(TAG)?;
        let then_block = self.parse_block()?;
        let mut else_ifs = Vec::new();
        let mut else_block = None;

        while self.continues_with_keyword(KeywordId::Else) {
            self.buffer.advance();
            let position = self.position();
            if self.match_keyword(KeywordId::If) {
                let condition = self.parse_condition(TAG)?;
                let block = self.parse_block()?;
                else_ifs.push(ElseIfBranch {
                    condition,
                    block,
                    position,
                });
            } else {
                else_block = Some(self.parse_block()?);
                break;
            }
        }

        Ok(IfStmt {
            condition,
            then_block,
            else_ifs,
            else_block,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<WhileStmt, Diagnostic> {
        self.expect_keyword(KeywordId::While, "Parser::parse_while_stmt")?;
        let condition = self.parse_condition("Parser::parse_while_stmt")?;
        let body = self.parse_block()?;
        Ok(WhileStmt { condition, body })
    }

    /// `do { } while (c)`
    fn parse_do_while_stmt(&mut self) -> Result<DoWhileStmt, Diagnostic> {
        const TAG: &str = "Parser::parse_do_while_stmt";
        self.expect_keyword(KeywordId::Do, TAG)?;
        let body = self.parse_block()?;
        if !self.continues_with_keyword(KeywordId::While) {
            return Err(self.expected(TAG, "'while'"));
        }
        self.buffer.advance();
        let condition = self.parse_condition(TAG)?;
        Ok(DoWhileStmt { body, condition })
    }

    /// `for (mut? name : target) { }`
    fn parse_for_stmt(&mut self) -> Result<ForStmt, Diagnostic> {
        const TAG: &str = "Parser::parse_for_stmt";
        self.expect_keyword(KeywordId::For, TAG)?;
        let open = self.expect_punct(PunctuationId::LParen, TAG)?;
        let mutable = self.match_keyword(KeywordId::Mut);
        let binding = self.expect_ident(TAG)?;
        self.expect_punct(PunctuationId::Colon, TAG)?;
        let target = self.parse_expr(0)?;
        self.expect_closing(PunctuationId::RParen, &open, TAG)?;
        let body = self.parse_block()?;
        Ok(ForStmt {
            iteration: ForIterationExpr {
                mutable,
                binding,
                target,
            },
            body,
        })
    }

    /// `return expr?`; a bare `return` carries [`Expr::NoExpr`].
    fn parse_return_stmt(&mut self) -> Result<ReturnStmt, Diagnostic> {
        let position = self.position();
        self.expect_keyword(KeywordId::Return, "Parser::parse_return_stmt")?;
        let ends = self.current().kind.is_terminator() || self.check_punct(PunctuationId::RBrace) || self.is_at_end();
        let value = if ends {
            Spanned::new(Expr::NoExpr, position)
        } else {
            self.parse_expr(0)?
        };
        Ok(ReturnStmt { value })
    }

    /// `use "author:path"`
    fn parse_use_stmt(&mut self) -> Result<UseStmt, Diagnostic> {
        self.expect_keyword(KeywordId::Use, "Parser::parse_use_stmt")?;
        let uri = self.parse_uri("Parser::parse_use_stmt")?;
        Ok(UseStmt { uri })
    }
}
