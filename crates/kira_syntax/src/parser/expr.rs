/// Expression parsing methods.
///
/// This chunk implements the expression grammar with precedence climbing: a unary/primary operand followed by a loop
/// over binary operators, recursing with `precedence + 1` on the right-hand side so every level is left-associative.
/// The precedence table lives in `kira_core::lang::precedence`.
///
/// ## Notes
/// - `is`/`as` parse a type on their right-hand side; `.`/`::` build [`MemberAccessExpr`]; `..` builds [`RangeExpr`].
/// - The lexer emits one token per `>`. In operator position the run is read here with the prediction engine,
///   longest reading first: `>>>=`, `>>>`, `>>=`, `>>`, `>=`, `>`. Tokens of a run must touch; `> >` is two operators.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse one complete expression at the cursor.
    ///
    /// ## Errors
    /// A syntax diagnostic for malformed input, or an internal one if an operator table is incomplete.
    pub fn parse_expression(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        self.parse_expr(0)
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, Diagnostic> {
        self.nested(|p| p.parse_expr_at(min_precedence))
    }

    fn parse_expr_at(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, Diagnostic> {
        let mut left = self.parse_unary_or_primary()?;

        while let Some((op, width)) = self.peek_binary_op()? {
            let info = precedence::lookup(op).ok_or_else(|| ContractViolation::OperatorTableMiss {
                operator: format!("{op:?}"),
            })?;
            if info.precedence < min_precedence {
                break;
            }
            self.buffer.advance_by(width);

            let position = left.position;
            let left_box = Box::new(left);
            let node = match info.shape {
                BinaryShape::TypeCheck => Expr::TypeCheck(TypeCheckExpr {
                    value: left_box,
                    ty: self.parse_type()?,
                }),
                BinaryShape::TypeCast => Expr::TypeCast(TypeCastExpr {
                    value: left_box,
                    ty: self.parse_type()?,
                }),
                BinaryShape::Member => Expr::MemberAccess(MemberAccessExpr {
                    object: left_box,
                    member: Box::new(self.parse_expr(info.precedence + 1)?),
                    is_static: op == BinaryOp::Scope,
                }),
                BinaryShape::Range => Expr::Range(RangeExpr {
                    start: left_box,
                    end: Box::new(self.parse_expr(info.precedence + 1)?),
                }),
                BinaryShape::Generic => Expr::Binary(BinaryExpr {
                    left: left_box,
                    op,
                    right: Box::new(self.parse_expr(info.precedence + 1)?),
                }),
            };
            left = Spanned::new(node, position);
        }

        Ok(left)
    }

    /// The binary operator at the cursor and how many tokens spell it.
    ///
    /// Returns `None` for anything that does not continue a binary expression, including `>>=`/`>>>=` runs, which
    /// are assignments.
    fn peek_binary_op(&mut self) -> Result<Option<(BinaryOp, usize)>, Diagnostic> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Operator(OperatorId::Gt) => {
                let run = self.read_angle_run()?;
                if run.is_assignment() {
                    Ok(None)
                } else {
                    Ok(Some((run.binary_op(), run.width())))
                }
            }
            TokenKind::Operator(id) => match precedence::binary_from_operator(id) {
                Some(op) => Ok(Some((op, 1))),
                None if operators::category(id) == OperatorCategory::CompoundAssignment => {
                    self.compound_operator(id)?;
                    Ok(None)
                }
                None => Ok(None),
            },
            TokenKind::Keyword(id) => Ok(precedence::binary_from_keyword(id).map(|op| (op, 1))),
            TokenKind::Punctuation(id) => Ok(precedence::binary_from_punctuation(id).map(|op| (op, 1))),
            _ => Ok(None),
        }
    }

    /// Read the run of `>` tokens at the cursor without consuming it.
    ///
    /// A `>` with no adjacent `>` or `=` after it is a plain greater-than and skips speculation.
    fn read_angle_run(&mut self) -> Result<AngleRun, Diagnostic> {
        let gt = self.current();
        let next = self.peek(1);
        let adjacent = next.byte_offset == gt.byte_offset + gt.len;
        if !(adjacent && (next.is_operator(OperatorId::Gt) || next.is_operator(OperatorId::Eq))) {
            return Ok(AngleRun::Gt);
        }
        let candidates: [Candidate<Self, AngleRun>; 6] = [
            |p: &mut Self| {
                p.match_angle_run(
                    &[OperatorId::Gt, OperatorId::Gt, OperatorId::Gt, OperatorId::Eq],
                    AngleRun::UShrAssign,
                )
            },
            |p: &mut Self| p.match_angle_run(&[OperatorId::Gt, OperatorId::Gt, OperatorId::Gt], AngleRun::UShr),
            |p: &mut Self| p.match_angle_run(&[OperatorId::Gt, OperatorId::Gt, OperatorId::Eq], AngleRun::ShrAssign),
            |p: &mut Self| p.match_angle_run(&[OperatorId::Gt, OperatorId::Gt], AngleRun::Shr),
            |p: &mut Self| p.match_angle_run(&[OperatorId::Gt, OperatorId::Eq], AngleRun::Ge),
            |p: &mut Self| p.match_angle_run(&[OperatorId::Gt], AngleRun::Gt),
        ];
        let run = self.try_in_order(&candidates, |_, exhausted| {
            Err(exhausted.into_diagnostic("Parser::read_angle_run"))
        })?;
        tracing::trace!(?run, at = %self.position(), "angle run");
        Ok(run)
    }

    /// Succeed with `run` when the tokens at the cursor spell `shape` with nothing between them.
    fn match_angle_run(&self, shape: &[OperatorId], run: AngleRun) -> Result<AngleRun, Diagnostic> {
        let mut offset = self.current().byte_offset;
        for (k, id) in shape.iter().enumerate() {
            let token = self.peek(k);
            if !token.is_operator(*id) || token.byte_offset != offset {
                return Err(Diagnostic::syntax("Parser::match_angle_run", "Token does not continue the '>' run.")
                    .at_token(token));
            }
            offset += token.len;
        }
        Ok(run)
    }

    /// The operator a lexed compound assignment applies.
    fn compound_operator(&self, id: OperatorId) -> Result<BinaryOp, Diagnostic> {
        precedence::compound_base(id).ok_or_else(|| {
            ContractViolation::OperatorTableMiss {
                operator: operators::as_str(id).to_string(),
            }
            .into()
        })
    }

    fn parse_unary_or_primary(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let Some(id) = self.current().kind.operator_id().filter(|id| operators::is_prefix(*id)) else {
            return self.parse_primary();
        };
        let op = precedence::unary_from_operator(id).ok_or_else(|| ContractViolation::OperatorTableMiss {
            operator: operators::as_str(id).to_string(),
        })?;
        let position = self.position();
        self.buffer.advance();
        let operand = self.parse_expr(UNARY_PRECEDENCE)?;
        Ok(Spanned::new(
            Expr::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
            }),
            position,
        ))
    }

    fn parse_primary(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        const TAG: &str = "Parser::parse_primary";
        let position = self.position();
        let kind = self.current().kind;
        let node = match kind {
            TokenKind::Integer => Expr::Literal(self.parse_integer_literal()?),
            TokenKind::Float => Expr::Literal(self.parse_float_literal()?),
            TokenKind::Str => Expr::Literal(Literal::String(self.advance().text)),
            TokenKind::Keyword(KeywordId::True) => {
                self.buffer.advance();
                Expr::Literal(Literal::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.buffer.advance();
                Expr::Literal(Literal::Bool(false))
            }
            TokenKind::Keyword(KeywordId::Null) => {
                self.buffer.advance();
                Expr::Literal(Literal::Null)
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => Expr::Literal(Literal::Array(self.parse_elements()?)),
            TokenKind::Punctuation(PunctuationId::LBrace) => Expr::Literal(Literal::Map(self.parse_map_literal(false)?)),
            TokenKind::Keyword(KeywordId::Mut) => {
                if self.peek(1).is_punctuation(PunctuationId::LBracket) {
                    self.buffer.advance();
                    Expr::Literal(Literal::List(self.parse_elements()?))
                } else if self.peek(1).is_punctuation(PunctuationId::LBrace) {
                    self.buffer.advance();
                    Expr::Literal(Literal::Map(self.parse_map_literal(true)?))
                } else {
                    return Err(Diagnostic::syntax(TAG, "'mut' is only allowed before an array or map literal here.")
                        .at_token(self.current()));
                }
            }
            TokenKind::IntrinsicIdent => Expr::IntrinsicCall(self.parse_intrinsic_call()?),
            TokenKind::Keyword(KeywordId::Fx) => {
                self.buffer.advance();
                Expr::Literal(Literal::Function(Box::new(self.parse_function_signature()?)))
            }
            TokenKind::Keyword(KeywordId::With) => Expr::With(self.parse_with_expr()?),
            TokenKind::Ident => return self.parse_identifier_expr(),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                let open = self.advance();
                let inner = self.parse_expr(0)?;
                self.expect_closing(PunctuationId::RParen, &open, TAG)?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected(TAG)),
        };
        Ok(Spanned::new(node, position))
    }

    fn parse_integer_literal(&mut self) -> Result<Literal, Diagnostic> {
        let token = self.advance();
        token.text.parse::<i64>().map(Literal::Integer).map_err(|_| {
            Diagnostic::syntax(
                "Parser::parse_integer_literal",
                format!("Unable to read '{}' as an integer literal.", token.text),
            )
            .at_token(&token)
            .with_help(format!("Integer literals must lie between {} and {}.", i64::MIN, i64::MAX))
        })
    }

    fn parse_float_literal(&mut self) -> Result<Literal, Diagnostic> {
        let token = self.advance();
        token.text.parse::<f64>().map(Literal::Float).map_err(|_| {
            Diagnostic::syntax(
                "Parser::parse_float_literal",
                format!("Unable to read '{}' as a float literal.", token.text),
            )
            .at_token(&token)
        })
    }

    /// An identifier, call, assignment or compound assignment.
    fn parse_identifier_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        const TAG: &str = "Parser::parse_identifier_expr";
        let position = self.position();
        let name = self.expect_ident(TAG)?;
        let kind = self.current().kind;
        let node = match kind {
            TokenKind::Punctuation(PunctuationId::LParen) => Expr::FunctionCall(self.parse_call_arguments(name)?),
            TokenKind::Operator(OperatorId::Eq) => {
                self.buffer.advance();
                Expr::Assignment(AssignmentExpr {
                    target: name,
                    value: Box::new(self.parse_expr(0)?),
                })
            }
            TokenKind::Operator(OperatorId::Gt) => {
                let run = self.read_angle_run()?;
                if run.is_assignment() {
                    self.buffer.advance_by(run.width());
                    Expr::CompoundAssignment(CompoundAssignmentExpr {
                        target: name,
                        op: run.binary_op(),
                        value: Box::new(self.parse_expr(0)?),
                    })
                } else {
                    Expr::Identifier(name)
                }
            }
            TokenKind::Operator(id) if operators::category(id) == OperatorCategory::CompoundAssignment => {
                let op = self.compound_operator(id)?;
                self.buffer.advance();
                Expr::CompoundAssignment(CompoundAssignmentExpr {
                    target: name,
                    op,
                    value: Box::new(self.parse_expr(0)?),
                })
            }
            _ => Expr::Identifier(name),
        };
        Ok(Spanned::new(node, position))
    }

    /// `(a, b, key = c)` after the callee name.
    fn parse_call_arguments(&mut self, callee: Identifier) -> Result<FunctionCallExpr, Diagnostic> {
        const TAG: &str = "Parser::parse_function_call";
        let mut positional = Vec::new();
        let mut named = Vec::new();
        self.parse_delimited(PunctuationId::LParen, PunctuationId::RParen, TAG, |p| {
            if p.check_ident() && p.peek(1).is_operator(OperatorId::Eq) {
                let name = p.expect_ident(TAG)?;
                p.buffer.advance();
                let value = p.parse_expr(0)?;
                named.push(FunctionCallNamedParameter { name, value });
                return Ok(());
            }
            if !named.is_empty() {
                return Err(Diagnostic::syntax(TAG, "Positional arguments cannot follow named arguments.")
                    .at_token(p.current())
                    .with_help("Move this argument before the named ones."));
            }
            let index = positional.len();
            let value = p.parse_expr(0)?;
            positional.push(FunctionCallPositionalParameter { index, value });
            Ok(())
        })?;
        Ok(FunctionCallExpr {
            callee,
            positional,
            named,
        })
    }

    /// `@name(args)`; the name must be a known intrinsic.
    fn parse_intrinsic_call(&mut self) -> Result<IntrinsicCallExpr, Diagnostic> {
        const TAG: &str = "Parser::parse_intrinsic_call";
        let token = self.advance();
        let Some(intrinsic) = intrinsics::from_str(&token.text) else {
            return Err(Diagnostic::syntax(TAG, format!("I could not find an intrinsic named '@{}'.", token.text))
                .at_token(&token));
        };
        let arguments = self.parse_delimited(PunctuationId::LParen, PunctuationId::RParen, TAG, |p| p.parse_expr(0))?;
        Ok(IntrinsicCallExpr { intrinsic, arguments })
    }

    /// `with { name: value, ... }`
    fn parse_with_expr(&mut self) -> Result<WithExpr, Diagnostic> {
        const TAG: &str = "Parser::parse_with_expr";
        self.expect_keyword(KeywordId::With, TAG)?;
        let members = self.parse_delimited(PunctuationId::LBrace, PunctuationId::RBrace, TAG, |p| {
            let position = p.position();
            let name = p.expect_ident(TAG)?;
            p.expect_punct(PunctuationId::Colon, TAG)?;
            let value = p.parse_expr(0)?;
            Ok(WithExprMember { name, value, position })
        })?;
        Ok(WithExpr { members })
    }

    /// `[a, b]`; also the body of `mut [a, b]`.
    fn parse_elements(&mut self) -> Result<Vec<Spanned<Expr>>, Diagnostic> {
        self.parse_delimited(
            PunctuationId::LBracket,
            PunctuationId::RBracket,
            "Parser::parse_array_literal",
            |p| p.parse_expr(0),
        )
    }

    /// `{k: v, ...}`
    fn parse_map_literal(&mut self, mutable: bool) -> Result<MapLiteral, Diagnostic> {
        const TAG: &str = "Parser::parse_map_literal";
        let entries = self.parse_delimited(PunctuationId::LBrace, PunctuationId::RBrace, TAG, |p| {
            let key = p.parse_expr(0)?;
            p.expect_punct(PunctuationId::Colon, TAG)?;
            let value = p.parse_expr(0)?;
            Ok((key, value))
        })?;
        Ok(MapLiteral { entries, mutable })
    }
}
