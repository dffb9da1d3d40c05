/// Declaration parsing methods.
///
/// This chunk parses modifiers and every declaration form:
/// - Variables (`name: Type = value`) and functions (`name(params): Ret { body }`)
/// - `class`, `enum`, `namespace`, `trait`, `type` and `variant` declarations
/// - `module` and the URI shape shared with `use`
///
/// ## Notes
/// - Modifiers are collected first and validated once the construct they attach to is known. Members are validated
///   against their member context (`class member`, `trait member`, `namespace member`) instead of the construct's own.
impl<'a> Parser<'a> {
    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Collect leading modifier keywords.
    ///
    /// `mut` directly followed by `[` or `{` starts a literal and is left alone.
    fn parse_modifiers(&mut self) -> Result<Vec<ParsedModifier>, Diagnostic> {
        let mut parsed: Vec<ParsedModifier> = Vec::new();
        while let Some(id) = self.current().keyword_id().and_then(modifiers::from_keyword) {
            if id == ModifierId::Mutable
                && (self.peek(1).is_punctuation(PunctuationId::LBracket)
                    || self.peek(1).is_punctuation(PunctuationId::LBrace))
            {
                break;
            }
            if let Some(previous) = parsed.iter().find(|m| m.modifier.id == id) {
                return Err(Diagnostic::syntax(
                    "Parser::parse_modifiers",
                    format!("The modifier '{id}' was already specified at {}.", previous.modifier.position),
                )
                .at_token(self.current())
                .with_help("Remove the duplicate modifier."));
            }
            let token = self.advance();
            parsed.push(ParsedModifier {
                modifier: Modifier {
                    id,
                    position: token.position,
                },
                token,
            });
        }
        Ok(parsed)
    }

    /// Reject modifiers that are not allowed in `context`.
    fn check_modifiers(
        &self,
        parsed: Vec<ParsedModifier>,
        context: ModifierContext,
    ) -> Result<Vec<Modifier>, Diagnostic> {
        if let Some(bad) = parsed.iter().find(|m| !modifiers::is_allowed(m.modifier.id, context)) {
            let description = context.description();
            let article = if description.starts_with(['a', 'e', 'i', 'o', 'u']) { "an" } else { "a" };
            return Err(Diagnostic::syntax(
                "Parser::check_modifiers",
                format!(
                    "The modifier '{}' cannot be applied to {article} {description}.",
                    bad.modifier.id
                ),
            )
            .at_token(&bad.token));
        }
        Ok(parsed.into_iter().map(|m| m.modifier).collect())
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Whether the tokens at the cursor (after any modifiers) start a declaration.
    fn declaration_ahead(&self) -> bool {
        match self.current().kind {
            TokenKind::Keyword(
                KeywordId::Class
                | KeywordId::Enum
                | KeywordId::Namespace
                | KeywordId::Trait
                | KeywordId::Type
                | KeywordId::Variant,
            ) => true,
            TokenKind::Ident => {
                self.peek(1).is_punctuation(PunctuationId::Colon)
                    || (self.peek(1).is_punctuation(PunctuationId::LParen) && self.is_function_decl_syntax())
            }
            _ => false,
        }
    }

    /// Decide whether `name(` starts a function declaration or a call.
    ///
    /// Scans forward from the token after `(`, skipping balanced `(`, `[` and `{` groups. At the outer level, an
    /// identifier followed by `:` is a typed parameter (a declaration), and the closing `)` means a declaration only
    /// when a `:` return type follows. Reaching the end of input means a call; the call parser then reports the
    /// missing `)`.
    ///
    /// ## Notes
    /// - Map literals, `with { k: v }` and `fx(a: T): R { }` arguments keep their colons inside a group, or after a
    ///   `)` rather than an identifier, so they never decide.
    fn is_function_decl_syntax(&self) -> bool {
        let mut k = 2;
        let mut depth = 0usize;
        let decl = loop {
            let token = self.peek(k);
            match token.kind {
                TokenKind::Punctuation(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => {
                    depth += 1;
                }
                TokenKind::Punctuation(PunctuationId::RParen) if depth == 0 => {
                    break self.peek(k + 1).is_punctuation(PunctuationId::Colon);
                }
                TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Punctuation(PunctuationId::Colon) if depth == 0 => {
                    if self.peek(k - 1).kind == TokenKind::Ident {
                        break true;
                    }
                }
                TokenKind::Eof => break false,
                _ => {}
            }
            k += 1;
        };
        tracing::trace!(name = %self.current().text, scanned = k, decl, "call/decl scan");
        decl
    }

    /// Parse the declaration at the cursor.
    ///
    /// `member_of` replaces the construct's own modifier context for members of a namespace.
    fn parse_declaration(
        &mut self,
        parsed: Vec<ParsedModifier>,
        member_of: Option<ModifierContext>,
    ) -> Result<Decl, Diagnostic> {
        let context = |own: ModifierContext| member_of.unwrap_or(own);
        let kind = self.current().kind;
        let decl = match kind {
            TokenKind::Keyword(KeywordId::Class) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Class))?;
                Decl::Class(self.parse_class_decl(modifiers)?)
            }
            TokenKind::Keyword(KeywordId::Enum) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Enum))?;
                Decl::Enum(self.parse_enum_decl(modifiers)?)
            }
            TokenKind::Keyword(KeywordId::Namespace) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Namespace))?;
                Decl::Namespace(self.parse_namespace_decl(modifiers)?)
            }
            TokenKind::Keyword(KeywordId::Trait) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Trait))?;
                Decl::Trait(self.parse_trait_decl(modifiers)?)
            }
            TokenKind::Keyword(KeywordId::Type) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::TypeAlias))?;
                Decl::TypeAlias(self.parse_type_alias_decl(modifiers)?)
            }
            TokenKind::Keyword(KeywordId::Variant) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Variant))?;
                Decl::Variant(self.parse_variant_decl(modifiers)?)
            }
            TokenKind::Ident if self.peek(1).is_punctuation(PunctuationId::Colon) => {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Variable))?;
                Decl::Variable(self.parse_variable_decl(modifiers)?)
            }
            TokenKind::Ident
                if self.peek(1).is_punctuation(PunctuationId::LParen) && self.is_function_decl_syntax() =>
            {
                let modifiers = self.check_modifiers(parsed, context(ModifierContext::Function))?;
                Decl::Function(self.parse_function_decl(modifiers)?)
            }
            _ => return Err(self.expected("Parser::parse_declaration", "a declaration")),
        };
        Ok(decl)
    }

    /// Parse `{ member* }` where members are separated by terminators.
    fn parse_member_block(
        &mut self,
        tag: &'static str,
        mut member: impl FnMut(&mut Self) -> Result<Spanned<Decl>, Diagnostic>,
    ) -> Result<Vec<Spanned<Decl>>, Diagnostic> {
        let open = self.expect_punct(PunctuationId::LBrace, tag)?;
        let mut members = Vec::new();
        loop {
            self.skip_terminators();
            if self.check_punct(PunctuationId::RBrace) || self.is_at_end() {
                break;
            }
            members.push(member(self)?);
        }
        self.expect_closing(PunctuationId::RBrace, &open, tag)?;
        Ok(members)
    }

    // ========================================================================
    // Variables and functions
    // ========================================================================

    /// `name: Type (= value)?`
    fn parse_variable_decl(&mut self, modifiers: Vec<Modifier>) -> Result<VariableDecl, Diagnostic> {
        let name = self.expect_ident("Parser::parse_variable_decl")?;
        self.expect_punct(PunctuationId::Colon, "Parser::parse_variable_decl")?;
        let ty = self.parse_type()?;
        let value = if self.match_op(OperatorId::Eq) {
            Some(Box::new(self.parse_expr(0)?))
        } else {
            None
        };
        Ok(VariableDecl {
            name,
            ty,
            value,
            modifiers,
        })
    }

    /// `name(params): Ret { body }?`
    fn parse_function_decl(&mut self, modifiers: Vec<Modifier>) -> Result<FunctionDecl, Diagnostic> {
        let name = self.expect_ident("Parser::parse_function_decl")?;
        let literal = self.parse_function_signature()?;
        Ok(FunctionDecl {
            name,
            literal,
            modifiers,
        })
    }

    /// `(params): Ret { body }?`, shared by declarations and `fx` literals.
    fn parse_function_signature(&mut self) -> Result<FunctionLiteral, Diagnostic> {
        let parameters = self.parse_delimited(
            PunctuationId::LParen,
            PunctuationId::RParen,
            "Parser::parse_function_parameters",
            |p| p.parse_function_parameter(),
        )?;
        self.expect_punct(PunctuationId::Colon, "Parser::parse_function_signature")?;
        let return_type = self.parse_type()?;
        let body = if self.check_punct(PunctuationId::LBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(FunctionLiteral {
            parameters,
            return_type,
            body,
        })
    }

    /// `mods name: Type`
    fn parse_function_parameter(&mut self) -> Result<FunctionParameter, Diagnostic> {
        let position = self.position();
        let parsed = self.parse_modifiers()?;
        let modifiers = self.check_modifiers(parsed, ModifierContext::FunctionParameter)?;
        let name = self.expect_ident("Parser::parse_function_parameter")?;
        self.expect_punct(PunctuationId::Colon, "Parser::parse_function_parameter")?;
        let ty = self.parse_type()?;
        Ok(FunctionParameter {
            name,
            ty,
            modifiers,
            position,
        })
    }

    // ========================================================================
    // Classes, variants and traits
    // ========================================================================

    /// `class Name<T> : Parent { members }?`
    fn parse_class_decl(&mut self, modifiers: Vec<Modifier>) -> Result<ClassDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Class, "Parser::parse_class_decl")?;
        let name = self.expect_ident("Parser::parse_class_decl")?;
        let generics = if self.check_op(OperatorId::Lt) {
            self.parse_generic_arguments()?
        } else {
            Vec::new()
        };
        let parent = if self.match_punct(PunctuationId::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let members = if self.check_punct(PunctuationId::LBrace) {
            Some(self.parse_member_block("Parser::parse_class_decl", |p| p.parse_class_member(false))?)
        } else {
            None
        };
        Ok(ClassDecl {
            name,
            generics,
            parent,
            members,
            modifiers,
        })
    }

    /// A variable or function member; inside a variant, also a `class` case.
    fn parse_class_member(&mut self, allow_cases: bool) -> Result<Spanned<Decl>, Diagnostic> {
        const TAG: &str = "Parser::parse_class_member";
        let position = self.position();
        let parsed = self.parse_modifiers()?;

        let decl = if allow_cases && self.check_keyword(KeywordId::Class) {
            let modifiers = self.check_modifiers(parsed, ModifierContext::Class)?;
            Decl::Class(self.parse_class_decl(modifiers)?)
        } else if self.check_ident() && self.peek(1).is_punctuation(PunctuationId::Colon) {
            let modifiers = self.check_modifiers(parsed, ModifierContext::ClassMember)?;
            Decl::Variable(self.parse_variable_decl(modifiers)?)
        } else if self.check_ident() && self.peek(1).is_punctuation(PunctuationId::LParen) {
            if !self.is_function_decl_syntax() {
                return Err(self
                    .expected(TAG, "a function declaration")
                    .with_help("Calls are not allowed directly in a class body."));
            }
            let modifiers = self.check_modifiers(parsed, ModifierContext::ClassMember)?;
            Decl::Function(self.parse_function_decl(modifiers)?)
        } else {
            return Err(self.expected(TAG, "a variable or function declaration"));
        };
        Ok(Spanned::new(decl, position))
    }

    /// `variant Name : Parent { class cases and members }`
    fn parse_variant_decl(&mut self, modifiers: Vec<Modifier>) -> Result<VariantDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Variant, "Parser::parse_variant_decl")?;
        let name = self.expect_ident("Parser::parse_variant_decl")?;
        let parent = if self.match_punct(PunctuationId::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let members = self.parse_member_block("Parser::parse_variant_decl", |p| p.parse_class_member(true))?;
        Ok(VariantDecl {
            name,
            parent,
            members,
            modifiers,
        })
    }

    /// `trait Name : A, B { function members }?`
    fn parse_trait_decl(&mut self, modifiers: Vec<Modifier>) -> Result<TraitDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Trait, "Parser::parse_trait_decl")?;
        let name = self.expect_ident("Parser::parse_trait_decl")?;
        let mut parents = Vec::new();
        if self.match_punct(PunctuationId::Colon) {
            parents.push(self.parse_type()?);
            while self.match_punct(PunctuationId::Comma) {
                parents.push(self.parse_type()?);
            }
        }
        let members = if self.check_punct(PunctuationId::LBrace) {
            Some(self.parse_member_block("Parser::parse_trait_decl", |p| p.parse_trait_member())?)
        } else {
            None
        };
        Ok(TraitDecl {
            name,
            parents,
            members,
            modifiers,
        })
    }

    fn parse_trait_member(&mut self) -> Result<Spanned<Decl>, Diagnostic> {
        let position = self.position();
        let parsed = self.parse_modifiers()?;
        if !(self.check_ident()
            && self.peek(1).is_punctuation(PunctuationId::LParen)
            && self.is_function_decl_syntax())
        {
            return Err(self.expected("Parser::parse_trait_member", "a function declaration"));
        }
        let modifiers = self.check_modifiers(parsed, ModifierContext::TraitMember)?;
        let decl = self.parse_function_decl(modifiers)?;
        Ok(Spanned::new(Decl::Function(decl), position))
    }

    // ========================================================================
    // Enums, namespaces, aliases
    // ========================================================================

    /// `enum Name { A, B = literal }`
    fn parse_enum_decl(&mut self, modifiers: Vec<Modifier>) -> Result<EnumDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Enum, "Parser::parse_enum_decl")?;
        let name = self.expect_ident("Parser::parse_enum_decl")?;
        let members = self.parse_delimited(
            PunctuationId::LBrace,
            PunctuationId::RBrace,
            "Parser::parse_enum_decl",
            |p| p.parse_enum_member(),
        )?;
        Ok(EnumDecl {
            name,
            members,
            modifiers,
        })
    }

    fn parse_enum_member(&mut self) -> Result<EnumMemberExpr, Diagnostic> {
        let position = self.position();
        let name = self.expect_ident("Parser::parse_enum_member")?;
        let value = if self.match_op(OperatorId::Eq) {
            let start = self.current().clone();
            match self.parse_primary()?.node {
                Expr::Literal(
                    literal @ (Literal::Integer(_)
                    | Literal::Float(_)
                    | Literal::String(_)
                    | Literal::Bool(_)
                    | Literal::Null),
                ) => Some(literal),
                _ => {
                    return Err(Diagnostic::syntax(
                        "Parser::parse_enum_member",
                        "Only simple literals are allowed as enum values.",
                    )
                    .at_token(&start)
                    .with_help("Use a string, boolean, float, integer or null literal."));
                }
            }
        } else {
            None
        };
        Ok(EnumMemberExpr { name, value, position })
    }

    /// `namespace Name { declarations }`
    fn parse_namespace_decl(&mut self, modifiers: Vec<Modifier>) -> Result<NamespaceDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Namespace, "Parser::parse_namespace_decl")?;
        let name = self.expect_ident("Parser::parse_namespace_decl")?;
        let members = self.nested(|p| {
            p.parse_member_block("Parser::parse_namespace_decl", |p| {
                let position = p.position();
                let parsed = p.parse_modifiers()?;
                let decl = p.parse_declaration(parsed, Some(ModifierContext::NamespaceMember))?;
                Ok(Spanned::new(decl, position))
            })
        })?;
        Ok(NamespaceDecl {
            name,
            members,
            modifiers,
        })
    }

    /// `type Alias = Target`
    fn parse_type_alias_decl(&mut self, modifiers: Vec<Modifier>) -> Result<TypeAliasDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Type, "Parser::parse_type_alias_decl")?;
        let name = self.expect_ident("Parser::parse_type_alias_decl")?;
        self.expect_op(OperatorId::Eq, "Parser::parse_type_alias_decl")?;
        let target = self.parse_type()?;
        Ok(TypeAliasDecl {
            name,
            target,
            modifiers,
        })
    }

    // ========================================================================
    // Modules
    // ========================================================================

    /// `module "author:path"`
    fn parse_module_decl(&mut self) -> Result<ModuleDecl, Diagnostic> {
        self.expect_keyword(KeywordId::Module, "Parser::parse_module_decl")?;
        let uri = self.parse_uri("Parser::parse_module_decl")?;
        Ok(ModuleDecl { uri })
    }

    /// A string literal of the form `author:path` with both parts non-empty.
    fn parse_uri(&mut self, tag: &'static str) -> Result<String, Diagnostic> {
        let token = self.expect_string(tag)?;
        match token.text.split_once(':') {
            Some((author, path)) if !author.is_empty() && !path.is_empty() => Ok(token.text),
            _ => Err(
                Diagnostic::syntax(tag, format!("'{}' is not a valid module URI.", token.text))
                    .at_token(&token)
                    .with_help("Module URIs have the form \"author:path\"."),
            ),
        }
    }
}
