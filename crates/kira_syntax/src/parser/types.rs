/// Type parsing methods.
///
/// ## Notes
/// - A generic argument list is closed by exactly one `>` token. Runs such as the `>>>` ending
///   `Array<Array<Array<Int32>>>` are consumed one token at a time here and never go through the
///   operator-position angle-run matcher in `expr.rs`.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    /// Parse `Name`, `Name<T, U>` and the nullable suffix `Name?`.
    ///
    /// ## Errors
    /// A syntax diagnostic when the name is missing or a generic list is left open.
    pub fn parse_type(&mut self) -> Result<TypeSpecifier, Diagnostic> {
        let position = self.position();
        let name = self.expect_ident("Parser::parse_type")?.name;
        let generics = if self.check_op(OperatorId::Lt) {
            self.parse_generic_arguments()?
        } else {
            Vec::new()
        };
        let nullable = self.match_punct(PunctuationId::Question);
        Ok(TypeSpecifier {
            name,
            generics,
            nullable,
            position,
        })
    }

    /// `<T, U>`
    fn parse_generic_arguments(&mut self) -> Result<Vec<TypeSpecifier>, Diagnostic> {
        self.nested(Self::parse_generic_list)
    }

    fn parse_generic_list(&mut self) -> Result<Vec<TypeSpecifier>, Diagnostic> {
        let open = self.expect_op(OperatorId::Lt, "Parser::parse_type")?;
        let mut generics = vec![self.parse_type()?];
        while self.match_punct(PunctuationId::Comma) {
            generics.push(self.parse_type()?);
        }
        if !self.match_op(OperatorId::Gt) {
            return Err(self
                .expected("Parser::parse_type", "'>'")
                .with_help(format!("The '<' at {} is never closed.", open.position)));
        }
        Ok(generics)
    }
}
