/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `kira_syntax::lexer`.
///
/// ## Errors
/// Returns the first [`Diagnostic`] if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, Diagnostic> {
    let program = Parser::new(tokens).parse()?;
    tracing::debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}

/// Parse with a custom token window.
///
/// ## Errors
/// The outer `Err` is an [`InvalidWindowSize`]; the inner result is the parse outcome.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), window_size))]
pub fn parse_with_window_size(
    tokens: &[Token],
    window_size: usize,
) -> Result<Result<Program, Diagnostic>, InvalidWindowSize> {
    Ok(Parser::with_window_size(tokens, window_size)?.parse())
}
