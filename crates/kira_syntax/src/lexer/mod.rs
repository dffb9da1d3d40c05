//! Lexer for the Kira programming language
//!
//! Handles tokenization including:
//! - Keywords and identifiers (underscores only inside `@intrinsic` names)
//! - Decimal, float and `0x` hexadecimal literals
//! - String literals (escapes are kept verbatim)
//! - Operators and punctuation, with every `>` emitted as its own token
//! - Newlines, which are emitted as statement terminators
//!
//! Comments never reach the lexer; the host strips them beforehand.
//!
//! ## Module Structure
//!
//! - `cursor` - character cursor with line/column tracking
//! - `tokens` - token types (TokenKind, Token)

pub mod cursor;
pub mod tokens;

pub use cursor::SourceCursor;
pub use tokens::{Token, TokenKind, keyword_id};

use kira_core::lang::operators::OperatorId;
use kira_core::lang::punctuation::PunctuationId;

use crate::diagnostics::Diagnostic;
use crate::source::SourcePosition;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
//   skip blanks ─► '\n' ─► terminator token
//               ─► letter ─► identifier ─► keyword table lookup
//               ─► '@' ─► intrinsic identifier (underscores allowed)
//               ─► digit ─► hex | integer | float (only if '.' + digit)
//               ─► '"' ─► string (escapes kept, newline/EOF is fatal)
//               ─► symbol ─► greedy match, except '>' which is always single
// ============================================================================

const UNDERSCORE_HELP: &str =
    "Only intrinsics may contain underscores; use camelCase or PascalCase for identifiers.";

/// Lexer for Kira source code.
///
/// A lexer is fail-fast: the first malformed lexeme ends tokenization with a positioned [`Diagnostic`].
pub struct Lexer<'a> {
    cursor: SourceCursor<'a>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for already comment-stripped source.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            finished: false,
        }
    }

    /// Tokenize the entire source.
    ///
    /// The result always ends with exactly one `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Pull the next token.
    ///
    /// Once the input is exhausted every call returns a fresh `Eof` token.
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        self.skip_blanks();

        let start = self.cursor.offset();
        let position = self.cursor.position();

        let Some(c) = self.cursor.current() else {
            self.finished = true;
            return Ok(Token::eof(start, position));
        };

        match c {
            '\n' => {
                self.cursor.advance();
                Ok(Token::raw(
                    TokenKind::Punctuation(PunctuationId::Semicolon),
                    "\n",
                    start,
                    position,
                ))
            }
            '"' => self.lex_string(),
            '@' => self.lex_intrinsic(),
            '0'..='9' => self.lex_number(),
            '_' => Err(self.underscore_error(start, position)),
            _ if c.is_ascii_alphabetic() => self.lex_identifier(),
            _ => self.lex_symbol(c, start, position),
        }
    }

    /// Whether `next_token` has produced the end-of-input token.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn skip_blanks(&mut self) {
        self.cursor.eat_while(|c| c.is_whitespace() && c != '\n');
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn lex_identifier(&mut self) -> Result<Token, Diagnostic> {
        let start = self.cursor.offset();
        let position = self.cursor.position();

        self.cursor.eat_while(|c| c.is_ascii_alphanumeric());
        if self.cursor.current() == Some('_') {
            return Err(self.underscore_error(start, position));
        }

        let spelling = self.cursor.slice_from(start);
        let kind = match keyword_id(spelling) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident,
        };
        Ok(Token::raw(kind, spelling, start, position))
    }

    /// Report an underscore inside an ordinary identifier, naming the whole offending identifier.
    fn underscore_error(&self, start: usize, position: SourcePosition) -> Diagnostic {
        let mut name = self.cursor.slice_from(start).to_string();
        let mut k = 0;
        while let Some(c) = self.cursor.peek(k) {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            k += 1;
        }
        Diagnostic::lexical(
            "Lexer::lex_identifier",
            format!("Underscores are not allowed in identifiers: '{name}'."),
        )
        .at(position, start)
        .underline_text(&name)
        .with_help(UNDERSCORE_HELP)
    }

    fn lex_intrinsic(&mut self) -> Result<Token, Diagnostic> {
        let start = self.cursor.offset();
        let position = self.cursor.position();
        self.cursor.advance(); // '@'

        match self.cursor.current() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => {
                return Err(Diagnostic::lexical("Lexer::lex_intrinsic", "Expected an intrinsic name after '@'.")
                    .at(position, start)
                    .with_help("Intrinsics are written as '@name(...)', e.g. '@trace(x)'."));
            }
        }

        let name_start = self.cursor.offset();
        self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let name = self.cursor.slice_from(name_start);
        Ok(Token::raw(TokenKind::IntrinsicIdent, name, start, position).with_len(self.cursor.offset() - start))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Maximal munch over digits; a `.` only continues the literal when a digit follows it, so `1..2` is a range.
    fn lex_number(&mut self) -> Result<Token, Diagnostic> {
        let start = self.cursor.offset();
        let position = self.cursor.position();

        if self.cursor.current() == Some('0') && self.cursor.peek(1) == Some('x') {
            return self.lex_hex(start, position);
        }

        self.cursor.eat_while(|c| c.is_ascii_digit());
        let mut kind = TokenKind::Integer;
        if self.cursor.current() == Some('.') && self.cursor.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            kind = TokenKind::Float;
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
        Ok(Token::raw(kind, self.cursor.slice_from(start), start, position))
    }

    fn lex_hex(&mut self, start: usize, position: SourcePosition) -> Result<Token, Diagnostic> {
        self.cursor.advance();
        self.cursor.advance();
        let digits_start = self.cursor.offset();
        self.cursor.eat_while(|c| c.is_ascii_hexdigit());
        let digits = self.cursor.slice_from(digits_start);

        let trailing_garbage = self.cursor.current().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let value = if digits.is_empty() || trailing_garbage {
            None
        } else {
            i64::from_str_radix(digits, 16).ok()
        };

        match value {
            Some(value) => {
                let len = self.cursor.offset() - start;
                Ok(Token::raw(TokenKind::Integer, value.to_string(), start, position).with_len(len))
            }
            None => {
                self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let text = self.cursor.slice_from(start);
                Err(
                    Diagnostic::lexical("Lexer::lex_hex", format!("'{text}' is not a valid hex literal."))
                        .at(position, start)
                        .underline_text(text)
                        .with_help("Hex literals are '0x' followed by 0-9, a-f or A-F and must fit in 64 bits."),
                )
            }
        }
    }

    fn lex_string(&mut self) -> Result<Token, Diagnostic> {
        let start = self.cursor.offset();
        let position = self.cursor.position();
        self.cursor.advance(); // opening quote
        let content_start = self.cursor.offset();

        loop {
            match self.cursor.current() {
                Some('"') => break,
                None | Some('\n') => {
                    return Err(Diagnostic::lexical("Lexer::lex_string", "Unterminated string literal.")
                        .at(position, start)
                        .underline_text(self.cursor.slice_from(start))
                        .with_help("Insert '\"' to terminate it."));
                }
                // Escapes stay in the text; only skip the escaped character so `\"` does not close the string.
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.current().is_some_and(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }

        let content = self.cursor.slice_from(content_start);
        self.cursor.advance(); // closing quote
        Ok(Token::raw(TokenKind::Str, content, start, position).with_len(self.cursor.offset() - start))
    }

    // ========================================================================
    // Operators and punctuation
    // ========================================================================

    fn lex_symbol(&mut self, c: char, start: usize, position: SourcePosition) -> Result<Token, Diagnostic> {
        self.cursor.advance();
        let kind = match c {
            '+' => self.operator(OperatorId::Plus, &[('=', OperatorId::PlusEq)]),
            '-' => self.operator(OperatorId::Minus, &[('=', OperatorId::MinusEq)]),
            '*' => self.operator(OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '/' => self.operator(OperatorId::Slash, &[('=', OperatorId::SlashEq)]),
            '%' => self.operator(OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '=' => self.operator(OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '!' => self.operator(OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '^' => self.operator(OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
            '&' => self.operator(OperatorId::Amp, &[('&', OperatorId::AndAnd), ('=', OperatorId::AmpEq)]),
            '|' => self.operator(OperatorId::Pipe, &[('|', OperatorId::OrOr), ('=', OperatorId::PipeEq)]),
            '.' => self.operator(OperatorId::Dot, &[('.', OperatorId::DotDot)]),
            '~' => TokenKind::Operator(OperatorId::Tilde),
            '<' => {
                if self.cursor.eat('<') {
                    self.operator(OperatorId::Shl, &[('=', OperatorId::ShlEq)])
                } else {
                    self.operator(OperatorId::Lt, &[('=', OperatorId::LtEq)])
                }
            }
            // Never merged: the parser decides between `>`, `>=`, `>>`, `>>>`, `>>=`, `>>>=` and generic closes.
            '>' => TokenKind::Operator(OperatorId::Gt),
            ':' => {
                if self.cursor.eat(':') {
                    TokenKind::Punctuation(PunctuationId::ColonColon)
                } else {
                    TokenKind::Punctuation(PunctuationId::Colon)
                }
            }
            ',' => TokenKind::Punctuation(PunctuationId::Comma),
            ';' => TokenKind::Punctuation(PunctuationId::Semicolon),
            '?' => TokenKind::Punctuation(PunctuationId::Question),
            '(' => TokenKind::Punctuation(PunctuationId::LParen),
            ')' => TokenKind::Punctuation(PunctuationId::RParen),
            '[' => TokenKind::Punctuation(PunctuationId::LBracket),
            ']' => TokenKind::Punctuation(PunctuationId::RBracket),
            '{' => TokenKind::Punctuation(PunctuationId::LBrace),
            '}' => TokenKind::Punctuation(PunctuationId::RBrace),
            _ => {
                return Err(Diagnostic::lexical("Lexer::next_token", format!("Symbol '{c}' is not known."))
                    .at(position, start)
                    .with_help(format!("Remove '{c}' at line {}, column {}.", position.line, position.column)));
            }
        };
        Ok(Token::symbol(kind, start, position))
    }

    /// Try each `(next_char, compound)` pair in order, falling back to `simple`.
    fn operator(&mut self, simple: OperatorId, compounds: &[(char, OperatorId)]) -> TokenKind {
        for (c, id) in compounds {
            if self.cursor.eat(*c) {
                return TokenKind::Operator(*id);
            }
        }
        TokenKind::Operator(simple)
    }
}

/// Tokenize comment-stripped Kira source.
///
/// ## Errors
/// Returns the first lexical [`Diagnostic`].
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Diagnostic> {
    let tokens = Lexer::new(source).tokenize()?;
    tracing::debug!(token_count = tokens.len(), "lexed source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kira_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        lex(source).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_float_requires_digit_after_dot() {
        assert_eq!(kinds("123.45"), vec![TokenKind::Float, TokenKind::Eof]);
        assert_eq!(texts("123.45")[0], "123.45");
        assert_eq!(
            kinds("123.abc"),
            vec![
                TokenKind::Integer,
                TokenKind::Operator(OperatorId::Dot),
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_range_between_integers() {
        assert_eq!(
            kinds("1..10"),
            vec![
                TokenKind::Integer,
                TokenKind::Operator(OperatorId::DotDot),
                TokenKind::Integer,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_close_angles_are_never_merged() {
        assert_eq!(
            kinds(">>>="),
            vec![
                TokenKind::Operator(OperatorId::Gt),
                TokenKind::Operator(OperatorId::Gt),
                TokenKind::Operator(OperatorId::Gt),
                TokenKind::Operator(OperatorId::Eq),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_open_angle_family_is_greedy() {
        assert_eq!(kinds("<<=")[0], TokenKind::Operator(OperatorId::ShlEq));
        assert_eq!(kinds("<<")[0], TokenKind::Operator(OperatorId::Shl));
        assert_eq!(kinds("<=")[0], TokenKind::Operator(OperatorId::LtEq));
    }

    #[test]
    fn test_newline_is_a_terminator() {
        let tokens = lex("a\nb;").unwrap();
        assert!(tokens[1].kind.is_terminator());
        assert_eq!(tokens[1].text, "\n");
        assert!(tokens[3].kind.is_terminator());
        assert_eq!(tokens[3].text, ";");
        assert_eq!(tokens[2].position, SourcePosition::new(2, 1));
    }

    #[test]
    fn test_keywords_are_matched_after_scanning() {
        assert_eq!(kinds("while")[0], TokenKind::Keyword(KeywordId::While));
        assert_eq!(kinds("whilex")[0], TokenKind::Ident);
        assert_eq!(kinds("null")[0], TokenKind::Keyword(KeywordId::Null));
    }

    #[test]
    fn test_underscore_in_identifier_is_rejected() {
        let err = lex("x = my_var").unwrap_err();
        assert_eq!(err.tag, "Lexer::lex_identifier");
        assert!(err.message.contains("'my_var'"));
        assert_eq!(err.location, Some(SourcePosition::new(1, 5)));
        assert_eq!(err.underline_length, 6);
    }

    #[test]
    fn test_leading_underscore_is_rejected() {
        let err = lex("_hidden").unwrap_err();
        assert!(err.message.contains("'_hidden'"));
    }

    #[test]
    fn test_intrinsics_may_contain_underscores() {
        let tokens = lex("@op_bit_and(a, b)").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntrinsicIdent);
        assert_eq!(tokens[0].text, "op_bit_and");
        assert_eq!(tokens[1].kind, TokenKind::Punctuation(PunctuationId::LParen));
    }

    #[test]
    fn test_stray_at_sign() {
        let err = lex("@ 1").unwrap_err();
        assert_eq!(err.tag, "Lexer::lex_intrinsic");
    }

    #[test]
    fn test_hex_literal_is_normalized() {
        let tokens = lex("0xFF").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].text, "255");
    }

    #[test]
    fn test_invalid_hex_literal() {
        let err = lex("x = 0xZZ").unwrap_err();
        assert_eq!(err.message, "'0xZZ' is not a valid hex literal.");
        assert_eq!(err.location, Some(SourcePosition::new(1, 5)));
        assert!(lex("0x").is_err());
        assert!(lex("0x1FFFFFFFFFFFFFFFF").is_err());
    }

    #[test]
    fn test_token_length_covers_the_source_lexeme() {
        let source = "0xFF \"déjà\" @trace x";
        let tokens = lex(source).unwrap();
        let lexemes: Vec<&str> = tokens[..4]
            .iter()
            .map(|t| &source[t.byte_offset..t.byte_offset + t.len])
            .collect();
        assert_eq!(lexemes, ["0xFF", "\"déjà\"", "@trace", "x"]);
        assert_eq!(tokens[1].width(), 6);
        assert_eq!(tokens[1].len, 8);
        assert_eq!(tokens[4].byte_offset, source.len());
    }

    #[test]
    fn test_string_keeps_escapes() {
        let tokens = lex(r#""a\"b\n""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].text, r#"a\"b\n"#);
    }

    #[test]
    fn test_unterminated_string_points_at_opening_quote() {
        let err = lex("x = 1\ny = \"abc\nz").unwrap_err();
        assert_eq!(err.tag, "Lexer::lex_string");
        assert_eq!(err.location, Some(SourcePosition::new(2, 5)));
        assert_eq!(err.underline_length, 4);
    }

    #[test]
    fn test_unknown_symbol_position() {
        let err = lex("a = 1\n  $").unwrap_err();
        assert_eq!(err.message, "Symbol '$' is not known.");
        assert_eq!(err.location, Some(SourcePosition::new(2, 3)));
    }

    #[test]
    fn test_exactly_one_eof() {
        let tokens = lex("a b c\n").unwrap();
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn test_next_token_keeps_returning_eof() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.is_finished());
        assert!(lexer.next_token().unwrap().is_eof());
    }
}
