/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its [`Speculative`] implementation and the top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Deepest nesting of expressions, blocks, types and declarations the parser descends into.
///
/// Each parenthesized group, prefix operator, block, generic argument list and nested declaration counts one level.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A modifier together with the token it was written as, kept until the modifier is validated.
#[derive(Debug, Clone)]
struct ParsedModifier {
    modifier: Modifier,
    token: Token,
}

/// How a run of `>` tokens (optionally closed by `=`) is read in operator position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AngleRun {
    /// `>>>=`
    UShrAssign,
    /// `>>>`
    UShr,
    /// `>>=`
    ShrAssign,
    /// `>>`
    Shr,
    /// `>=`
    Ge,
    /// `>`
    Gt,
}

impl AngleRun {
    /// Number of raw tokens the run covers.
    fn width(self) -> usize {
        match self {
            AngleRun::UShrAssign => 4,
            AngleRun::UShr | AngleRun::ShrAssign => 3,
            AngleRun::Shr | AngleRun::Ge => 2,
            AngleRun::Gt => 1,
        }
    }

    fn is_assignment(self) -> bool {
        matches!(self, AngleRun::UShrAssign | AngleRun::ShrAssign)
    }

    fn binary_op(self) -> BinaryOp {
        match self {
            AngleRun::UShrAssign | AngleRun::UShr => BinaryOp::UShr,
            AngleRun::ShrAssign | AngleRun::Shr => BinaryOp::Shr,
            AngleRun::Ge => BinaryOp::Ge,
            AngleRun::Gt => BinaryOp::Gt,
        }
    }
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and fails fast: the first diagnostic aborts the compilation unit.
/// - Every parser owns its token buffer and prediction stack; nothing is shared between instances.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    buffer: TokenBuffer<'a>,
    stack: PredictionStack,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream with the default token window.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `kira_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            buffer: TokenBuffer::new(tokens),
            stack: PredictionStack::new(),
            depth: 0,
        }
    }

    /// Create a parser with a custom token window.
    ///
    /// ## Errors
    /// [`InvalidWindowSize`] unless `window_size` is a power of two in `4..=64`.
    pub fn with_window_size(tokens: &'a [Token], window_size: usize) -> Result<Self, InvalidWindowSize> {
        Ok(Self {
            buffer: TokenBuffer::with_window_size(tokens, window_size)?,
            stack: PredictionStack::new(),
            depth: 0,
        })
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns the first [`Diagnostic`] encountered. A program whose first statement is not a
    /// `module "author:path"` declaration is rejected before anything else is parsed.
    pub fn parse(mut self) -> Result<Program, Diagnostic> {
        self.skip_terminators();
        if !self.check_keyword(KeywordId::Module) {
            return Err(Diagnostic::syntax(
                "Parser::parse",
                format!(
                    "The first statement must be a module declaration, but found {}.",
                    self.current().describe()
                ),
            )
            .at_token(self.current())
            .with_help("Start the file with 'module \"author:path\"'."));
        }

        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.skip_terminators();
        }

        debug_assert!(self.stack.is_empty(), "prediction stack not balanced after parse");
        Ok(Program { statements })
    }

    /// Run `parse` one nesting level deeper.
    ///
    /// ## Errors
    /// A syntax diagnostic at the current token once [`MAX_NESTING_DEPTH`] levels are open.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, Diagnostic>) -> Result<T, Diagnostic> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Diagnostic::syntax(
                "Parser::nested",
                format!("Nesting is deeper than {MAX_NESTING_DEPTH} levels."),
            )
            .at_token(self.current())
            .with_help("Move part of it into a separate variable or function."));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}

impl Speculative for Parser<'_> {
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
