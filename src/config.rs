//! Front-end configuration for Kira
//!
//! Everything that used to be a process-wide switch (Unicode markers, verbose logging) lives in one explicit value
//! that is threaded through the pipeline.

use kira_syntax::diagnostics::DiagnosticStyle;
use kira_syntax::token_buffer::{self, DEFAULT_WINDOW_SIZE, InvalidWindowSize};

/// Errors raised by [`KiraConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid window size: {0}")]
    WindowSize(#[from] InvalidWindowSize),
}

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KiraConfig {
    /// Number of tokens the parser keeps in its lookahead window
    pub window_size: usize,
    /// Marker style used when rendering diagnostics
    pub diagnostic_style: DiagnosticStyle,
    /// Raise the default log level to `debug`
    pub verbose: bool,
    /// Run the comment-stripping preprocessor before lexing
    pub strip_comments: bool,
}

impl Default for KiraConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            diagnostic_style: DiagnosticStyle::Ascii,
            verbose: false,
            strip_comments: true,
        }
    }
}

impl KiraConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the diagnostic marker style
    pub fn with_diagnostic_style(mut self, style: DiagnosticStyle) -> Self {
        self.diagnostic_style = style;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    /// Check that the configuration can drive a parser.
    ///
    /// ## Errors
    /// [`ConfigError::WindowSize`] unless the window is a power of two in `4..=64`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        token_buffer::validate_window_size(self.window_size)?;
        Ok(())
    }

    /// Default `tracing` filter directive for this configuration.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
