//! Error handling for the Tempy CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use tempy_core::error::TempyError;

// Re-export so callers only need `use crate::error::*`.
pub use tempy_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input caught at the CLI layer before the core runs.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// An error propagated from `tempy-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("{0}")]
    Core(#[from] TempyError),

    /// An I/O operation at the CLI layer failed (terminal writes, mostly).
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(TempyError::NotFound { name }) => vec![
                format!("No template named '{name}' was found"),
                "List available templates: tempy list".into(),
                "Check the template directory with --tempydir".into(),
            ],

            Self::Core(TempyError::NoParser { .. }) => vec![
                "The template declares no [[parser.arg]] entries".into(),
                "Add a parser declaration to its metadata block".into(),
            ],

            Self::Core(TempyError::InvalidArguments { usage, .. }) => {
                usage.lines().map(str::to_string).collect()
            }

            Self::Core(TempyError::Collision { path }) => vec![
                format!("'{}' already exists and was not overwritten", path.display()),
                "Choose a different output directory with --output".into(),
                "Files written before the collision were kept".into(),
            ],

            Self::Core(TempyError::CreateDir { path, .. }) => vec![
                format!("Could not create '{}'", path.display()),
                "Check permissions on the parent directory".into(),
            ],

            Self::Core(
                TempyError::Metadata { .. }
                | TempyError::Format { .. }
                | TempyError::TemplateSyntax { .. },
            ) => vec![
                "The template itself is broken".into(),
                "Run with -v for the full error chain".into(),
            ],

            Self::Core(TempyError::Io { .. }) => vec![
                "Check file permissions and available disk space".into(),
            ],

            Self::InvalidInput { .. } => vec![
                "Use --help for usage information".into(),
            ],

            Self::Io { .. } => vec![],
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// Every reported failure exits 1; argument-parse failures never reach
    /// this point (clap exits 2 on its own).
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n",
            "\u{2717}".red().bold(), // ✗
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "  {} {}\n",
                    "\u{2192}".dimmed(), // →
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::NotFound | CoreCategory::Usage => {
                    tracing::warn!("User error: {}", self)
                }
                CoreCategory::Conflict => tracing::warn!("Conflict: {}", self),
                CoreCategory::Load | CoreCategory::Io => {
                    tracing::error!("Operation failed: {}", self)
                }
            },
            Self::InvalidInput { .. } => tracing::warn!("User error: {}", self),
            Self::Io { .. } => tracing::error!("I/O error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}
