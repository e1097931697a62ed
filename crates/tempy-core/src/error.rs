//! Error types shared across the core and its adapters.
//!
//! Two propagation regimes exist (and tests pin both):
//!
//! - **Load time** (during a store scan): `Metadata`, `Format`,
//!   `TemplateSyntax` and `Io` errors are caught per entry and downgrade to
//!   "skip this template" — one broken template never aborts a scan.
//! - **Apply time**: `NotFound`, `NoParser`, `InvalidArguments`, `CreateDir`,
//!   `Collision` and render failures abort the single apply operation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::SchemaError;

/// Result type alias used throughout the core and adapter crates.
pub type TempyResult<T> = Result<T, TempyError>;

/// Root error type.
#[derive(Debug, Error)]
pub enum TempyError {
    /// Metacode failed to evaluate (bad TOML, wrong types, malformed parser
    /// declaration).
    #[error("metadata evaluation failed: {reason}")]
    Metadata { reason: String },

    /// Malformed metadata delimiter block in a file template.
    #[error("template format error: {reason}")]
    Format { reason: String },

    /// A content template or filename key failed to compile or render.
    #[error("template syntax error: {reason}")]
    TemplateSyntax { reason: String },

    /// Filesystem failure with the path that triggered it.
    #[error("{context} '{path}': {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No discovered template matches the requested name.
    #[error("template '{name}' not found")]
    NotFound { name: String },

    /// The matched template defines no argument parser and cannot be applied.
    #[error("template '{name}' has no parser")]
    NoParser { name: String },

    /// The template's argument schema rejected the supplied arguments.
    ///
    /// `usage` carries the schema's rendered help text so the frontend can
    /// print it the way the schema itself would.
    #[error("invalid arguments for '{name}': {source}")]
    InvalidArguments {
        name: String,
        #[source]
        source: SchemaError,
        usage: String,
    },

    /// The output directory could not be created.
    #[error("could not create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output path already exists; the apply operation was aborted.
    #[error("output file '{path}' already exists")]
    Collision { path: PathBuf },
}

impl TempyError {
    /// Coarse classification used by the CLI for styling and log severity.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Metadata { .. } | Self::Format { .. } | Self::TemplateSyntax { .. } => {
                ErrorCategory::Load
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::NoParser { .. } | Self::InvalidArguments { .. } => ErrorCategory::Usage,
            Self::Collision { .. } => ErrorCategory::Conflict,
            Self::Io { .. } | Self::CreateDir { .. } => ErrorCategory::Io,
        }
    }

    /// Shorthand for a [`TempyError::Io`] with context.
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A template failed to load (metadata, format, or compile problem).
    Load,
    /// Requested template does not exist.
    NotFound,
    /// The user invoked a template incorrectly.
    Usage,
    /// Output collision.
    Conflict,
    /// Filesystem failure.
    Io,
}
