//! Error types for the pdf-intake library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`IntakeError`] — **Fatal**: the requested operation cannot proceed at
//!   all (a path does not exist, a session index is out of range, the
//!   configuration is invalid). Returned as `Err(IntakeError)`.
//!
//! * [`ValidationError`] — **Non-fatal**: a single candidate was rejected
//!   (wrong extension, too large, empty) but every other candidate in the
//!   batch is still evaluated. Collected into the `errors` list of a
//!   [`crate::validate::Validation`] so callers can show the user every
//!   reason at once.

use crate::catalog::ToolId;
use crate::classify::FileCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf-intake library.
///
/// Per-candidate rejections use [`ValidationError`] and are reported
/// alongside the accepted files rather than propagated here.
#[derive(Debug, Error)]
pub enum IntakeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input path was not found.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have permission to stat the path.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The path exists but is a directory or other non-regular file.
    #[error("'{path}' is not a regular file")]
    NotAFile { path: PathBuf },

    /// The request itself is unusable (e.g. no paths given).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Session errors ────────────────────────────────────────────────────
    /// `remove` was called with an index past the end of the accepted set.
    #[error("File index {index} is out of range ({len} files selected)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The chosen tool does not accept the current file selection.
    #[error("Tool '{tool}' cannot be used with {count} {category} file(s)")]
    ToolNotApplicable {
        tool: ToolId,
        category: FileCategory,
        count: usize,
    },

    /// A tool identifier did not match any catalog entry.
    #[error("Unknown tool '{0}'\nRun with --list-tools to see the catalog.")]
    UnknownTool(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Stat failed for a reason other than a missing path or permissions.
    #[error("Failed to read metadata for '{path}': {source}")]
    MetadataFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the JSON report file.
    #[error("Failed to write report file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The reason a candidate was rejected, without the candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    UnsupportedFormat,
    FileTooLarge,
    EmptyFile,
}

impl ValidationErrorKind {
    /// Human-readable reason shown next to the file name.
    pub fn reason(self) -> &'static str {
        match self {
            ValidationErrorKind::UnsupportedFormat => "unsupported format",
            ValidationErrorKind::FileTooLarge => "file too large",
            ValidationErrorKind::EmptyFile => "file is empty",
        }
    }
}

/// A non-fatal rejection of a single candidate.
///
/// A candidate may produce more than one of these (an empty `.exe` is both
/// unsupported and empty); all of them are reported.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Extension missing or not on the allow-list.
    #[error("{name}: unsupported format")]
    UnsupportedFormat {
        name: String,
        extension: Option<String>,
    },

    /// Candidate exceeds the configured size limit.
    #[error("{name}: file too large ({size} bytes, limit {limit})")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    /// Candidate has zero bytes.
    #[error("{name}: file is empty")]
    EmptyFile { name: String },
}

impl ValidationError {
    /// Name of the rejected candidate.
    pub fn name(&self) -> &str {
        match self {
            ValidationError::UnsupportedFormat { name, .. }
            | ValidationError::FileTooLarge { name, .. }
            | ValidationError::EmptyFile { name } => name,
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::UnsupportedFormat { .. } => ValidationErrorKind::UnsupportedFormat,
            ValidationError::FileTooLarge { .. } => ValidationErrorKind::FileTooLarge,
            ValidationError::EmptyFile { .. } => ValidationErrorKind::EmptyFile,
        }
    }

    /// The short reason string, e.g. `"file too large"`.
    pub fn reason(&self) -> &'static str {
        self.kind().reason()
    }
}
