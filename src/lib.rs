//! # pdf-intake
//!
//! Upload intake for a PDF-tools application: validate candidate files,
//! classify the accepted batch, and look up which tools apply.
//!
//! ## Pipeline Overview
//!
//! ```text
//! paths / picked files
//!  │
//!  ├─ 1. Resolve   stat each path → UploadCandidate (name, size, mtime)
//!  ├─ 2. Validate  extension allow-list, empty check, size limit
//!  ├─ 3. Classify  pdf | image | document | presentation | spreadsheet | mixed
//!  └─ 4. Catalog   tools applicable to that category and file count
//! ```
//!
//! Validation and classification are pure and synchronous. Only path
//! resolution touches the file system, and it reads metadata, never bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use pdf_intake::{classify, validate, FileCategory, UploadCandidate};
//!
//! let batch = vec![
//!     UploadCandidate::new("contract.pdf", 120_000),
//!     UploadCandidate::new("annex.PDF", 80_000),
//!     UploadCandidate::new("setup.exe", 4_096),
//! ];
//! let result = validate(&batch);
//! assert_eq!(result.accepted.len(), 2);
//! assert_eq!(result.errors[0].reason(), "unsupported format");
//! assert_eq!(classify(&result.accepted), FileCategory::Pdf);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-intake` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod candidate;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod intake;
pub mod output;
pub mod progress;
pub mod session;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use candidate::UploadCandidate;
pub use catalog::{catalog, tools_for, ToolId, ToolSpec};
pub use classify::{classify, FileCategory, ALLOWED_EXTENSIONS};
pub use config::{IntakeConfig, IntakeConfigBuilder};
pub use error::{IntakeError, ValidationError, ValidationErrorKind};
pub use intake::{candidate_from_path, intake, intake_candidates, intake_sync, intake_to_file};
pub use output::{IntakeReport, IntakeStats};
pub use progress::{IntakeProgressCallback, NoopProgressCallback, ProgressCallback};
pub use session::{AcceptedFileSet, IntakeSession, SessionSnapshot, Stage};
pub use validate::{validate, Validation, Validator, DEFAULT_MAX_FILE_SIZE};
