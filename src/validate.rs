//! Candidate validation.
//!
//! Validation is a pure, synchronous pass over a batch: every candidate is
//! checked against the extension allow-list and the size bounds, and ends up
//! either in `accepted` or contributing one or more [`ValidationError`]s.
//! Nothing here performs I/O or fails.

use crate::candidate::UploadCandidate;
use crate::classify::{classify, is_allowed_extension, FileCategory};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Reference upload limit: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Outcome of validating one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Candidates with no errors, in input order.
    pub accepted: Vec<UploadCandidate>,
    /// Errors of every rejected candidate, in input order.
    pub errors: Vec<ValidationError>,
}

impl Validation {
    /// True when no candidate passed, whether or not any were rejected.
    pub fn nothing_accepted(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Category of the accepted part of the batch.
    pub fn category(&self) -> FileCategory {
        classify(&self.accepted)
    }

    pub fn into_parts(self) -> (Vec<UploadCandidate>, Vec<ValidationError>) {
        (self.accepted, self.errors)
    }
}

/// Size-and-extension validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_file_size: u64,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Validator {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// All errors that apply to a single candidate; empty means accepted.
    pub fn check(&self, candidate: &UploadCandidate) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let name = candidate.name();
        let extension = candidate.extension();

        if !extension.as_deref().is_some_and(is_allowed_extension) {
            errors.push(ValidationError::UnsupportedFormat {
                name: name.to_string(),
                extension,
            });
        }

        let size = candidate.size();
        if size == 0 {
            errors.push(ValidationError::EmptyFile {
                name: name.to_string(),
            });
        } else if size > self.max_file_size {
            errors.push(ValidationError::FileTooLarge {
                name: name.to_string(),
                size,
                limit: self.max_file_size,
            });
        }

        errors
    }

    /// Split a batch into accepted candidates and rejection reasons.
    pub fn validate(&self, candidates: &[UploadCandidate]) -> Validation {
        let mut out = Validation::default();
        for candidate in candidates {
            let errors = self.check(candidate);
            if errors.is_empty() {
                out.accepted.push(candidate.clone());
            } else {
                out.errors.extend(errors);
            }
        }
        out
    }
}

/// Validate a batch against the default 50 MiB limit.
pub fn validate(candidates: &[UploadCandidate]) -> Validation {
    Validator::default().validate(candidates)
}
