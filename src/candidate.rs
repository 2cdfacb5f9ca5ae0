//! Upload candidates: the files a user picked, before validation.
//!
//! A candidate only carries what validation and classification need — the
//! name (for the extension), the byte length and the modification time.
//! File contents are never read.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A file selected for upload.
///
/// Immutable once constructed; the session and the validator only ever
/// move or clone it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    name: String,
    size: u64,
    last_modified: Option<SystemTime>,
}

impl UploadCandidate {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            last_modified: None,
        }
    }

    /// Attach a modification time (consumes and returns the candidate).
    pub fn with_last_modified(mut self, at: SystemTime) -> Self {
        self.last_modified = Some(at);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Lower-cased substring after the last `.` in the name.
    ///
    /// Returns `None` when the name has no `.` or ends with one.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }
}

/// Extract the lower-cased extension from a file name.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}
