//! Result types returned by [`crate::intake::intake`].

use crate::candidate::UploadCandidate;
use crate::catalog::ToolId;
use crate::classify::FileCategory;
use crate::error::ValidationError;
use serde::Serialize;

/// Everything the presentation layer needs after an intake run.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReport {
    /// Accepted candidates in input order.
    pub accepted: Vec<UploadCandidate>,
    /// Rejection reasons in input order.
    pub errors: Vec<ValidationError>,
    /// Dominant category of `accepted`.
    pub category: FileCategory,
    /// Catalog tools applicable to `accepted`.
    pub tools: Vec<ToolId>,
    pub stats: IntakeStats,
}

impl IntakeReport {
    /// True when at least one file was accepted.
    pub fn has_accepted(&self) -> bool {
        !self.accepted.is_empty()
    }
}

/// Counters for one intake run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeStats {
    pub total_candidates: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Sum of accepted file sizes.
    pub accepted_bytes: u64,
    pub duration_ms: u64,
}

