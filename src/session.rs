//! Intake session: the single owner of upload state.
//!
//! An [`IntakeSession`] holds the accepted files, the dismissible list of
//! rejection reasons from the latest batch, the current [`Stage`] and the
//! selected tool. Views never mutate it directly; they read a
//! [`SessionSnapshot`] and call back into the session's methods.
//!
//! ```text
//!            add_batch (≥1 accepted)        select_tool
//!   Upload ─────────────────────────▶ Preview ──────────▶ ToolSelected
//!     ▲                                 │  ▲                   │
//!     └──── remove last file / reset ───┘  └── batch changes ──┘
//!                                              category
//! ```

use crate::candidate::UploadCandidate;
use crate::catalog::{tools_for, ToolId, ToolSpec};
use crate::classify::{classify, FileCategory};
use crate::config::IntakeConfig;
use crate::error::{IntakeError, ValidationError};
use serde::Serialize;
use tracing::{debug, info};

/// Ordered set of accepted files (upload order is merge order).
///
/// Files only enter through [`IntakeSession::add_batch`], which validates
/// them first; there is no public way to append directly.
///
/// ```compile_fail
/// use pdf_intake::{AcceptedFileSet, UploadCandidate};
///
/// let mut set = AcceptedFileSet::new();
/// set.extend([UploadCandidate::new("virus.exe", 0)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AcceptedFileSet {
    files: Vec<UploadCandidate>,
}

impl AcceptedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append already-validated files, keeping their order.
    pub(crate) fn extend(&mut self, accepted: impl IntoIterator<Item = UploadCandidate>) {
        self.files.extend(accepted);
    }

    /// Remove and return the file at `index`.
    pub fn remove(&mut self, index: usize) -> Result<UploadCandidate, IntakeError> {
        if index >= self.files.len() {
            return Err(IntakeError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn as_slice(&self) -> &[UploadCandidate] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UploadCandidate> {
        self.files.iter()
    }

    /// Sum of the accepted files' sizes.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(UploadCandidate::size).sum()
    }

    pub fn category(&self) -> FileCategory {
        classify(&self.files)
    }
}

impl<'a> IntoIterator for &'a AcceptedFileSet {
    type Item = &'a UploadCandidate;
    type IntoIter = std::slice::Iter<'a, UploadCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Where the user is in the upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No accepted files.
    #[default]
    Upload,
    /// Files accepted; choosing a tool.
    Preview,
    /// A tool applicable to the current files was chosen.
    ToolSelected,
}

/// Read-only view of a session handed to views.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub files: Vec<UploadCandidate>,
    pub errors: Vec<ValidationError>,
    pub category: FileCategory,
    pub available_tools: Vec<ToolId>,
    pub selected_tool: Option<ToolId>,
}

/// Upload-flow controller.
#[derive(Debug, Default)]
pub struct IntakeSession {
    config: IntakeConfig,
    files: AcceptedFileSet,
    errors: Vec<ValidationError>,
    stage: Stage,
    selected_tool: Option<ToolId>,
}

impl IntakeSession {
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Validate a batch, append what passes and show what didn't.
    ///
    /// The visible error list is replaced with this batch's errors. Returns
    /// the number of files accepted from the batch.
    pub fn add_batch(&mut self, candidates: &[UploadCandidate]) -> usize {
        let (accepted, errors) = self.config.validator().validate(candidates).into_parts();
        let added = accepted.len();
        debug!(
            "Batch of {} candidates: {} accepted, {} errors",
            candidates.len(),
            added,
            errors.len()
        );

        self.files.extend(accepted);
        self.errors = errors;

        if self.stage == Stage::Upload && !self.files.is_empty() {
            self.stage = Stage::Preview;
        }
        self.drop_stale_tool();
        added
    }

    /// Remove the file at `index`; the state is untouched on error.
    pub fn remove(&mut self, index: usize) -> Result<UploadCandidate, IntakeError> {
        let removed = self.files.remove(index)?;
        debug!("Removed '{}' from selection", removed.name());
        if self.files.is_empty() {
            self.stage = Stage::Upload;
            self.selected_tool = None;
        } else {
            self.drop_stale_tool();
        }
        Ok(removed)
    }

    pub fn dismiss_errors(&mut self) {
        self.errors.clear();
    }

    /// Drop every file, error and selection.
    pub fn reset(&mut self) {
        info!("Resetting intake session");
        self.files.clear();
        self.errors.clear();
        self.stage = Stage::Upload;
        self.selected_tool = None;
    }

    pub fn files(&self) -> &AcceptedFileSet {
        &self.files
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selected_tool(&self) -> Option<ToolId> {
        self.selected_tool
    }

    pub fn category(&self) -> FileCategory {
        self.files.category()
    }

    pub fn available_tools(&self) -> Vec<&'static ToolSpec> {
        tools_for(self.category(), self.files.len())
    }

    /// Choose a tool for the current selection.
    pub fn select_tool(&mut self, tool: ToolId) -> Result<(), IntakeError> {
        let category = self.category();
        let count = self.files.len();
        if !tool.spec().accepts(category, count) {
            return Err(IntakeError::ToolNotApplicable {
                tool,
                category,
                count,
            });
        }
        info!("Selected tool '{}' for {} {} file(s)", tool, count, category);
        self.selected_tool = Some(tool);
        self.stage = Stage::ToolSelected;
        Ok(())
    }

    /// Go back to choosing a tool, keeping the files.
    pub fn clear_tool(&mut self) {
        self.selected_tool = None;
        if self.stage == Stage::ToolSelected {
            self.stage = Stage::Preview;
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stage,
            files: self.files.as_slice().to_vec(),
            errors: self.errors.clone(),
            category: self.category(),
            available_tools: self.available_tools().iter().map(|t| t.id).collect(),
            selected_tool: self.selected_tool,
        }
    }

    fn drop_stale_tool(&mut self) {
        if let Some(tool) = self.selected_tool {
            if !tool.spec().accepts(self.category(), self.files.len()) {
                debug!("Tool '{}' no longer applies; clearing selection", tool);
                self.clear_tool();
            }
        }
    }
}
