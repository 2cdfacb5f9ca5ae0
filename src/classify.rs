//! Extension groupings and batch classification.
//!
//! Every allow-listed extension belongs to exactly one [`FileCategory`]. A
//! batch of accepted files is summarised by a single category: the shared
//! one when all files agree, otherwise [`FileCategory::Mixed`]. The tool
//! catalog uses that category as its filter key.

use crate::candidate::UploadCandidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Every extension the intake layer accepts, lower-case.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "jpg", "jpeg", "png", "gif", "bmp",
    "webp", "tiff",
];

/// Dominant semantic type of an accepted batch.
///
/// Derived, never stored: always recompute it with [`classify`] from the
/// current accepted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Pdf,
    Image,
    Document,
    Presentation,
    Spreadsheet,
    /// No dominant type: empty batch, several categories, or an unknown extension.
    Mixed,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Pdf => "pdf",
            FileCategory::Image => "image",
            FileCategory::Document => "document",
            FileCategory::Presentation => "presentation",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::Mixed => "mixed",
        }
    }

    /// Map a lower-case extension to its category; unknown maps to `Mixed`.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "pdf" => FileCategory::Pdf,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "tiff" => FileCategory::Image,
            "doc" | "docx" => FileCategory::Document,
            "ppt" | "pptx" => FileCategory::Presentation,
            "xls" | "xlsx" => FileCategory::Spreadsheet,
            _ => FileCategory::Mixed,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `ext` (already lower-cased) is on the allow-list.
pub fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&ext)
}

/// Category of a single candidate, from its extension.
pub fn category_of(candidate: &UploadCandidate) -> FileCategory {
    candidate
        .extension()
        .map(|ext| FileCategory::from_extension(&ext))
        .unwrap_or(FileCategory::Mixed)
}

/// Summarise an accepted batch as one category.
///
/// Empty input and any batch spanning more than one category yield
/// [`FileCategory::Mixed`]. The result does not depend on input order.
pub fn classify(accepted: &[UploadCandidate]) -> FileCategory {
    let distinct: BTreeSet<FileCategory> = accepted.iter().map(category_of).collect();
    let mut iter = distinct.into_iter();
    match (iter.next(), iter.next()) {
        (Some(only), None) => only,
        _ => FileCategory::Mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<UploadCandidate> {
        names.iter().map(|n| UploadCandidate::new(*n, 10)).collect()
    }

    #[test]
    fn empty_is_mixed() {
        assert_eq!(classify(&[]), FileCategory::Mixed);
    }

    #[test]
    fn homogeneous_batches() {
        assert_eq!(classify(&files(&["a.pdf", "b.pdf"])), FileCategory::Pdf);
        assert_eq!(classify(&files(&["a.docx"])), FileCategory::Document);
        assert_eq!(
            classify(&files(&["a.PNG", "b.jpeg", "c.webp"])),
            FileCategory::Image
        );
        assert_eq!(
            classify(&files(&["deck.ppt", "deck2.pptx"])),
            FileCategory::Presentation
        );
        assert_eq!(
            classify(&files(&["q1.xls", "q2.XLSX"])),
            FileCategory::Spreadsheet
        );
    }

    #[test]
    fn heterogeneous_batch_is_mixed() {
        assert_eq!(classify(&files(&["a.pdf", "b.jpg"])), FileCategory::Mixed);
        assert_eq!(classify(&files(&["b.jpg", "a.pdf"])), FileCategory::Mixed);
    }

    #[test]
    fn unknown_extension_does_not_fail() {
        assert_eq!(classify(&files(&["tool.exe"])), FileCategory::Mixed);
        assert_eq!(classify(&files(&["README"])), FileCategory::Mixed);
    }

    #[test]
    fn every_allowed_extension_has_a_concrete_category() {
        for ext in ALLOWED_EXTENSIONS {
            assert!(is_allowed_extension(ext));
            assert_ne!(
                FileCategory::from_extension(ext),
                FileCategory::Mixed,
                "{ext} should map to a concrete category"
            );
        }
        assert!(!is_allowed_extension("exe"));
    }

    #[test]
    fn category_serialises_lowercase() {
        let json = serde_json::to_string(&FileCategory::Spreadsheet).unwrap();
        assert_eq!(json, "\"spreadsheet\"");
        assert_eq!(FileCategory::Presentation.to_string(), "presentation");
    }
}
