//! Static tool catalog.
//!
//! Each tool declares which file categories it accepts and how many files
//! it needs. The presentation layer filters the catalog with
//! [`tools_for`] using the category of the current accepted set.

use crate::classify::FileCategory;
use crate::error::IntakeError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    Merge,
    Split,
    Compress,
    Rotate,
    Protect,
    Unlock,
    Watermark,
    PageNumbers,
    PdfToWord,
    PdfToPowerpoint,
    PdfToExcel,
    PdfToImage,
    WordToPdf,
    PowerpointToPdf,
    ExcelToPdf,
    ImageToPdf,
}

impl ToolId {
    /// Kebab-case identifier used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::Merge => "merge",
            ToolId::Split => "split",
            ToolId::Compress => "compress",
            ToolId::Rotate => "rotate",
            ToolId::Protect => "protect",
            ToolId::Unlock => "unlock",
            ToolId::Watermark => "watermark",
            ToolId::PageNumbers => "page-numbers",
            ToolId::PdfToWord => "pdf-to-word",
            ToolId::PdfToPowerpoint => "pdf-to-powerpoint",
            ToolId::PdfToExcel => "pdf-to-excel",
            ToolId::PdfToImage => "pdf-to-image",
            ToolId::WordToPdf => "word-to-pdf",
            ToolId::PowerpointToPdf => "powerpoint-to-pdf",
            ToolId::ExcelToPdf => "excel-to-pdf",
            ToolId::ImageToPdf => "image-to-pdf",
        }
    }

    /// Catalog entry for this id.
    pub fn spec(self) -> &'static ToolSpec {
        // CATALOG rows are in ToolId declaration order.
        &CATALOG[self as usize]
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CATALOG
            .iter()
            .map(|t| t.id)
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| IntakeError::UnknownTool(s.to_string()))
    }
}

impl Serialize for ToolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One catalog row.
#[derive(Debug, Serialize)]
pub struct ToolSpec {
    pub id: ToolId,
    pub name: &'static str,
    pub description: &'static str,
    /// Categories the tool accepts as input.
    pub categories: &'static [FileCategory],
    /// Minimum number of files.
    pub min_files: usize,
    /// Maximum number of files; `None` means unbounded.
    pub max_files: Option<usize>,
}

impl ToolSpec {
    /// True when a selection of `count` files of `category` fits this tool.
    pub fn accepts(&self, category: FileCategory, count: usize) -> bool {
        count >= self.min_files
            && self.max_files.map_or(true, |max| count <= max)
            && self.categories.contains(&category)
    }
}

const PDF: &[FileCategory] = &[FileCategory::Pdf];

static CATALOG: &[ToolSpec] = &[
    ToolSpec {
        id: ToolId::Merge,
        name: "Merge PDF",
        description: "Combine several PDFs into one, in upload order",
        categories: PDF,
        min_files: 2,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::Split,
        name: "Split PDF",
        description: "Extract pages or ranges into separate files",
        categories: PDF,
        min_files: 1,
        max_files: Some(1),
    },
    ToolSpec {
        id: ToolId::Compress,
        name: "Compress PDF",
        description: "Reduce file size",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::Rotate,
        name: "Rotate PDF",
        description: "Rotate pages",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::Protect,
        name: "Protect PDF",
        description: "Add a password",
        categories: PDF,
        min_files: 1,
        max_files: Some(1),
    },
    ToolSpec {
        id: ToolId::Unlock,
        name: "Unlock PDF",
        description: "Remove a known password",
        categories: PDF,
        min_files: 1,
        max_files: Some(1),
    },
    ToolSpec {
        id: ToolId::Watermark,
        name: "Add watermark",
        description: "Stamp text or an image over every page",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::PageNumbers,
        name: "Add page numbers",
        description: "Number pages in the header or footer",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::PdfToWord,
        name: "PDF to Word",
        description: "Convert to an editable DOCX",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::PdfToPowerpoint,
        name: "PDF to PowerPoint",
        description: "Convert pages to slides",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::PdfToExcel,
        name: "PDF to Excel",
        description: "Pull tables into a spreadsheet",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::PdfToImage,
        name: "PDF to image",
        description: "Render each page as an image",
        categories: PDF,
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::WordToPdf,
        name: "Word to PDF",
        description: "Convert DOC/DOCX documents",
        categories: &[FileCategory::Document],
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::PowerpointToPdf,
        name: "PowerPoint to PDF",
        description: "Convert PPT/PPTX presentations",
        categories: &[FileCategory::Presentation],
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::ExcelToPdf,
        name: "Excel to PDF",
        description: "Convert XLS/XLSX spreadsheets",
        categories: &[FileCategory::Spreadsheet],
        min_files: 1,
        max_files: None,
    },
    ToolSpec {
        id: ToolId::ImageToPdf,
        name: "Image to PDF",
        description: "Combine images into a PDF, one per page",
        categories: &[FileCategory::Image],
        min_files: 1,
        max_files: None,
    },
];

/// The whole catalog, in display order.
pub fn catalog() -> &'static [ToolSpec] {
    CATALOG
}

/// Tools applicable to `count` files of `category`, in catalog order.
pub fn tools_for(category: FileCategory, count: usize) -> Vec<&'static ToolSpec> {
    CATALOG
        .iter()
        .filter(|t| t.accepts(category, count))
        .collect()
}
