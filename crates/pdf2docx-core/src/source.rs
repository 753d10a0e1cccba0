//! Input files and the PDF selection boundary.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// An input PDF: an immutable binary payload plus a display name.
///
/// Consumed once per conversion run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    data: Vec<u8>,
}

impl SourceFile {
    /// Create a source file from an in-memory payload.
    #[inline]
    #[must_use = "source file is created but not used"]
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Read a source file from disk. The display name is the file name
    /// component of the path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let data = std::fs::read(path)?;
        Ok(Self { name, data })
    }

    /// The display name (typically `something.pdf`).
    #[inline]
    #[must_use = "returns the display name"]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw PDF bytes.
    #[inline]
    #[must_use = "returns the raw payload"]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Whether a path looks like a PDF file (`.pdf` extension,
/// case-insensitive).
#[inline]
#[must_use = "returns whether the path is a PDF"]
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Filter a selection down to PDF files, preserving order.
///
/// Non-PDF entries are silently excluded before they ever reach the
/// pipeline; exclusion is not an error and is not reported per-file.
#[must_use = "returns the filtered file list"]
pub fn filter_pdf_files<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter(|p| {
            let keep = is_pdf_path(p);
            if !keep {
                log::debug!("skipping non-PDF input: {}", p.display());
            }
            keep
        })
        .collect()
}

/// Swap a `.pdf` file name (case-insensitive) to `.docx`.
///
/// Names without a `.pdf` suffix are returned unchanged; the selection
/// boundary guarantees that case does not occur in a normal run.
#[must_use = "returns the output document name"]
pub fn docx_output_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    lower.strip_suffix(".pdf").map_or_else(
        || name.to_string(),
        |_| format!("{}.docx", &name[..name.len() - 4]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_accessors() {
        let file = SourceFile::new("a.pdf", vec![0x25, 0x50, 0x44, 0x46]);
        assert_eq!(file.name(), "a.pdf");
        assert_eq!(file.data(), b"%PDF");
    }

    #[test]
    fn test_is_pdf_path_case_insensitive() {
        assert!(is_pdf_path(Path::new("report.pdf")));
        assert!(is_pdf_path(Path::new("REPORT.PDF")));
        assert!(is_pdf_path(Path::new("dir.pdf/scan.Pdf")));
        assert!(!is_pdf_path(Path::new("report.docx")));
        assert!(!is_pdf_path(Path::new("pdf")));
        assert!(!is_pdf_path(Path::new("archive.pdf.zip")));
    }

    #[test]
    fn test_filter_preserves_order() {
        let input = vec![
            PathBuf::from("b.pdf"),
            PathBuf::from("notes.txt"),
            PathBuf::from("a.PDF"),
        ];
        let filtered = filter_pdf_files(input);
        assert_eq!(filtered, vec![PathBuf::from("b.pdf"), PathBuf::from("a.PDF")]);
    }

    #[test]
    fn test_docx_output_name() {
        assert_eq!(docx_output_name("report.pdf"), "report.docx");
        assert_eq!(docx_output_name("SCAN.PDF"), "SCAN.docx");
        assert_eq!(docx_output_name("a.b.pdf"), "a.b.docx");
        // No .pdf suffix: unchanged, mirroring the anchored replace.
        assert_eq!(docx_output_name("readme"), "readme");
        assert_eq!(docx_output_name("pdf.txt"), "pdf.txt");
    }
}
