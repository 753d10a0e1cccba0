//! Per-file conversion results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of converting one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    /// The file was extracted and a DOCX document was produced.
    Success,
    /// Extraction or generation failed; see [`ConversionResult::error`].
    Error,
}

/// The result of converting one input file.
///
/// A batch run produces exactly one result per input file, in input
/// order, regardless of individual failures. Results are immutable once
/// appended to the batch's result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Output document name: the input name with `.pdf` swapped to
    /// `.docx`.
    pub name: String,
    /// The extracted text (empty on failure).
    pub text: String,
    /// The serialized DOCX payload; present only on success.
    pub document: Option<Vec<u8>>,
    /// Where the document was written, once persisted by the caller.
    pub output_path: Option<PathBuf>,
    /// Success or error.
    pub status: ConversionStatus,
    /// Human-readable failure reason; present only on error.
    pub error: Option<String>,
}

impl ConversionResult {
    /// Build a success entry.
    #[inline]
    #[must_use = "conversion result is created but not used"]
    pub const fn success(name: String, text: String, document: Vec<u8>) -> Self {
        Self {
            name,
            text,
            document: Some(document),
            output_path: None,
            status: ConversionStatus::Success,
            error: None,
        }
    }

    /// Build an error entry carrying the stringified failure reason.
    #[inline]
    #[must_use = "conversion result is created but not used"]
    pub const fn failure(name: String, error: String) -> Self {
        Self {
            name,
            text: String::new(),
            document: None,
            output_path: None,
            status: ConversionStatus::Error,
            error: Some(error),
        }
    }

    /// Whether this entry represents a successful conversion.
    #[inline]
    #[must_use = "success check result is returned but not used"]
    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }
}
