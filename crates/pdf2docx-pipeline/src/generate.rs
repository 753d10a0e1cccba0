//! Paragraph segmentation and DOCX serialization.

use docx_rs::{Docx, Paragraph, Run};
use once_cell::sync::Lazy;
use pdf2docx_core::{ConvertError, Result};
use regex::Regex;

/// A run of two or more newlines: the paragraph boundary when layout is
/// not preserved.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("valid paragraph break pattern"));

/// Split extracted text into ordered paragraph segments.
///
/// - `preserve_layout = true`: one segment per line; blank lines become
///   empty segments.
/// - `preserve_layout = false`: segments are separated by blank-line
///   runs only; single newlines stay embedded in the segment text.
#[must_use = "returns the paragraph segments"]
pub fn split_segments(text: &str, preserve_layout: bool) -> Vec<&str> {
    if preserve_layout {
        text.split('\n').collect()
    } else {
        PARAGRAPH_BREAK.split(text).collect()
    }
}

/// Serialize extracted text into a DOCX document.
///
/// Each segment becomes one paragraph, in order. An empty segment
/// becomes a paragraph containing a single space; the output format
/// collapses zero-length paragraphs, so none are ever emitted. The
/// empty string is valid input and yields a single single-space
/// paragraph.
///
/// # Errors
/// Fails only if the DOCX container cannot be serialized.
pub fn generate_docx(text: &str, preserve_layout: bool) -> Result<Vec<u8>> {
    let mut docx = Docx::new();
    for segment in split_segments(text, preserve_layout) {
        let content = if segment.is_empty() { " " } else { segment };
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(content)));
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ConvertError::GenerateError(e.to_string()))?;
    Ok(cursor.into_inner())
}
