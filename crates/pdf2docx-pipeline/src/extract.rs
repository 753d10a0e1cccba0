//! Per-file text extraction.

use pdf2docx_backend::{PdfFile, OCR_RENDER_SCALE};
use pdf2docx_core::{ConvertError, ProgressSink, Result, SourceFile};
use pdf2docx_ocr::OcrEngine;

/// How page text is obtained, chosen once per pipeline invocation.
///
/// The OCR variant borrows the engine mutably for the whole extraction,
/// which makes concurrent page recognition unrepresentable.
pub enum ExtractionStrategy<'a> {
    /// Read the embedded text layer of each page.
    TextLayer,
    /// Rasterize each page and recognize it with the given engine.
    Ocr(&'a mut OcrEngine),
}

impl std::fmt::Debug for ExtractionStrategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextLayer => write!(f, "TextLayer"),
            Self::Ocr(_) => write!(f, "Ocr"),
        }
    }
}

/// Extract the full text of one PDF.
///
/// Pages are processed strictly in ascending order. Page texts are
/// joined with a blank-line separator and the result is trimmed;
/// zero-page documents yield an empty string.
///
/// Progress messages name the current page (`Reading page p/N of
/// <file>`); the OCR path additionally emits fractional recognition
/// progress scaled to percent (`OCR k% on page p`).
///
/// # Errors
/// Fails if the payload cannot be parsed as a PDF, or if reading,
/// rendering or recognizing any page fails. Callers running a batch
/// catch the error at the per-file boundary.
pub fn extract_text(
    file: &SourceFile,
    mut strategy: ExtractionStrategy<'_>,
    sink: &dyn ProgressSink,
) -> Result<String> {
    let doc = PdfFile::open(file.name(), file.data().to_vec())?;
    let total = doc.page_count();
    let mut full_text = String::new();

    for index in 0..total {
        let page_no = index + 1;
        sink.message(&format!(
            "Reading page {page_no}/{total} of {}",
            file.name()
        ));

        let page_text = match &mut strategy {
            ExtractionStrategy::TextLayer => doc.page_text_fragments(index)?.join(" "),
            ExtractionStrategy::Ocr(engine) => {
                // 2x upscale versus preview rendering: recognition
                // accuracy drops at 1x.
                let raster = doc.render_page(index, OCR_RENDER_SCALE)?;
                engine
                    .recognize(&raster, |fraction| {
                        // Truncation safe: fraction is clamped to 0..=1.
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
                        sink.message(&format!("OCR {percent}% on page {page_no}"));
                    })
                    .map_err(|e| ConvertError::OcrError(e.to_string()))?
            }
        };

        full_text.push_str(&page_text);
        full_text.push_str("\n\n");
    }

    Ok(full_text.trim().to_string())
}
