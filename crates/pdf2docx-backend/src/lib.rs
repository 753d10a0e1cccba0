//! PDF loading for pdf2docx-rs.
//!
//! Wraps the `pdfium-render` bindings behind a small handle type that
//! exposes exactly what the conversion pipeline needs: page count,
//! per-page text-layer fragments, and per-page rasterization at a scale
//! factor. The PDF engine itself is an external library and is not
//! reimplemented here.
//!
//! Pdfium is bound per operation: the document handle owns the raw PDF
//! bytes and reloads them for each page access, which keeps this type
//! free of self-referential borrows at the cost of a cheap re-parse.

// Raster dimensions are page points times a small scale factor; they fit
// comfortably in i32/u32.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use image::RgbaImage;
use pdf2docx_core::{ConvertError, Result};

/// Render scale used for first-page previews.
///
/// Matches the on-screen preview resolution of the original converter;
/// preview output is for human inspection, not recognition.
pub const PREVIEW_RENDER_SCALE: f32 = 1.5;

/// Render scale used when rasterizing pages for OCR.
///
/// 2x the nominal page size. Recognition accuracy degrades noticeably at
/// 1x, so OCR rasters are upscaled relative to preview rendering. At the
/// PDF nominal 72 points per inch this yields 144 dpi rasters.
pub const OCR_RENDER_SCALE: f32 = 2.0;

/// Cached page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageMetadata {
    width: f32,
    height: f32,
}

/// An opened PDF document.
///
/// Holds the raw payload and cached page metadata; created via
/// [`PdfFile::open`], which fails with a parse error if the payload is
/// not a PDF document.
pub struct PdfFile {
    name: String,
    bytes: Vec<u8>,
    pages: Vec<PageMetadata>,
}

/// Bind the pdfium library: system install first, then a copy next to
/// the executable.
fn bind_pdfium() -> Result<pdfium_render::prelude::Pdfium> {
    use pdfium_render::prelude::*;

    let bindings = Pdfium::bind_to_system_library()
        .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./")))
        .map_err(|e| ConvertError::ParseError(format!("failed to bind pdfium library: {e}")))?;
    Ok(Pdfium::new(bindings))
}

impl PdfFile {
    /// Open a PDF from an owned byte payload.
    ///
    /// Parses the document once to validate it and cache per-page
    /// dimensions; later page accesses reload from the retained bytes.
    ///
    /// # Errors
    /// Returns [`ConvertError::ParseError`] if pdfium cannot be bound or
    /// the payload cannot be interpreted as a PDF document.
    pub fn open(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let pdfium = bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(&bytes, None)
            .map_err(|e| ConvertError::ParseError(format!("failed to parse {name}: {e}")))?;

        let pages: Vec<PageMetadata> = document
            .pages()
            .iter()
            .map(|page| PageMetadata {
                width: page.width().value,
                height: page.height().value,
            })
            .collect();
        drop(document);

        log::debug!("opened {name}: {} pages", pages.len());
        Ok(Self { name, bytes, pages })
    }

    /// The document's display name.
    #[inline]
    #[must_use = "returns the document name"]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of pages in the document. Zero-page documents are valid.
    #[inline]
    #[must_use = "returns the page count"]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page dimensions in PDF points, if the page exists.
    #[inline]
    #[must_use = "returns the page dimensions in points"]
    pub fn page_size(&self, index: usize) -> Option<(f32, f32)> {
        self.pages.get(index).map(|m| (m.width, m.height))
    }

    /// The ordered text fragments of a page's text layer.
    ///
    /// Fragments are returned verbatim in the order pdfium yields them;
    /// no reading-order reconstruction from positions is attempted.
    ///
    /// # Errors
    /// Returns an error if the page index is out of range or the page's
    /// text cannot be read.
    pub fn page_text_fragments(&self, index: usize) -> Result<Vec<String>> {
        let pdfium = bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| ConvertError::ParseError(format!("failed to parse {}: {e}", self.name)))?;
        let page = document.pages().get(index as u16).map_err(|e| {
            ConvertError::ParseError(format!("page {index} of {} not found: {e}", self.name))
        })?;

        let text = page.text().map_err(|e| {
            ConvertError::ParseError(format!(
                "failed to read text layer of page {index} of {}: {e}",
                self.name
            ))
        })?;

        let segments = text.segments();
        let fragments: Vec<String> = segments.iter().map(|segment| segment.text()).collect();
        log::debug!(
            "page {index} of {}: {} text fragments",
            self.name,
            fragments.len()
        );
        Ok(fragments)
    }

    /// Render a page to an RGBA raster at `scale` times its nominal
    /// size.
    ///
    /// The shared rendering surface is used serially: each call fully
    /// finishes its render before returning, so callers can reuse the
    /// result without coordinating with other renders.
    ///
    /// # Errors
    /// Returns an error if the page index is out of range or rendering
    /// fails.
    pub fn render_page(&self, index: usize, scale: f32) -> Result<RgbaImage> {
        use pdfium_render::prelude::*;

        let pdfium = bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| ConvertError::ParseError(format!("failed to parse {}: {e}", self.name)))?;
        let page = document.pages().get(index as u16).map_err(|e| {
            ConvertError::RenderError(format!("page {index} of {} not found: {e}", self.name))
        })?;

        let width = (page.width().value * scale).floor() as i32;
        let height = (page.height().value * scale).floor() as i32;
        if width <= 0 || height <= 0 {
            return Err(ConvertError::RenderError(format!(
                "page {index} of {} has degenerate raster size {width}x{height}",
                self.name
            )));
        }

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| {
                ConvertError::RenderError(format!(
                    "failed to render page {index} of {}: {e}",
                    self.name
                ))
            })?;

        let rgba = bitmap.as_rgba_bytes();
        RgbaImage::from_raw(width as u32, height as u32, rgba).ok_or_else(|| {
            ConvertError::RenderError(format!(
                "raster buffer size mismatch for page {index} of {}",
                self.name
            ))
        })
    }
}

impl std::fmt::Debug for PdfFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfFile")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .field("pages", &self.pages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal one-page PDF with a "Hello World" text object.
    fn minimal_pdf() -> Vec<u8> {
        let content = "BT /F1 24 Tf 72 720 Td (Hello World) Tj ET";
        let objects = [
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
            "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n"
                .to_string(),
            format!(
                "4 0 obj\n<< /Length {} >>\nstream\n{content}\nendstream\nendobj\n",
                content.len()
            ),
            "5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n"
                .to_string(),
        ];

        let mut buf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for obj in &objects {
            offsets.push(buf.len());
            buf.extend_from_slice(obj.as_bytes());
        }
        let xref_offset = buf.len();
        buf.extend_from_slice(b"xref\n0 6\n0000000000 65535 f \n");
        for offset in offsets {
            buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        buf.extend_from_slice(
            format!("trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n")
                .as_bytes(),
        );
        buf
    }

    #[test]
    fn test_open_rejects_garbage() {
        let result = PdfFile::open("garbage.pdf", vec![0u8; 64]);
        assert!(matches!(result, Err(ConvertError::ParseError(_))));
    }

    #[test]
    fn test_open_rejects_empty_payload() {
        assert!(PdfFile::open("empty.pdf", Vec::new()).is_err());
    }

    #[test]
    #[ignore = "requires a pdfium system library"]
    fn test_open_minimal_pdf() {
        let file = PdfFile::open("hello.pdf", minimal_pdf()).unwrap();
        assert_eq!(file.page_count(), 1);
        let (width, height) = file.page_size(0).unwrap();
        assert!((width - 612.0).abs() < 0.5);
        assert!((height - 792.0).abs() < 0.5);
        assert!(file.page_size(1).is_none());
    }

    #[test]
    #[ignore = "requires a pdfium system library"]
    fn test_text_fragments_contain_text() {
        let file = PdfFile::open("hello.pdf", minimal_pdf()).unwrap();
        let fragments = file.page_text_fragments(0).unwrap();
        let joined = fragments.join(" ");
        assert!(joined.contains("Hello World"), "got: {joined:?}");
    }

    #[test]
    #[ignore = "requires a pdfium system library"]
    fn test_render_page_dimensions_follow_scale() {
        let file = PdfFile::open("hello.pdf", minimal_pdf()).unwrap();
        let raster = file.render_page(0, OCR_RENDER_SCALE).unwrap();
        assert_eq!(raster.width(), 1224);
        assert_eq!(raster.height(), 1584);
    }

    #[test]
    #[ignore = "requires a pdfium system library"]
    fn test_render_out_of_range_page_fails() {
        let file = PdfFile::open("hello.pdf", minimal_pdf()).unwrap();
        assert!(file.render_page(7, PREVIEW_RENDER_SCALE).is_err());
    }
}
