//! Optical Character Recognition (OCR) support for pdf2docx-rs.
//!
//! Wraps Tesseract via `leptess`. One [`OcrEngine`] owns one Tesseract
//! handle; recognition goes through `&mut self`, so the engine can never
//! be driven by two pages at once. Pipelines that OCR multiple pages
//! reuse a single engine strictly sequentially.
//!
//! # Progress
//!
//! Recognition reports fractional progress in `0.0..=1.0` through a
//! caller-supplied callback. Tesseract's recognition monitor is not
//! exposed by `leptess`, so the signal is emitted per assembled output
//! line: `0.0` when recognition starts, then `lines emitted / total
//! lines`, ending at `1.0`.

use image::RgbaImage;
use thiserror::Error;

/// The fixed recognition language model.
pub const OCR_LANGUAGE: &str = "eng";

/// Source resolution reported to Tesseract for rasters rendered at the
/// OCR upscale factor (2x of the PDF nominal 72 points per inch).
const OCR_SOURCE_DPI: i32 = 144;

/// OCR-specific errors.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Tesseract could not be initialized (missing language data,
    /// missing shared library).
    #[error("Failed to initialize OCR engine: {0}")]
    EngineInit(String),

    /// The raster could not be handed to the engine.
    #[error("Image preprocessing failed: {0}")]
    Preprocessing(String),

    /// Recognition itself failed.
    #[error("Failed to recognize text: {0}")]
    Recognition(String),

    /// The raster has a zero dimension.
    #[error("Invalid image dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// A Tesseract recognition engine bound to the fixed English model.
///
/// The handle is a single shared worker: it is not `Sync`, and
/// [`recognize`](Self::recognize) takes `&mut self`, so concurrent
/// recognition across pages is unrepresentable.
pub struct OcrEngine {
    engine: leptess::LepTess,
}

impl std::fmt::Debug for OcrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrEngine")
            .field("language", &OCR_LANGUAGE)
            .finish()
    }
}

impl OcrEngine {
    /// Create an engine using the default Tesseract data path and the
    /// fixed English language model.
    ///
    /// # Errors
    /// Returns [`OcrError::EngineInit`] if the Tesseract library or the
    /// `eng` traineddata cannot be loaded.
    pub fn new() -> Result<Self, OcrError> {
        let engine = leptess::LepTess::new(None, OCR_LANGUAGE)
            .map_err(|e| OcrError::EngineInit(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Recognize text from an RGBA raster.
    ///
    /// Emits fractional progress in `0.0..=1.0` through `on_progress`;
    /// the final invocation is always `1.0`.
    ///
    /// # Errors
    /// Returns an error if the raster is degenerate, cannot be encoded
    /// for the engine, or recognition fails.
    pub fn recognize<F>(&mut self, image: &RgbaImage, mut on_progress: F) -> Result<String, OcrError>
    where
        F: FnMut(f32),
    {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidDimensions(width, height));
        }

        // Leptonica ingests encoded buffers, so round-trip the raster
        // through an in-memory PNG.
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| OcrError::Preprocessing(format!("PNG encoding failed: {e}")))?;

        self.engine
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::Preprocessing(e.to_string()))?;
        self.engine.set_source_resolution(OCR_SOURCE_DPI);

        on_progress(0.0);
        let raw = self
            .engine
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        let total = raw.lines().count();
        if total == 0 {
            on_progress(1.0);
            log::debug!("OCR produced no text for {width}x{height} raster");
            return Ok(raw);
        }

        let mut text = String::with_capacity(raw.len());
        for (i, line) in raw.lines().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line);
            on_progress((i + 1) as f32 / total as f32);
        }
        if raw.ends_with('\n') {
            text.push('\n');
        }

        log::debug!("OCR recognized {total} lines from {width}x{height} raster");
        Ok(text)
    }
}

// No Default implementation: engine creation loads language data.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OcrError::InvalidDimensions(0, 600);
        assert_eq!(err.to_string(), "Invalid image dimensions: 0x600");

        let err = OcrError::EngineInit("eng.traineddata not found".to_string());
        assert!(err.to_string().contains("initialize"));
    }

    #[test]
    fn test_engine_requires_language_data() {
        // Engine creation needs the tesseract library and eng model.
        if let Err(e) = OcrEngine::new() {
            assert!(matches!(e, OcrError::EngineInit(_)), "unexpected error: {e}");
        }
    }

    #[test]
    fn test_recognize_rejects_degenerate_raster() {
        let mut engine = match OcrEngine::new() {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Skipping test: {e}");
                return;
            }
        };

        let empty = RgbaImage::new(0, 0);
        let result = engine.recognize(&empty, |_| {});
        assert!(matches!(result, Err(OcrError::InvalidDimensions(0, 0))));
    }

    #[test]
    fn test_recognize_blank_image_reports_completion() {
        let mut engine = match OcrEngine::new() {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Skipping test: {e}");
                return;
            }
        };

        // White 200x80 raster: recognition succeeds with little or no
        // text, and the progress signal must still close at 1.0.
        let blank = RgbaImage::from_pixel(200, 80, image::Rgba([255, 255, 255, 255]));
        let mut updates = Vec::new();
        let _text = engine
            .recognize(&blank, |p| updates.push(p))
            .expect("recognition of a blank raster should not fail");

        assert_eq!(updates.first().copied(), Some(0.0));
        assert_eq!(updates.last().copied(), Some(1.0));
        assert!(updates.windows(2).all(|w| w[0] <= w[1]));
    }
}
