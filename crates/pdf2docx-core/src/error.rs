//! Error types for PDF to DOCX conversion operations.

use thiserror::Error;

/// Error types that can occur during PDF to DOCX conversion.
///
/// Every stage of the pipeline maps its failures into one of these
/// variants. Within a batch run they are caught at the per-file boundary
/// and turned into [`crate::ConversionResult`] error entries; a single
/// file's failure never aborts the batch.
///
/// # Examples
///
/// ```rust
/// use pdf2docx_core::ConvertError;
///
/// let err = ConvertError::ParseError("not a PDF header".to_string());
/// assert_eq!(err.to_string(), "Parse error: not a PDF header");
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The payload could not be interpreted as a PDF document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A page could not be rasterized for OCR or preview.
    #[error("Render error: {0}")]
    RenderError(String),

    /// The OCR engine failed to initialize or to recognize a raster.
    #[error("OCR error: {0}")]
    OcrError(String),

    /// The DOCX document could not be serialized.
    #[error("Document generation error: {0}")]
    GenerateError(String),

    /// File I/O failed (reading inputs, writing outputs).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for [`Result<T, ConvertError>`].
pub type Result<T> = std::result::Result<T, ConvertError>;
