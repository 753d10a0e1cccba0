//! Conversion options for a batch run.

use serde::{Deserialize, Serialize};

/// Configuration for one batch conversion run.
///
/// Immutable for the duration of a run: the strategy choice and the
/// paragraph segmentation mode are fixed before the first file is
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Extract page text with OCR instead of the embedded text layer.
    pub use_ocr: bool,

    /// Preserve line breaks: one output paragraph per source line.
    ///
    /// When disabled, paragraphs are split only on blank-line runs and
    /// single newlines stay embedded inside a paragraph.
    pub preserve_layout: bool,
}

impl Default for ConversionOptions {
    #[inline]
    fn default() -> Self {
        Self {
            use_ocr: false,
            preserve_layout: true,
        }
    }
}

impl ConversionOptions {
    /// Create options with the OCR path enabled or disabled.
    #[inline]
    #[must_use = "returns options with the OCR setting configured"]
    pub const fn with_ocr(mut self, enable: bool) -> Self {
        self.use_ocr = enable;
        self
    }

    /// Create options with layout preservation enabled or disabled.
    #[inline]
    #[must_use = "returns options with the layout setting configured"]
    pub const fn with_preserve_layout(mut self, enable: bool) -> Self {
        self.preserve_layout = enable;
        self
    }
}
