//! # pdf2docx-pipeline - Conversion Pipeline
//!
//! The conversion core of pdf2docx-rs:
//!
//! - [`extract_text`] - per-file text extraction (text layer or OCR)
//! - [`generate_docx`] - paragraph segmentation and DOCX serialization
//! - [`BatchConverter`] - in-order batch orchestration with per-file
//!   error capture
//!
//! ```text
//! SourceFile ──► extract_text ──► generate_docx ──► ConversionResult
//!                    │ ▲
//!          PdfFile ──┘ └── OcrEngine (optional, single shared worker)
//! ```
//!
//! Everything runs strictly sequentially: one file at a time, one page
//! at a time. The PDF and OCR engines are external, stateful
//! collaborators that are not assumed safe for concurrent use.

pub mod batch;
pub mod extract;
pub mod generate;

pub use batch::{convert_batch, BatchConverter};
pub use extract::{extract_text, ExtractionStrategy};
pub use generate::{generate_docx, split_segments};
