//! # pdf2docx-core - Conversion Data Model
//!
//! Core types shared by every crate in the pdf2docx-rs workspace:
//!
//! - [`SourceFile`] - an input PDF payload with its display name
//! - [`ConversionOptions`] - per-run configuration (OCR, layout)
//! - [`ConversionResult`] - the per-file outcome of a batch run
//! - [`ProgressSink`] - injected progress reporting interface
//! - [`ConvertError`] - error taxonomy for the whole pipeline
//!
//! The conversion pipeline itself lives in `pdf2docx-pipeline`; PDF
//! loading in `pdf2docx-backend`; OCR in `pdf2docx-ocr`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: BatchConverter is in the pdf2docx-pipeline crate
//! use pdf2docx_core::{ConversionOptions, NullProgress, SourceFile};
//! use pdf2docx_pipeline::BatchConverter;
//!
//! let files = vec![SourceFile::from_path("report.pdf".as_ref())?];
//! let mut converter = BatchConverter::new(ConversionOptions::default())?;
//! let results = converter.convert_batch(&files, &NullProgress);
//! # Ok::<(), pdf2docx_core::ConvertError>(())
//! ```

pub mod error;
pub mod options;
pub mod progress;
pub mod result;
pub mod source;

pub use error::{ConvertError, Result};
pub use options::ConversionOptions;
pub use progress::{NullProgress, ProgressSink, ProgressState};
pub use result::{ConversionResult, ConversionStatus};
pub use source::{docx_output_name, filter_pdf_files, is_pdf_path, SourceFile};
