//! Batch orchestration over an ordered file list.

use crate::extract::{extract_text, ExtractionStrategy};
use crate::generate::generate_docx;
use pdf2docx_core::{
    docx_output_name, ConversionOptions, ConversionResult, ConvertError, ProgressSink, Result,
    SourceFile,
};
use pdf2docx_ocr::OcrEngine;

/// Converts an ordered list of PDFs to DOCX, one file at a time.
///
/// Owns the OCR engine for the run when OCR is enabled: one engine, one
/// worker, reused strictly serially across files and pages. There is no
/// cancellation: once started, a batch runs to completion for all
/// files.
#[derive(Debug)]
pub struct BatchConverter {
    options: ConversionOptions,
    ocr: Option<OcrEngine>,
}

impl BatchConverter {
    /// Create a converter for one batch run.
    ///
    /// # Errors
    /// Returns an error if OCR is requested but the recognition engine
    /// cannot be initialized; this is a run-level configuration failure
    /// surfaced before any file is touched.
    pub fn new(options: ConversionOptions) -> Result<Self> {
        let ocr = if options.use_ocr {
            Some(OcrEngine::new().map_err(|e| ConvertError::OcrError(e.to_string()))?)
        } else {
            None
        };
        Ok(Self { options, ocr })
    }

    /// The options this run was configured with.
    #[inline]
    #[must_use = "returns the run configuration"]
    pub const fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert every file, in input order.
    ///
    /// Produces exactly one [`ConversionResult`] per input file, in the
    /// same order; a file's failure is captured in its entry and never
    /// aborts the batch. Overall percent is recomputed after each file
    /// as `round((i + 1) / total * 100)` and reaches exactly 100 when
    /// the last file completes.
    pub fn convert_batch(
        &mut self,
        files: &[SourceFile],
        sink: &dyn ProgressSink,
    ) -> Vec<ConversionResult> {
        sink.message("Starting conversion...");
        sink.percent(0);

        let total = files.len();
        let mut results = Vec::with_capacity(total);

        for (i, file) in files.iter().enumerate() {
            sink.message(&format!("Processing {} ({}/{total})", file.name(), i + 1));

            let output_name = docx_output_name(file.name());
            match self.convert_one(file, sink) {
                Ok((text, document)) => {
                    results.push(ConversionResult::success(output_name, text, document));
                }
                Err(e) => {
                    log::warn!("conversion of {} failed: {e}", file.name());
                    results.push(ConversionResult::failure(output_name, e.to_string()));
                }
            }

            // Truncation safe: the ratio is at most 1, so the rounded
            // percent is at most 100.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            #[allow(clippy::cast_precision_loss)]
            let percent = (((i + 1) as f64 / total as f64) * 100.0).round() as u8;
            sink.percent(percent);
        }

        sink.message("Done");
        results
    }

    fn convert_one(
        &mut self,
        file: &SourceFile,
        sink: &dyn ProgressSink,
    ) -> Result<(String, Vec<u8>)> {
        let strategy = match self.ocr.as_mut() {
            Some(engine) => ExtractionStrategy::Ocr(engine),
            None => ExtractionStrategy::TextLayer,
        };
        let text = extract_text(file, strategy, sink)?;
        let document = generate_docx(&text, self.options.preserve_layout)?;
        Ok((text, document))
    }
}

/// Convenience wrapper: build a [`BatchConverter`] and run one batch.
///
/// # Errors
/// Returns an error only if the converter itself cannot be constructed
/// (OCR requested but unavailable); per-file failures are reported in
/// the result list.
pub fn convert_batch(
    files: &[SourceFile],
    options: ConversionOptions,
    sink: &dyn ProgressSink,
) -> Result<Vec<ConversionResult>> {
    let mut converter = BatchConverter::new(options)?;
    Ok(converter.convert_batch(files, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf2docx_core::{ConversionStatus, NullProgress};
    use std::sync::Mutex;

    /// Sink that records every update for assertion.
    #[derive(Debug, Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
        percents: Mutex<Vec<u8>>,
    }

    impl ProgressSink for RecordingSink {
        fn message(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn percent(&self, percent: u8) {
            self.percents.lock().unwrap().push(percent);
        }
    }

    fn garbage_file(name: &str) -> SourceFile {
        SourceFile::new(name, b"definitely not a pdf".to_vec())
    }

    #[test]
    fn test_one_result_per_file_in_order() {
        let files = vec![garbage_file("a.pdf"), garbage_file("b.PDF"), garbage_file("c.pdf")];
        let results = convert_batch(&files, ConversionOptions::default(), &NullProgress).unwrap();

        assert_eq!(results.len(), files.len());
        assert_eq!(results[0].name, "a.docx");
        assert_eq!(results[1].name, "b.docx");
        assert_eq!(results[2].name, "c.docx");
    }

    #[test]
    fn test_failures_never_abort_the_batch() {
        let files = vec![garbage_file("x.pdf"), garbage_file("y.pdf")];
        let results = convert_batch(&files, ConversionOptions::default(), &NullProgress).unwrap();

        for result in &results {
            assert_eq!(result.status, ConversionStatus::Error);
            assert!(result.document.is_none());
            assert!(result.output_path.is_none());
            assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
        }
    }

    #[test]
    fn test_percent_progression() {
        let sink = RecordingSink::default();
        let files = vec![
            garbage_file("1.pdf"),
            garbage_file("2.pdf"),
            garbage_file("3.pdf"),
        ];
        convert_batch(&files, ConversionOptions::default(), &sink).unwrap();

        let percents = sink.percents.lock().unwrap();
        // Reset to 0, then round(k/3 * 100) after each file.
        assert_eq!(percents.as_slice(), &[0, 33, 67, 100]);
    }

    #[test]
    fn test_progress_message_sequence() {
        let sink = RecordingSink::default();
        let files = vec![garbage_file("scan.pdf"), garbage_file("notes.pdf")];
        convert_batch(&files, ConversionOptions::default(), &sink).unwrap();

        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.first().map(String::as_str), Some("Starting conversion..."));
        assert!(messages.iter().any(|m| m == "Processing scan.pdf (1/2)"));
        assert!(messages.iter().any(|m| m == "Processing notes.pdf (2/2)"));
        assert_eq!(messages.last().map(String::as_str), Some("Done"));
    }

    #[test]
    fn test_empty_batch_completes_immediately() {
        let sink = RecordingSink::default();
        let results = convert_batch(&[], ConversionOptions::default(), &sink).unwrap();

        assert!(results.is_empty());
        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.last().map(String::as_str), Some("Done"));
        assert_eq!(sink.percents.lock().unwrap().as_slice(), &[0]);
    }
}
