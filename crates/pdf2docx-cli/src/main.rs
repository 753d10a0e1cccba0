// CLI tool has a few numeric conversions for progress display and file
// sizes; all values are well within the representable ranges.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::too_many_lines,
    clippy::fn_params_excessive_bools
)]

//! pdf2docx CLI - Convert PDF files to DOCX documents.
//!
//! Supports batch conversion with optional OCR for scanned pages, a
//! first-page PNG preview, and basic document information.

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2docx_backend::{PdfFile, PREVIEW_RENDER_SCALE};
use pdf2docx_core::{filter_pdf_files, ConversionOptions, ProgressSink, SourceFile};
use pdf2docx_pipeline::BatchConverter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name, looked up in the working directory and then
/// in the home directory.
const CONFIG_FILE_NAME: &str = ".pdf2docx.toml";

#[derive(Parser, Debug)]
#[command(
    name = "pdf2docx",
    about = "Convert PDF files to DOCX documents, with optional OCR",
    long_about = "Convert PDF files to DOCX documents.\n\
                  \n\
                  Text is read from the embedded text layer, or recognized with\n\
                  Tesseract OCR (--ocr) for scanned documents. Files are processed\n\
                  one at a time; a failing file never aborts the rest of the batch.\n\
                  \n\
                  Defaults can be set via a .pdf2docx.toml configuration file.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one or more PDFs to DOCX
    Convert {
        /// Input PDF files or glob patterns (non-PDF inputs are skipped)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<String>,

        /// Output directory (default: alongside each input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Recognize page text with OCR instead of reading the text layer
        #[arg(long)]
        ocr: bool,

        /// Split paragraphs on blank lines instead of one paragraph per line
        #[arg(long)]
        flatten: bool,

        /// Print each successful file's extracted text
        #[arg(long)]
        show_text: bool,
    },

    /// Render a page of a PDF to a PNG preview
    Preview {
        /// Input PDF file
        input: PathBuf,

        /// Output PNG path (default: input with .png extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Page to render (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show page count and basic information for a PDF
    Info {
        /// Input PDF file
        input: PathBuf,
    },
}

/// Defaults loaded from `.pdf2docx.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
struct FileConfig {
    /// Default for `--ocr`.
    ocr: Option<bool>,
    /// Default layout mode (`true` = one paragraph per line).
    preserve_layout: Option<bool>,
    /// Default output directory for `convert`.
    output_dir: Option<PathBuf>,
}

fn load_config() -> FileConfig {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(CONFIG_FILE_NAME));
    }

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(config) => {
                    log::debug!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("ignoring invalid config {}: {e}", path.display()),
            },
            Err(e) => log::warn!("could not read config {}: {e}", path.display()),
        }
    }
    FileConfig::default()
}

/// Format bytes as a human-readable size (e.g., "1.5 MB").
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Progress sink backed by an indicatif bar.
///
/// The two sink channels map directly onto the bar: messages become the
/// bar message, percentages become the bar position.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(100)
        };
        bar.set_style(
            ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}% {wide_msg}")
                .expect("valid progress template")
                .progress_chars("=>-"),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarProgress {
    fn message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn percent(&self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }
}

/// Expand literal paths and glob patterns into a flat, ordered path
/// list.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let literal = Path::new(pattern);
        if literal.exists() {
            paths.push(literal.to_path_buf());
            continue;
        }

        let mut matched = false;
        let entries =
            glob::glob(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;
        for entry in entries {
            paths.push(entry.with_context(|| format!("failed to read glob match for '{pattern}'"))?);
            matched = true;
        }
        if !matched {
            bail!("no files match '{pattern}'");
        }
    }
    Ok(paths)
}

fn cmd_convert(
    files: &[String],
    output: Option<PathBuf>,
    ocr: bool,
    flatten: bool,
    show_text: bool,
    quiet: bool,
) -> Result<()> {
    let config = load_config();

    let selected = expand_inputs(files)?;
    let selected_count = selected.len();
    let pdfs = filter_pdf_files(selected);
    if !quiet && pdfs.len() < selected_count {
        eprintln!(
            "{} non-PDF input(s) skipped",
            (selected_count - pdfs.len()).to_string().yellow()
        );
    }
    if pdfs.is_empty() {
        bail!("no PDF inputs to convert");
    }

    // CLI flags override config-file defaults.
    let use_ocr = ocr || config.ocr.unwrap_or(false);
    let preserve_layout = if flatten {
        false
    } else {
        config.preserve_layout.unwrap_or(true)
    };
    let output_dir = output.or(config.output_dir);
    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut sources = Vec::with_capacity(pdfs.len());
    for path in &pdfs {
        sources.push(
            SourceFile::from_path(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        );
    }

    let options = ConversionOptions::default()
        .with_ocr(use_ocr)
        .with_preserve_layout(preserve_layout);
    let mut converter =
        BatchConverter::new(options).context("failed to initialize the converter")?;

    let progress = BarProgress::new(quiet);
    let mut results = converter.convert_batch(&sources, &progress);
    progress.finish();

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for (result, input_path) in results.iter_mut().zip(&pdfs) {
        if result.is_success() {
            let out_path = output_dir.as_ref().map_or_else(
                || input_path.with_file_name(&result.name),
                |dir| dir.join(&result.name),
            );
            if let Some(document) = &result.document {
                fs::write(&out_path, document)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
            }
            result.output_path = Some(out_path.clone());
            succeeded += 1;

            if !quiet {
                println!(
                    "{} {} -> {}",
                    "✓".green(),
                    input_path.display(),
                    out_path.display()
                );
            }
            if show_text {
                println!("{}", result.text);
            }
        } else {
            failed += 1;
            if !quiet {
                println!(
                    "{} {}: {}",
                    "✗".red(),
                    input_path.display(),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    if !quiet {
        println!();
        println!("Converted: {}", succeeded.to_string().green());
        if failed > 0 {
            println!("Failed:    {}", failed.to_string().red());
        }
    }

    if succeeded == 0 && failed > 0 {
        bail!("all {failed} conversion(s) failed");
    }
    Ok(())
}

fn cmd_preview(input: &Path, output: Option<PathBuf>, page: usize, quiet: bool) -> Result<()> {
    ensure!(page >= 1, "page numbers are 1-based");

    let name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let bytes = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let doc = PdfFile::open(name, bytes)?;
    ensure!(
        page <= doc.page_count(),
        "page {page} out of range: {} has {} page(s)",
        input.display(),
        doc.page_count()
    );

    let raster = doc.render_page(page - 1, PREVIEW_RENDER_SCALE)?;
    let out = output.unwrap_or_else(|| input.with_extension("png"));
    raster
        .save(&out)
        .with_context(|| format!("failed to write preview {}", out.display()))?;

    if !quiet {
        println!("{} preview written to {}", "✓".green(), out.display());
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let metadata =
        fs::metadata(input).with_context(|| format!("failed to stat {}", input.display()))?;
    let name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let bytes = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let doc = PdfFile::open(name, bytes)?;

    println!("File:     {}", input.display());
    println!("Size:     {}", format_bytes(metadata.len()));
    println!("Pages:    {}", doc.page_count());
    if let Some((width, height)) = doc.page_size(0) {
        println!("Page 1:   {width:.0} x {height:.0} pt");
    }
    if let Ok(modified) = metadata.modified() {
        let modified: chrono::DateTime<chrono::Local> = modified.into();
        println!("Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Commands::Convert {
            files,
            output,
            ocr,
            flatten,
            show_text,
        } => cmd_convert(&files, output, ocr, flatten, show_text, args.quiet),
        Commands::Preview {
            input,
            output,
            page,
        } => cmd_preview(&input, output, page, args.quiet),
        Commands::Info { input } => cmd_info(&input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.0 MB");
    }

    #[test]
    fn test_config_parses_partial_tables() {
        let config: FileConfig = toml::from_str("ocr = true\n").unwrap();
        assert_eq!(config.ocr, Some(true));
        assert_eq!(config.preserve_layout, None);
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn test_expand_inputs_rejects_unmatched_pattern() {
        let result = expand_inputs(&["/nonexistent/dir/*.pdf".to_string()]);
        assert!(result.is_err());
    }
}
