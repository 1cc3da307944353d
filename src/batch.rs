//! Batch outline extraction over a directory of PDFs.
//!
//! Each `*.pdf` file in the input directory gets a `<stem>.json` outline in
//! the output directory. A document that fails to parse is recorded in the
//! [`BatchReport`] and the batch moves on.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::outline::{OutlineConfig, OutlineExtractor};
use crate::parser::{PdfLayoutParser, ParseOptions};
use crate::render::{to_json, JsonFormat};

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// JSON format of the written outlines
    pub format: JsonFormat,

    /// Layout extraction options applied to every document
    pub parse: ParseOptions,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set layout extraction options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
            parse: ParseOptions::default(),
        }
    }
}

/// Outcome for one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Input PDF path
    pub input: PathBuf,

    /// Written JSON path, or the error message
    pub result: std::result::Result<PathBuf, String>,
}

impl DocumentReport {
    /// Check if the document was processed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Per-document outcomes, sorted by input file name
    pub documents: Vec<DocumentReport>,

    /// Directory entries skipped because they are not PDF files
    pub skipped: usize,
}

impl BatchReport {
    /// Number of documents that produced an outline.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.is_ok())
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// Number of PDF documents found.
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    /// Check if every document was processed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs outline extraction over every PDF in a directory.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    extractor: OutlineExtractor,
    options: BatchOptions,
}

impl BatchProcessor {
    /// Create a processor.
    pub fn new(config: OutlineConfig, options: BatchOptions) -> Self {
        Self {
            extractor: OutlineExtractor::new(config),
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// List PDF files in `input_dir` (not recursive), sorted by name.
    ///
    /// Returns the PDF paths and the number of other entries skipped.
    pub fn discover(&self, input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
        let mut pdfs = Vec::new();
        let mut skipped = 0;

        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.is_file() && is_pdf_path(&path) {
                pdfs.push(path);
            } else {
                log::debug!("Skipping {}", path.display());
                skipped += 1;
            }
        }

        pdfs.sort();
        Ok((pdfs, skipped))
    }

    /// Process every PDF in `input_dir`, writing outlines to `output_dir`.
    ///
    /// Fails only if the directories cannot be read or created.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_done` as each document finishes.
    pub fn run_with_progress<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        on_done: F,
    ) -> Result<BatchReport>
    where
        F: Fn(&DocumentReport) + Sync,
    {
        let (pdfs, skipped) = self.discover(input_dir)?;
        fs::create_dir_all(output_dir)?;
        log::info!(
            "Processing {} documents from {}",
            pdfs.len(),
            input_dir.display()
        );

        let process = |input: &PathBuf| {
            let report = DocumentReport {
                input: input.clone(),
                result: self
                    .process_document(input, output_dir)
                    .map_err(|e| e.to_string()),
            };
            match &report.result {
                Ok(output) => log::info!("{} -> {}", input.display(), output.display()),
                Err(e) => log::warn!("Failed to process {}: {}", input.display(), e),
            }
            on_done(&report);
            report
        };

        let (pdfs, duplicates) = split_output_collisions(pdfs);
        for duplicate in &duplicates {
            if let Err(e) = &duplicate.result {
                log::warn!("Skipping {}: {}", duplicate.input.display(), e);
            }
            on_done(duplicate);
        }

        let mut documents: Vec<DocumentReport> = if self.options.parallel {
            pdfs.par_iter().map(process).collect()
        } else {
            pdfs.iter().map(process).collect()
        };
        documents.extend(duplicates);
        documents.sort_by(|a, b| a.input.cmp(&b.input));

        let report = BatchReport { documents, skipped };
        log::info!(
            "Batch finished: {} succeeded, {} failed, {} skipped",
            report.succeeded(),
            report.failed(),
            report.skipped
        );
        Ok(report)
    }

    /// Extract one document's outline and write it as `<stem>.json`.
    pub fn process_document(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let layout = PdfLayoutParser::open_with_options(input, self.options.parse.clone())?
            .extract()?;
        let outline = self.extractor.extract(&layout);
        let json = to_json(&outline, self.options.format)?;

        let output = output_dir.join(output_file_name(input));
        fs::write(&output, json)?;
        Ok(output)
    }
}

/// Output file name for an input PDF: `<stem>.json`.
pub fn output_file_name(input: &Path) -> String {
    format!(
        "{}.json",
        input.file_stem().unwrap_or_default().to_string_lossy()
    )
}

/// Keep the first input for each output name; later inputs that would
/// overwrite it are returned as failed reports.
fn split_output_collisions(pdfs: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<DocumentReport>) {
    let mut owners: HashMap<String, PathBuf> = HashMap::new();
    let mut unique = Vec::with_capacity(pdfs.len());
    let mut duplicates = Vec::new();

    for input in pdfs {
        let name = output_file_name(&input);
        match owners.get(&name) {
            Some(owner) => duplicates.push(DocumentReport {
                result: Err(format!(
                    "output {} already written for {}",
                    name,
                    owner.display()
                )),
                input,
            }),
            None => {
                owners.insert(name, input.clone());
                unique.push(input);
            }
        }
    }
    (unique, duplicates)
}

/// Check for a `.pdf` extension, ignoring case.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
