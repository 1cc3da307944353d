//! PDF layout parser using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{LayoutDocument, LayoutPage};

use super::layout::{BlockBuilder, PageContent, SpanExtractor};
use super::options::{ErrorMode, ParseOptions};

/// How far into the file the `%PDF-` marker may appear.
const HEADER_SEARCH_LIMIT: usize = 1024;

/// Extracts page layout (blocks, lines, spans) from a PDF document.
pub struct PdfLayoutParser {
    doc: LopdfDocument,
    options: ParseOptions,
    source: Option<String>,
}

impl PdfLayoutParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut parser = Self::from_bytes_with_options(&data, options)?;
        parser.source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(parser)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        if !has_pdf_header(data) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }

        Ok(Self {
            doc,
            options,
            source: None,
        })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Name recorded on extracted layouts, if known.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Set the name recorded on extracted layouts.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Total number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract the layout of a single page (1-indexed).
    ///
    /// Ignores the page selection and error mode.
    pub fn extract_page(&self, page_num: u32) -> Result<LayoutPage> {
        let total = self.page_count();
        if page_num == 0 || page_num > total {
            return Err(Error::PageOutOfRange(page_num, total));
        }

        let content = SpanExtractor::new(&self.doc).extract_page(page_num)?;
        Ok(BlockBuilder::default().build(page_num, content))
    }

    /// Extract the layout of every selected page, in page order.
    pub fn extract(&self) -> Result<LayoutDocument> {
        let extractor = SpanExtractor::new(&self.doc);
        let selected: Vec<u32> = self
            .doc
            .get_pages()
            .keys()
            .copied()
            .filter(|n| self.options.pages.includes(*n))
            .collect();

        // Content streams are decoded in order; grouping is pure and runs
        // in parallel when enabled.
        let contents = selected
            .into_iter()
            .map(|page_num| Ok((page_num, self.page_content(&extractor, page_num)?)))
            .collect::<Result<Vec<(u32, PageContent)>>>()?;

        let builder = BlockBuilder::default();
        let pages: Vec<LayoutPage> = if self.options.parallel {
            contents
                .into_par_iter()
                .map(|(n, content)| builder.build(n, content))
                .collect()
        } else {
            contents
                .into_iter()
                .map(|(n, content)| builder.build(n, content))
                .collect()
        };

        let mut doc = LayoutDocument::from_pages(pages);
        doc.source = self.source.clone();
        Ok(doc)
    }

    fn page_content(&self, extractor: &SpanExtractor<'_>, page_num: u32) -> Result<PageContent> {
        match extractor.extract_page(page_num) {
            Ok(content) => Ok(content),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", page_num, e);
                Ok(PageContent::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Check for the `%PDF-` marker near the start of the data.
pub fn has_pdf_header(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_LIMIT)];
    window.windows(5).any(|w| w == b"%PDF-")
}
