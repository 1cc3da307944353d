//! # pdfoutline
//!
//! Title and heading outline extraction from PDF documents.
//!
//! A PDF is read into a page layout (blocks of lines of sized text spans),
//! and a font-size heuristic turns that layout into a document title plus a
//! flat list of `H1`/`H2`/`H3` headings with page numbers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Numbered headings**: `1.`, `2.1`, `3.1.4` prefixes decide the level
//! - **Font-size ranking**: the three largest sizes map to `H1`..`H3`
//! - **Noise filtering**: boilerplate, long lines and contents rows are dropped
//! - **Batch processing**: whole directories, one JSON file per PDF
//! - **Parallel processing**: Uses Rayon for pages and batch documents

pub mod batch;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchProcessor, BatchReport, DocumentReport};
pub use error::{Error, Result};
pub use model::{
    CandidateLine, DocumentOutline, Heading, HeadingLevel, LayoutBlock, LayoutDocument,
    LayoutLine, LayoutPage, Span,
};
pub use outline::{OutlineConfig, OutlineExtractor, OutlineTrace};
pub use parser::{ErrorMode, PageSelection, ParseOptions, PdfLayoutParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract the outline of a page layout with the default configuration.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, HeadingLevel, LayoutBlock, LayoutDocument, LayoutPage};
///
/// let doc = LayoutDocument::from_pages(vec![LayoutPage::with_blocks(
///     1,
///     vec![
///         LayoutBlock::single("2.1 Background", 14.0),
///         LayoutBlock::single("Plain paragraph text.", 10.0),
///     ],
/// )]);
///
/// let outline = extract_outline(&doc);
/// assert_eq!(outline.outline[0].level, HeadingLevel::H2);
/// ```
pub fn extract_outline(doc: &LayoutDocument) -> DocumentOutline {
    OutlineExtractor::default().extract(doc)
}

/// Extract the outline of a page layout with a custom configuration.
pub fn extract_outline_with_config(doc: &LayoutDocument, config: OutlineConfig) -> DocumentOutline {
    OutlineExtractor::new(config).extract(doc)
}

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_file;
///
/// let outline = extract_file("document.pdf").unwrap();
/// for heading in &outline.outline {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Outliner::new().extract_file(path)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentOutline> {
    Outliner::new().extract_bytes(data)
}

/// Extract the outline of a PDF read from a reader.
pub fn extract_reader<R: Read>(reader: R) -> Result<DocumentOutline> {
    Outliner::new().extract_reader(reader)
}

/// Builder-style outline extraction.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{Outliner, PageSelection};
///
/// let outline = Outliner::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=20))
///     .with_max_levels(2)
///     .extract_file("document.pdf")
///     .unwrap();
/// println!("{}", outline.title);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    config: OutlineConfig,
    parse_options: ParseOptions,
}

impl Outliner {
    /// Create a new outliner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outline configuration.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set layout extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Enable lenient mode (pages that fail to decode are treated as empty).
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Set the number of heading levels (1-3).
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.config = self.config.with_max_levels(levels);
        self
    }

    /// Add a phrase whose presence rejects a heading candidate.
    pub fn ignore_phrase(mut self, phrase: impl AsRef<str>) -> Self {
        self.config = self.config.ignore_phrase(phrase);
        self
    }

    /// The outline configuration in use.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// The layout extraction options in use.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Extract the outline of a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let parser = PdfLayoutParser::open_with_options(path, self.parse_options.clone())?;
        Ok(self.extract_layout(&parser.extract()?))
    }

    /// Extract the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let parser = PdfLayoutParser::from_bytes_with_options(data, self.parse_options.clone())?;
        Ok(self.extract_layout(&parser.extract()?))
    }

    /// Extract the outline of a PDF read from a reader.
    pub fn extract_reader<R: Read>(&self, reader: R) -> Result<DocumentOutline> {
        let parser = PdfLayoutParser::from_reader_with_options(reader, self.parse_options.clone())?;
        Ok(self.extract_layout(&parser.extract()?))
    }

    /// Extract the outline of an already extracted layout.
    pub fn extract_layout(&self, doc: &LayoutDocument) -> DocumentOutline {
        OutlineExtractor::new(self.config.clone()).extract(doc)
    }
}
