//! Page layout types consumed by the outline pipeline.
//!
//! A [`LayoutDocument`] is the hand-off point between a layout extractor
//! (see [`crate::parser`]) and the heading heuristic. Any extractor that can
//! produce pages of blocks, lines and sized spans can feed the pipeline, and
//! because the types are serde-enabled a layout can also be loaded from JSON.

use serde::{Deserialize, Serialize};

/// A run of text rendered at a single font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Raw text as extracted (may contain arbitrary whitespace)
    pub text: String,

    /// Rendered font size in points
    pub size: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }
}

/// An ordered sequence of spans sharing a baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl LayoutLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a line holding a single span.
    pub fn single(text: impl Into<String>, size: f32) -> Self {
        Self::new(vec![Span::new(text, size)])
    }
}

/// A layout region on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutBlock {
    /// A text region made of one or more lines
    Text {
        /// Lines in reading order
        lines: Vec<LayoutLine>,
    },
    /// A region without line structure (e.g. an embedded image)
    Image,
}

impl LayoutBlock {
    /// Create a text block from lines.
    pub fn text(lines: Vec<LayoutLine>) -> Self {
        LayoutBlock::Text { lines }
    }

    /// Create a text block with one line of one span.
    pub fn single(text: impl Into<String>, size: f32) -> Self {
        LayoutBlock::Text {
            lines: vec![LayoutLine::single(text, size)],
        }
    }

    /// Lines of this block, or `None` for blocks without line structure.
    pub fn lines(&self) -> Option<&[LayoutLine]> {
        match self {
            LayoutBlock::Text { lines } => Some(lines),
            LayoutBlock::Image => None,
        }
    }

    /// Iterate over every span of the block in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines()
            .unwrap_or_default()
            .iter()
            .flat_map(|line| line.spans.iter())
    }
}

/// A single page of layout blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Blocks in reading order
    pub blocks: Vec<LayoutBlock>,
}

impl LayoutPage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Create a page with the given blocks.
    pub fn with_blocks(number: u32, blocks: Vec<LayoutBlock>) -> Self {
        Self { number, blocks }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: LayoutBlock) {
        self.blocks.push(block);
    }

    /// Iterate over every span on the page, ignoring block boundaries.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.blocks.iter().flat_map(|block| block.spans())
    }

    /// Check if the page has no text blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.lines().is_none())
    }
}

/// Layout of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Source name (usually the file name), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Pages in ascending page order
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    /// Create a new empty layout document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout document from pages.
    pub fn from_pages(pages: Vec<LayoutPage>) -> Self {
        Self {
            source: None,
            pages,
        }
    }

    /// Set the source name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get the first page, if any.
    pub fn first_page(&self) -> Option<&LayoutPage> {
        self.pages.first()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: LayoutPage) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
