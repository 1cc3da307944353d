//! PDF layout extraction.
//!
//! [`PdfLayoutParser`] turns a PDF into a [`LayoutDocument`](crate::model::LayoutDocument):
//! pages of text blocks, each holding lines of sized spans.

mod layout;
mod options;
mod pdf_parser;

pub use layout::{BlockBuilder, PageContent, SpanExtractor, TextSpan};
pub use options::{ErrorMode, PageSelection, ParseOptions};
pub use pdf_parser::{has_pdf_header, PdfLayoutParser};
