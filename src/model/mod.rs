//! Document model types.
//!
//! The model has two halves: the page layout that the outline pipeline
//! consumes (pages, blocks, lines, sized spans) and the outline it produces
//! (title plus leveled headings).

mod layout;
mod outline;

pub use layout::{LayoutBlock, LayoutDocument, LayoutLine, LayoutPage, Span};
pub use outline::{CandidateLine, DocumentOutline, Heading, HeadingLevel};
