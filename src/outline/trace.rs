//! Diagnostic hook for the outline pipeline.
//!
//! The heuristic drops candidates silently. An [`OutlineTrace`] receives a
//! callback for every decision so tests and debugging tools can see why a
//! line did or did not become a heading, without the pipeline logging
//! anything itself.
//!
//! # Example
//!
//! ```
//! use pdfoutline::model::{LayoutBlock, LayoutDocument, LayoutPage};
//! use pdfoutline::outline::{OutlineExtractor, RecordingTrace, TraceEvent};
//!
//! let doc = LayoutDocument::from_pages(vec![LayoutPage::with_blocks(
//!     1,
//!     vec![LayoutBlock::single("ok", 12.0)],
//! )]);
//!
//! let mut trace = RecordingTrace::new();
//! let outline = OutlineExtractor::default().extract_traced(&doc, &mut trace);
//! assert!(outline.is_empty());
//! assert!(matches!(trace.events()[1], TraceEvent::Rejected { .. }));
//! ```

use std::fmt;

use crate::model::{CandidateLine, Heading};

/// Why the noise filter rejected a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No text left after normalization
    Empty,
    /// Fewer characters than the configured minimum
    TooShort,
    /// Contains an ignored phrase fragment
    IgnoredPhrase(String),
    /// More words than the configured maximum
    TooManyWords,
    /// More characters than the configured maximum
    TooManyChars,
    /// Shaped like a table-of-contents row
    TocEntry,
    /// Ends in a page number on a front matter page
    FrontMatterPageNumber,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Empty => write!(f, "empty text"),
            Rejection::TooShort => write!(f, "too short"),
            Rejection::IgnoredPhrase(phrase) => write!(f, "contains ignored phrase '{}'", phrase),
            Rejection::TooManyWords => write!(f, "too many words"),
            Rejection::TooManyChars => write!(f, "too many characters"),
            Rejection::TocEntry => write!(f, "table of contents entry"),
            Rejection::FrontMatterPageNumber => write!(f, "page number on front matter page"),
        }
    }
}

/// Which rule assigned a heading's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    /// Leading numeric outline marker
    Pattern,
    /// Font size rank table
    FontSize,
}

/// Observer of outline pipeline decisions.
///
/// All methods do nothing by default.
pub trait OutlineTrace {
    /// A normalized candidate line is about to be filtered.
    fn on_candidate(&mut self, candidate: &CandidateLine) {
        let _ = candidate;
    }

    /// The noise filter rejected a candidate.
    fn on_rejected(&mut self, candidate: &CandidateLine, reason: &Rejection) {
        let _ = (candidate, reason);
    }

    /// A candidate matched no pattern and its size has no rank.
    fn on_unranked(&mut self, candidate: &CandidateLine) {
        let _ = candidate;
    }

    /// A candidate repeated text that was already emitted.
    fn on_duplicate(&mut self, candidate: &CandidateLine) {
        let _ = candidate;
    }

    /// A heading was appended to the outline.
    fn on_heading(&mut self, heading: &Heading, source: LevelSource) {
        let _ = (heading, source);
    }
}

/// Trace that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl OutlineTrace for NoopTrace {}

/// A recorded pipeline decision.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// Candidate entered the filter
    Candidate(CandidateLine),
    /// Candidate rejected by the filter
    Rejected {
        /// The rejected candidate
        candidate: CandidateLine,
        /// Why it was rejected
        reason: Rejection,
    },
    /// Candidate had no level
    Unranked(CandidateLine),
    /// Candidate repeated emitted text
    Duplicate(CandidateLine),
    /// Heading emitted
    Heading {
        /// The emitted heading
        heading: Heading,
        /// Rule that chose the level
        source: LevelSource,
    },
}

/// Trace that records every event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTrace {
    events: Vec<TraceEvent>,
}

impl RecordingTrace {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Rejected candidates with their reasons.
    pub fn rejections(&self) -> impl Iterator<Item = (&CandidateLine, &Rejection)> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Rejected { candidate, reason } => Some((candidate, reason)),
            _ => None,
        })
    }

    /// Number of duplicate drops.
    pub fn duplicate_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Duplicate(_)))
            .count()
    }
}

impl OutlineTrace for RecordingTrace {
    fn on_candidate(&mut self, candidate: &CandidateLine) {
        self.events.push(TraceEvent::Candidate(candidate.clone()));
    }

    fn on_rejected(&mut self, candidate: &CandidateLine, reason: &Rejection) {
        self.events.push(TraceEvent::Rejected {
            candidate: candidate.clone(),
            reason: reason.clone(),
        });
    }

    fn on_unranked(&mut self, candidate: &CandidateLine) {
        self.events.push(TraceEvent::Unranked(candidate.clone()));
    }

    fn on_duplicate(&mut self, candidate: &CandidateLine) {
        self.events.push(TraceEvent::Duplicate(candidate.clone()));
    }

    fn on_heading(&mut self, heading: &Heading, source: LevelSource) {
        self.events.push(TraceEvent::Heading {
            heading: heading.clone(),
            source,
        });
    }
}
