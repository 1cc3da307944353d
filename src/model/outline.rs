//! Outline types produced by the heading pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading hierarchy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Level for a zero-based depth, capped at `H3`.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Zero-based depth of this level.
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 0,
            HeadingLevel::H2 => 1,
            HeadingLevel::H3 => 2,
        }
    }

    /// Numeric level (1-3).
    pub fn number(self) -> u8 {
        self.depth() as u8 + 1
    }

    /// Cap this level so it is no deeper than `max_levels`.
    pub fn capped(self, max_levels: u8) -> Self {
        let max_depth = usize::from(max_levels.clamp(1, 3)) - 1;
        Self::from_depth(self.depth().min(max_depth))
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.number())
    }
}

/// A merged, whitespace-normalized line eligible for heading classification.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLine {
    /// Normalized text
    pub text: String,

    /// Mean font size of the contributing spans
    pub size: f32,

    /// Source page (1-indexed)
    pub page: u32,
}

impl CandidateLine {
    /// Create a new candidate line.
    pub fn new(text: impl Into<String>, size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            size,
            page,
        }
    }
}

/// A heading entry in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Hierarchy level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page the heading first appears on (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and heading outline of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Inferred document title
    pub title: String,

    /// Headings in document order
    pub outline: Vec<Heading>,
}

impl DocumentOutline {
    /// Create a new outline.
    pub fn new(title: impl Into<String>, outline: Vec<Heading>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Get the number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Iterate over headings of a given level.
    pub fn headings_at(&self, level: HeadingLevel) -> impl Iterator<Item = &Heading> {
        self.outline.iter().filter(move |h| h.level == level)
    }
}
