//! Noise filtering of candidate lines.

use regex::Regex;

use super::{OutlineConfig, Rejection};
use crate::model::CandidateLine;

/// Numbered prefix, content, then a one or two digit page number.
const TOC_ENTRY_PATTERN: &str = r"^\d+(?:\.\d+)*\.?\s+\S.*?[\s.]\d{1,2}$";

/// A standalone one or two digit number at the end of a line.
const TRAILING_PAGE_NUMBER_PATTERN: &str = r"(?:^|\D)\d{1,2}$";

/// Rejects lines that cannot plausibly be headings.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    config: OutlineConfig,
    toc_entry: Regex,
    trailing_page_number: Regex,
}

impl NoiseFilter {
    /// Create a filter for the given configuration.
    pub fn new(config: OutlineConfig) -> Self {
        Self {
            config: config.normalized(),
            toc_entry: Regex::new(TOC_ENTRY_PATTERN).expect("ToC entry pattern is valid"),
            trailing_page_number: Regex::new(TRAILING_PAGE_NUMBER_PATTERN)
                .expect("trailing page number pattern is valid"),
        }
    }

    /// The configuration this filter applies.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Check length limits and the ignored phrase list.
    pub fn is_useful_heading(&self, text: &str) -> bool {
        self.text_rejection(text).is_none()
    }

    /// Check if a line looks like a table-of-contents row.
    pub fn is_toc_entry(&self, text: &str) -> bool {
        self.toc_entry.is_match(text)
    }

    /// Check if a line ends in a standalone one or two digit number.
    pub fn ends_with_page_number(&self, text: &str) -> bool {
        self.trailing_page_number.is_match(text)
    }

    /// Run every check against a candidate, returning the first failure.
    pub fn check(&self, candidate: &CandidateLine) -> Result<(), Rejection> {
        if candidate.text.is_empty() {
            return Err(Rejection::Empty);
        }
        if let Some(reason) = self.text_rejection(&candidate.text) {
            return Err(reason);
        }
        if self.is_toc_entry(&candidate.text) {
            return Err(Rejection::TocEntry);
        }
        if self.config.is_front_matter(candidate.page) && self.ends_with_page_number(&candidate.text)
        {
            return Err(Rejection::FrontMatterPageNumber);
        }
        Ok(())
    }

    fn text_rejection(&self, text: &str) -> Option<Rejection> {
        let char_count = text.chars().count();
        if char_count < self.config.min_heading_chars {
            return Some(Rejection::TooShort);
        }

        let lower = text.to_lowercase();
        if let Some(phrase) = self
            .config
            .ignored_phrases
            .iter()
            .find(|phrase| lower.contains(phrase.as_str()))
        {
            return Some(Rejection::IgnoredPhrase(phrase.clone()));
        }

        if text.split_whitespace().count() > self.config.max_heading_words {
            return Some(Rejection::TooManyWords);
        }
        if char_count > self.config.max_heading_chars {
            return Some(Rejection::TooManyChars);
        }
        None
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(OutlineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_rejected() {
        let filter = NoiseFilter::default();
        assert!(!filter.is_useful_heading(""));
        assert!(!filter.is_useful_heading("ab"));
        assert!(!filter.is_useful_heading("\u{D55C}\u{AE00}"));
        assert!(filter.is_useful_heading("abc"));
    }

    #[test]
    fn test_ignored_phrases_case_insensitive() {
        let filter = NoiseFilter::default();
        assert!(!filter.is_useful_heading("Revision History"));
        assert!(!filter.is_useful_heading("TABLE OF CONTENTS"));
        assert!(!filter.is_useful_heading("Document Version 1.2"));
        assert!(!filter.is_useful_heading("Acknowledgements and thanks"));
        assert!(filter.is_useful_heading("Introduction"));
    }

    #[test]
    fn test_length_limits() {
        let filter = NoiseFilter::default();
        let long = "x".repeat(150);
        assert!(!filter.is_useful_heading(&long));
        assert!(filter.is_useful_heading(&"x".repeat(120)));

        let ok = vec!["ab"; 25].join(" ");
        assert!(ok.chars().count() <= 120);
        assert!(filter.is_useful_heading(&ok));

        let wordy = vec!["ab"; 26].join(" ");
        assert!(wordy.chars().count() <= 120);
        assert_eq!(
            filter.check(&CandidateLine::new(wordy, 12.0, 1)),
            Err(Rejection::TooManyWords)
        );

        let long_words = vec!["word"; 25].join(" ");
        assert_eq!(
            filter.check(&CandidateLine::new(long_words, 12.0, 1)),
            Err(Rejection::TooManyChars)
        );
    }

    #[test]
    fn test_struct_literal_phrases_match_any_case() {
        let config = OutlineConfig {
            ignored_phrases: ["Draft".to_string(), "  ".to_string()].into_iter().collect(),
            ..OutlineConfig::default()
        };
        let filter = NoiseFilter::new(config);
        assert!(!filter.is_useful_heading("Draft Notes"));
        assert!(!filter.is_useful_heading("DRAFT NOTES"));
        assert!(filter.is_useful_heading("Introduction"));
        assert!(filter.config().ignored_phrases.contains("draft"));
    }

    #[test]
    fn test_toc_entries() {
        let filter = NoiseFilter::default();
        assert!(filter.is_toc_entry("1. Introduction 5"));
        assert!(filter.is_toc_entry("2.1 Intended Audience 7"));
        assert!(filter.is_toc_entry("3.2.1 Scope .......... 12"));
        assert!(!filter.is_toc_entry("2.1 Background"));
        assert!(!filter.is_toc_entry("Introduction 5"));
        assert!(!filter.is_toc_entry("4 Results for 2024"));
    }

    #[test]
    fn test_front_matter_page_numbers() {
        let filter = NoiseFilter::new(OutlineConfig::default().with_front_matter_pages([4]));

        let on_toc_page = CandidateLine::new("Business Outcomes 9", 12.0, 4);
        assert_eq!(
            filter.check(&on_toc_page),
            Err(Rejection::FrontMatterPageNumber)
        );

        let elsewhere = CandidateLine::new("Business Outcomes 9", 12.0, 5);
        assert_eq!(filter.check(&elsewhere), Ok(()));

        let year = CandidateLine::new("Plan for 2024", 12.0, 4);
        assert_eq!(filter.check(&year), Ok(()));
    }

    #[test]
    fn test_check_order() {
        let filter = NoiseFilter::default();
        assert_eq!(
            filter.check(&CandidateLine::new("", 0.0, 1)),
            Err(Rejection::Empty)
        );
        assert_eq!(
            filter.check(&CandidateLine::new("1. Table of Contents 2", 12.0, 1)),
            Err(Rejection::IgnoredPhrase("table of contents".to_string()))
        );
        assert_eq!(
            filter.check(&CandidateLine::new("1. Overview 3", 12.0, 1)),
            Err(Rejection::TocEntry)
        );
        assert_eq!(
            filter.check(&CandidateLine::new("1. Overview", 12.0, 1)),
            Ok(())
        );
    }
}
