//! Outline extraction configuration.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Boilerplate fragments that never name a real section.
const DEFAULT_IGNORED_PHRASES: &[&str] = &[
    "acknowledgements",
    "revision history",
    "table of contents",
    "version",
    "copyright notice",
];

/// Title used when nothing on the first page qualifies.
pub const PLACEHOLDER_TITLE: &str = "Untitled Document";

/// Tunable constants of the heading heuristic.
///
/// Every threshold the pipeline uses lives here so behavior can be adjusted
/// without touching the classifier. The struct deserializes from JSON with
/// missing fields falling back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Lower-case phrase fragments that disqualify a line
    pub ignored_phrases: BTreeSet<String>,

    /// Maximum number of words in a heading
    pub max_heading_words: usize,

    /// Maximum number of characters in a heading
    pub max_heading_chars: usize,

    /// Minimum number of characters in a heading
    pub min_heading_chars: usize,

    /// Minimum number of characters for a span to count toward the title
    pub min_title_chars: usize,

    /// Number of heading levels (1-3)
    pub max_levels: u8,

    /// Pages known to hold front matter such as a table of contents (1-indexed)
    pub front_matter_pages: BTreeSet<u32>,

    /// Title returned when no span qualifies
    pub placeholder_title: String,

    /// Apply NFKC normalization to span text before merging
    pub normalize_unicode: bool,
}

impl OutlineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ignored phrase list.
    pub fn with_ignored_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Add one phrase to the ignored list.
    pub fn ignore_phrase(mut self, phrase: impl AsRef<str>) -> Self {
        self.ignored_phrases.insert(phrase.as_ref().to_lowercase());
        self
    }

    /// Set the maximum heading word count.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Set the maximum heading character count.
    pub fn with_max_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Set the minimum heading character count.
    pub fn with_min_chars(mut self, chars: usize) -> Self {
        self.min_heading_chars = chars;
        self
    }

    /// Set the number of heading levels (clamped to 1-3).
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.max_levels = levels.clamp(1, 3);
        self
    }

    /// Set the front matter pages.
    pub fn with_front_matter_pages<I>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.front_matter_pages = pages.into_iter().collect();
        self
    }

    /// Set the placeholder title.
    pub fn with_placeholder_title(mut self, title: impl Into<String>) -> Self {
        self.placeholder_title = title.into();
        self
    }

    /// Enable or disable NFKC normalization of span text.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Effective number of levels, always within 1-3.
    pub fn levels(&self) -> u8 {
        self.max_levels.clamp(1, 3)
    }

    /// Check if a page is declared as front matter.
    pub fn is_front_matter(&self, page: u32) -> bool {
        self.front_matter_pages.contains(&page)
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.max_levels) {
            return Err(Error::Config(format!(
                "max_levels must be between 1 and 3, got {}",
                self.max_levels
            )));
        }
        if self.front_matter_pages.contains(&0) {
            return Err(Error::Config(
                "front_matter_pages are 1-indexed; 0 is not a page".to_string(),
            ));
        }
        if self.ignored_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::Config(
                "ignored_phrases must not contain empty phrases".to_string(),
            ));
        }
        if self.max_heading_chars < self.min_heading_chars {
            return Err(Error::Config(format!(
                "max_heading_chars ({}) is below min_heading_chars ({})",
                self.max_heading_chars, self.min_heading_chars
            )));
        }
        Ok(())
    }

    /// Lower-case the ignored phrases and drop blank ones.
    pub(crate) fn normalized(mut self) -> Self {
        self.ignored_phrases = self
            .ignored_phrases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.to_lowercase())
            .collect();
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            ignored_phrases: DEFAULT_IGNORED_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_heading_words: 25,
            max_heading_chars: 120,
            min_heading_chars: 3,
            min_title_chars: 4,
            max_levels: 3,
            front_matter_pages: BTreeSet::new(),
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
            normalize_unicode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OutlineConfig::default();
        assert_eq!(config.max_heading_words, 25);
        assert_eq!(config.max_heading_chars, 120);
        assert_eq!(config.levels(), 3);
        assert!(config.ignored_phrases.contains("table of contents"));
        assert!(config.front_matter_pages.is_empty());
        assert_eq!(config.placeholder_title, "Untitled Document");
    }

    #[test]
    fn test_config_builder() {
        let config = OutlineConfig::new()
            .with_ignored_phrases(["Draft", "CONFIDENTIAL"])
            .ignore_phrase("Appendix Z")
            .with_max_words(10)
            .with_max_levels(7)
            .with_front_matter_pages([2, 4]);

        assert_eq!(config.ignored_phrases.len(), 3);
        assert!(config.ignored_phrases.contains("confidential"));
        assert!(config.ignored_phrases.contains("appendix z"));
        assert_eq!(config.max_heading_words, 10);
        assert_eq!(config.max_levels, 3);
        assert!(config.is_front_matter(4));
        assert!(!config.is_front_matter(3));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config =
            OutlineConfig::from_json_str(r#"{"max_heading_words": 12, "ignored_phrases": ["Index"]}"#)
                .unwrap();
        assert_eq!(config.max_heading_words, 12);
        assert_eq!(config.max_heading_chars, 120);
        assert!(config.ignored_phrases.contains("index"));
        assert_eq!(config.ignored_phrases.len(), 1);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            OutlineConfig::from_json_str(r#"{"max_levels": 5}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            OutlineConfig::from_json_str(r#"{"front_matter_pages": [0]}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            OutlineConfig::from_json_str(r#"{"ignored_phrases": [""]}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            OutlineConfig::from_json_str(r#"{"ignored_phrases": ["draft", "   "]}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            OutlineConfig::from_json_str("not json"),
            Err(Error::Config(_))
        ));
    }
}
