//! Heading level assignment.

use std::collections::HashSet;

use regex::Regex;

use super::{LevelSource, OutlineConfig, OutlineTrace};
use crate::model::{CandidateLine, Heading, HeadingLevel};

/// One to three dot-separated integer groups at the start of a line.
const NUMERIC_PREFIX_PATTERN: &str = r"^\d+(?:\.\d+){0,2}";

/// Mapping from the largest distinct font sizes to heading levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeRankTable {
    entries: Vec<(f32, HeadingLevel)>,
}

impl SizeRankTable {
    /// Build a table from observed sizes.
    ///
    /// Sizes are compared exactly. The largest distinct size maps to `H1`,
    /// the next to `H2`, and so on for at most `max_levels` entries.
    pub fn build<I>(sizes: I, max_levels: u8) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut distinct: Vec<f32> = sizes.into_iter().filter(|s| !s.is_nan()).collect();
        distinct.sort_by(|a, b| b.total_cmp(a));
        distinct.dedup();

        let entries = distinct
            .into_iter()
            .take(usize::from(max_levels.clamp(1, 3)))
            .enumerate()
            .map(|(i, size)| (size, HeadingLevel::from_depth(i)))
            .collect();

        Self { entries }
    }

    /// Build a table from candidate line sizes.
    pub fn from_candidates(candidates: &[CandidateLine], max_levels: u8) -> Self {
        Self::build(candidates.iter().map(|c| c.size), max_levels)
    }

    /// Level for a size, if it is among the ranked sizes.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        self.entries
            .iter()
            .find(|(ranked, _)| *ranked == size)
            .map(|(_, level)| *level)
    }

    /// Ranked sizes with their levels, largest size first.
    pub fn entries(&self) -> &[(f32, HeadingLevel)] {
        &self.entries
    }

    /// Number of ranked sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no size is ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assigns levels to filtered candidates and builds the outline.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    numeric_prefix: Regex,
    max_levels: u8,
}

impl HeadingClassifier {
    /// Create a classifier for the given configuration.
    pub fn new(config: &OutlineConfig) -> Self {
        Self {
            numeric_prefix: Regex::new(NUMERIC_PREFIX_PATTERN)
                .expect("numeric prefix pattern is valid"),
            max_levels: config.levels(),
        }
    }

    /// Level implied by a leading numeric outline marker.
    ///
    /// `1` and `1.` give `H1`, `1.2` gives `H2`, `1.2.3` gives `H3`. Longer
    /// markers such as `1.2.3.4` match their first three groups.
    pub fn classify_by_pattern(&self, text: &str) -> Option<HeadingLevel> {
        let marker = self.numeric_prefix.find(text)?;
        let dots = marker.as_str().matches('.').count();
        Some(HeadingLevel::from_depth(dots).capped(self.max_levels))
    }

    /// Classify candidates in order, dropping unranked and repeated text.
    pub fn classify(
        &self,
        candidates: &[CandidateLine],
        trace: &mut dyn OutlineTrace,
    ) -> Vec<Heading> {
        let table = SizeRankTable::from_candidates(candidates, self.max_levels);
        self.classify_with_table(candidates, &table, trace)
    }

    /// Classify candidates against a prebuilt size table.
    pub fn classify_with_table(
        &self,
        candidates: &[CandidateLine],
        table: &SizeRankTable,
        trace: &mut dyn OutlineTrace,
    ) -> Vec<Heading> {
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut headings = Vec::new();

        for candidate in candidates {
            if emitted.contains(candidate.text.as_str()) {
                trace.on_duplicate(candidate);
                continue;
            }

            let (level, source) = match self.classify_by_pattern(&candidate.text) {
                Some(level) => (level, LevelSource::Pattern),
                None => match table.level_for(candidate.size) {
                    Some(level) => (level, LevelSource::FontSize),
                    None => {
                        trace.on_unranked(candidate);
                        continue;
                    }
                },
            };

            emitted.insert(candidate.text.as_str());
            let heading = Heading::new(level, candidate.text.clone(), candidate.page);
            trace.on_heading(&heading, source);
            headings.push(heading);
        }

        headings
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(&OutlineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{NoopTrace, RecordingTrace, TraceEvent};

    #[test]
    fn test_size_rank_table_top_three() {
        let table = SizeRankTable::build([12.0, 24.0, 14.0, 12.0, 18.0, 24.0, 10.0], 3);
        assert_eq!(
            table.entries(),
            &[
                (24.0, HeadingLevel::H1),
                (18.0, HeadingLevel::H2),
                (14.0, HeadingLevel::H3)
            ]
        );
        assert_eq!(table.level_for(18.0), Some(HeadingLevel::H2));
        assert_eq!(table.level_for(12.0), None);
    }

    #[test]
    fn test_size_rank_table_small_inputs() {
        assert!(SizeRankTable::build(Vec::<f32>::new(), 3).is_empty());

        let single = SizeRankTable::build([11.0, 11.0, 11.0], 3);
        assert_eq!(single.entries(), &[(11.0, HeadingLevel::H1)]);

        let capped = SizeRankTable::build([20.0, 16.0, 12.0], 2);
        assert_eq!(capped.len(), 2);
        assert_eq!(capped.level_for(12.0), None);
    }

    #[test]
    fn test_pattern_levels() {
        let classifier = HeadingClassifier::default();
        assert_eq!(
            classifier.classify_by_pattern("1. Introduction"),
            Some(HeadingLevel::H1)
        );
        assert_eq!(
            classifier.classify_by_pattern("3 Methods"),
            Some(HeadingLevel::H1)
        );
        assert_eq!(
            classifier.classify_by_pattern("2.1 Background"),
            Some(HeadingLevel::H2)
        );
        assert_eq!(
            classifier.classify_by_pattern("2.1.4 Details"),
            Some(HeadingLevel::H3)
        );
        assert_eq!(
            classifier.classify_by_pattern("1.2.3.4 Deep"),
            Some(HeadingLevel::H3)
        );
        assert_eq!(classifier.classify_by_pattern("Introduction"), None);
        assert_eq!(classifier.classify_by_pattern(" 1 Leading space"), None);
    }

    #[test]
    fn test_pattern_respects_max_levels() {
        let classifier = HeadingClassifier::new(&OutlineConfig::default().with_max_levels(2));
        assert_eq!(
            classifier.classify_by_pattern("2.1.4 Details"),
            Some(HeadingLevel::H2)
        );
    }

    #[test]
    fn test_pattern_beats_font_size() {
        let classifier = HeadingClassifier::default();
        let candidates = vec![
            CandidateLine::new("Big Heading", 30.0, 1),
            CandidateLine::new("3.1.2 Tiny numbered", 6.0, 1),
            CandidateLine::new("Medium Heading", 20.0, 2),
            CandidateLine::new("Body text sentence here", 11.0, 2),
            CandidateLine::new("Small Heading", 14.0, 2),
        ];

        let headings = classifier.classify(&candidates, &mut NoopTrace);
        let summary: Vec<(HeadingLevel, &str)> = headings
            .iter()
            .map(|h| (h.level, h.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HeadingLevel::H1, "Big Heading"),
                (HeadingLevel::H3, "3.1.2 Tiny numbered"),
                (HeadingLevel::H2, "Medium Heading"),
                (HeadingLevel::H3, "Small Heading"),
            ]
        );
    }

    #[test]
    fn test_duplicates_keep_first_page() {
        let classifier = HeadingClassifier::default();
        let candidates = vec![
            CandidateLine::new("2.1 Background", 14.0, 2),
            CandidateLine::new("2.1 Background", 14.0, 3),
        ];

        let mut trace = RecordingTrace::new();
        let headings = classifier.classify(&candidates, &mut trace);
        assert_eq!(
            headings,
            vec![Heading::new(HeadingLevel::H2, "2.1 Background", 2)]
        );
        assert_eq!(trace.duplicate_count(), 1);
    }

    #[test]
    fn test_unranked_does_not_block_later_occurrence() {
        let classifier = HeadingClassifier::default();
        let candidates = vec![
            CandidateLine::new("Summary", 9.0, 1),
            CandidateLine::new("Huge", 40.0, 1),
            CandidateLine::new("Large", 30.0, 1),
            CandidateLine::new("Medium", 20.0, 1),
            CandidateLine::new("Summary", 20.0, 2),
        ];

        let mut trace = RecordingTrace::new();
        let headings = classifier.classify(&candidates, &mut trace);
        assert_eq!(headings.len(), 4);
        assert_eq!(
            headings[3],
            Heading::new(HeadingLevel::H3, "Summary", 2)
        );
        assert!(matches!(trace.events()[0], TraceEvent::Unranked(_)));
    }
}
