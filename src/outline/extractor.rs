//! The outline pipeline: normalize, filter, infer title, classify.

use super::classify::HeadingClassifier;
use super::filter::NoiseFilter;
use super::normalize::normalize_document;
use super::title::infer_title;
use super::{NoopTrace, OutlineConfig, OutlineTrace};
use crate::model::{CandidateLine, DocumentOutline, LayoutDocument};

/// Derives a title and heading outline from a page layout.
///
/// An extractor holds no per-document state, so one instance can be reused
/// for any number of documents and shared between threads.
///
/// # Example
///
/// ```
/// use pdfoutline::model::{LayoutBlock, LayoutDocument, LayoutPage};
/// use pdfoutline::outline::OutlineExtractor;
///
/// let doc = LayoutDocument::from_pages(vec![LayoutPage::with_blocks(
///     1,
///     vec![
///         LayoutBlock::single("Field Guide", 26.0),
///         LayoutBlock::single("1. Getting Started", 16.0),
///         LayoutBlock::single("Some body text.", 11.0),
///     ],
/// )]);
///
/// let outline = OutlineExtractor::default().extract(&doc);
/// assert_eq!(outline.title, "Field Guide  1. Getting Started");
/// assert_eq!(outline.outline[1].text, "1. Getting Started");
/// ```
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    filter: NoiseFilter,
    classifier: HeadingClassifier,
}

impl OutlineExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: OutlineConfig) -> Self {
        let classifier = HeadingClassifier::new(&config);
        Self {
            filter: NoiseFilter::new(config),
            classifier,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OutlineConfig {
        self.filter.config()
    }

    /// The noise filter in use.
    pub fn filter(&self) -> &NoiseFilter {
        &self.filter
    }

    /// The heading classifier in use.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Extract the outline of a document.
    pub fn extract(&self, doc: &LayoutDocument) -> DocumentOutline {
        self.extract_traced(doc, &mut NoopTrace)
    }

    /// Extract the outline of a document, reporting every decision to `trace`.
    pub fn extract_traced(
        &self,
        doc: &LayoutDocument,
        trace: &mut dyn OutlineTrace,
    ) -> DocumentOutline {
        let title = infer_title(doc.first_page(), self.config());
        let candidates = self.candidates(doc, trace);
        let outline = self.classifier.classify(&candidates, trace);

        log::debug!(
            "{}: {} pages, {} candidates, {} headings",
            doc.source.as_deref().unwrap_or("<layout>"),
            doc.page_count(),
            candidates.len(),
            outline.len()
        );

        DocumentOutline::new(title, outline)
    }

    /// Normalized candidates that pass the noise filter, in document order.
    pub fn candidates(
        &self,
        doc: &LayoutDocument,
        trace: &mut dyn OutlineTrace,
    ) -> Vec<CandidateLine> {
        normalize_document(doc, self.config())
            .into_iter()
            .filter(|candidate| {
                trace.on_candidate(candidate);
                match self.filter.check(candidate) {
                    Ok(()) => true,
                    Err(reason) => {
                        trace.on_rejected(candidate, &reason);
                        false
                    }
                }
            })
            .collect()
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new(OutlineConfig::default())
    }
}
