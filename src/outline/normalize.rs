//! Block normalization: merging a block's spans into one candidate line.

use unicode_normalization::UnicodeNormalization;

use super::OutlineConfig;
use crate::model::{CandidateLine, LayoutBlock, LayoutDocument, LayoutPage};

/// Collapse every whitespace run to a single space and trim both ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a single span's text according to the configuration.
pub(crate) fn normalize_span_text(text: &str, config: &OutlineConfig) -> String {
    if config.normalize_unicode {
        let folded: String = text.nfkc().collect();
        clean_text(&folded)
    } else {
        clean_text(text)
    }
}

/// Merge all spans of a block into one candidate line.
///
/// Returns `None` for blocks without line structure. A text block whose
/// spans are all blank still yields a candidate, with empty text and a size
/// of zero; the noise filter rejects it.
pub fn normalize_block(
    block: &LayoutBlock,
    page: u32,
    config: &OutlineConfig,
) -> Option<CandidateLine> {
    let lines = block.lines()?;

    let mut merged = String::new();
    let mut sizes: Vec<f32> = Vec::new();

    for span in lines.iter().flat_map(|line| line.spans.iter()) {
        let text = normalize_span_text(&span.text, config);
        if text.is_empty() {
            continue;
        }
        merged.push_str(&text);
        merged.push(' ');
        sizes.push(span.size);
    }

    let size = if sizes.is_empty() {
        0.0
    } else {
        sizes.iter().sum::<f32>() / sizes.len() as f32
    };

    Some(CandidateLine::new(clean_text(&merged), size, page))
}

/// Produce the candidate lines of one page, in block order.
pub fn normalize_page(page: &LayoutPage, config: &OutlineConfig) -> Vec<CandidateLine> {
    page.blocks
        .iter()
        .filter_map(|block| normalize_block(block, page.number, config))
        .collect()
}

/// Produce the candidate lines of a document, in page then block order.
pub fn normalize_document(doc: &LayoutDocument, config: &OutlineConfig) -> Vec<CandidateLine> {
    doc.pages
        .iter()
        .flat_map(|page| normalize_page(page, config))
        .collect()
}
