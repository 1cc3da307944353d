//! Title inference from the first page.
//!
//! The title is read straight from the first page's spans rather than from
//! merged blocks, so a title and subtitle set in different large sizes can be
//! picked up even when they share a block with body text.

use super::normalize::normalize_span_text;
use super::OutlineConfig;
use crate::model::LayoutPage;

/// Infer a document title from its first page.
///
/// Every span whose normalized text has at least `min_title_chars`
/// characters is ranked by font size, largest first. Spans of equal size
/// keep their encounter order, so the first one on the page wins a tie.
/// The two largest are joined with two spaces; a single qualifying span is
/// used alone; with none, the placeholder title is returned.
pub fn infer_title(first_page: Option<&LayoutPage>, config: &OutlineConfig) -> String {
    let Some(page) = first_page else {
        return config.placeholder_title.clone();
    };

    let mut records: Vec<(f32, String)> = page
        .spans()
        .map(|span| (span.size, normalize_span_text(&span.text, config)))
        .filter(|(_, text)| text.chars().count() >= config.min_title_chars)
        .collect();

    // sort_by is stable
    records.sort_by(|a, b| b.0.total_cmp(&a.0));

    match records.as_slice() {
        [] => config.placeholder_title.clone(),
        [(_, only)] => only.clone(),
        [(_, first), (_, second), ..] => format!("{}  {}", first, second),
    }
}
