//! JSON rendering for outlines and layouts.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{DocumentOutline, LayoutDocument};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// The result has the shape `{"title": ..., "outline": [{"level", "text", "page"}]}`.
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Convert a page layout to JSON, for inspecting what the outline sees.
pub fn layout_to_json(layout: &LayoutDocument, format: JsonFormat) -> Result<String> {
    serialize(layout, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
