//! Page layout analysis for PDF documents.
//!
//! Text is pulled from each page's content stream as positioned, sized spans,
//! then grouped into lines by baseline and into blocks by vertical spacing,
//! font size changes and indentation.

use std::collections::HashMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{LayoutBlock, LayoutLine, LayoutPage, Span};

/// A text span with position and font information.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated advance width
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
}

impl TextSpan {
    /// Create a new text span, estimating its width from the character count.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let width = estimate_width(&text, font_size);
        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
        }
    }

    /// Right edge of the span.
    pub fn end_x(&self) -> f32 {
        self.x + self.width
    }

    /// Check if `next` continues this span: same font, same baseline, and
    /// starting within one em of this span's end.
    fn continues_with(&self, next: &TextSpan) -> bool {
        self.font_name == next.font_name
            && (self.font_size - next.font_size).abs() < 0.01
            && (self.y - next.y).abs() < 0.01
            && next.x >= self.x
            && (next.x - self.end_x()).abs() <= self.font_size
    }

    /// Append a continuation span, inserting a space across visible gaps.
    fn absorb(&mut self, next: TextSpan) {
        let gap = next.x - self.end_x();
        let needs_space = gap > self.font_size * 0.15
            && !self.text.ends_with(char::is_whitespace)
            && !next.text.starts_with(char::is_whitespace);
        if needs_space {
            self.text.push(' ');
        }
        self.text.push_str(&next.text);
        self.width = next.end_x() - self.x;
    }
}

/// Raw text content of one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Spans in content stream order
    pub spans: Vec<TextSpan>,
    /// Number of XObjects painted on the page
    pub image_count: usize,
}

/// Extracts positioned text spans from page content streams.
pub struct SpanExtractor<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> SpanExtractor<'a> {
    /// Create a new extractor.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract spans from a page.
    pub fn extract_page(&self, page_num: u32) -> Result<PageContent> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let content = self
            .doc
            .get_page_content(*page_id)
            .map_err(|e| Error::PdfParse(format!("Page {}: {}", page_num, e)))?;
        self.parse_content(*page_id, &content)
    }

    fn font_names(&self, page_id: ObjectId) -> Result<HashMap<Vec<u8>, String>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(fonts
            .iter()
            .map(|(key, font)| {
                let base_font = font
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                (key.clone(), base_font)
            })
            .collect())
    }

    /// Decode string bytes with the font's encoding, or a plain fallback.
    fn decode(&self, page_id: ObjectId, font_key: &[u8], bytes: &[u8]) -> String {
        let fonts = match self.doc.get_page_fonts(page_id) {
            Ok(fonts) => fonts,
            Err(_) => return decode_text_simple(bytes),
        };
        let encoding = fonts
            .get(font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    fn parse_content(&self, page_id: ObjectId, content: &[u8]) -> Result<PageContent> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;
        let font_names = self.font_names(page_id)?;

        let mut page = PageContent::default();
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let [Object::Name(key), size, ..] = op.operands.as_slice() {
                        state.font_name = font_names
                            .get(key)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                        state.font_key = key.clone();
                        state.font_size = get_number(size).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = op.operands.as_slice() {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let n: Vec<f32> = op
                            .operands
                            .iter()
                            .take(6)
                            .map(|o| get_number(o).unwrap_or(0.0))
                            .collect();
                        state.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                    }
                }
                "T*" => state.matrix.next_line(state.leading),
                "Tj" | "TJ" | "'" | "\"" if in_text_block => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.matrix.next_line(state.leading);
                    }
                    let operand = match op.operator.as_str() {
                        "\"" => op.operands.get(2),
                        _ => op.operands.first(),
                    };
                    let text = match operand {
                        Some(Object::Array(items)) => self.decode_array(page_id, &state, items),
                        Some(Object::String(bytes, _)) => {
                            self.decode(page_id, &state.font_key, bytes)
                        }
                        _ => String::new(),
                    };
                    self.push_text(&mut page, &mut state, text);
                }
                "Do" => page.image_count += 1,
                _ => {}
            }
        }

        Ok(page)
    }

    /// Decode a TJ array. Large negative adjustments mark word breaks.
    fn decode_array(&self, page_id: ObjectId, state: &TextState, items: &[Object]) -> String {
        // In thousandths of text space; roughly a fifth of an em.
        let space_threshold = 200.0;
        let mut combined = String::new();

        for item in items {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode(page_id, &state.font_key, bytes));
                }
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    let breaks_word = adjustment > space_threshold
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                        && !combined
                            .chars()
                            .last()
                            .map(is_spaceless_script_char)
                            .unwrap_or(false);
                    if breaks_word {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }

        combined
    }

    fn push_text(&self, page: &mut PageContent, state: &mut TextState, text: String) {
        if text.trim().is_empty() {
            return;
        }

        let (x, y) = state.matrix.position();
        let size = state.font_size * state.matrix.scale();
        let span = TextSpan::new(text, x, y, size, state.font_name.clone());
        // Showing text moves the pen; track it so the next show on the
        // same line continues this span.
        state.matrix.advance(span.width / state.matrix.scale().max(f32::EPSILON));

        match page.spans.last_mut() {
            Some(last) if last.continues_with(&span) => last.absorb(span),
            _ => page.spans.push(span),
        }
    }
}

/// Groups spans into lines and lines into layout blocks.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    /// Baseline tolerance as a fraction of font size
    pub line_tolerance: f32,
    /// Vertical gap, relative to average line spacing, that starts a block
    pub block_gap_ratio: f32,
    /// Font size difference (points) that starts a block
    pub size_change: f32,
    /// Left edge shift (points) that starts a block
    pub indent_change: f32,
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self {
            line_tolerance: 0.3,
            block_gap_ratio: 1.5,
            size_change: 1.0,
            indent_change: 20.0,
        }
    }
}

/// A line of spans sharing a baseline, before conversion to the model.
#[derive(Debug, Clone)]
struct GroupedLine {
    spans: Vec<TextSpan>,
    x: f32,
    y: f32,
    font_size: f32,
}

impl GroupedLine {
    fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            spans.first().map(|s| s.font_size).unwrap_or(0.0)
        };

        let x = spans.first().map(|s| s.x).unwrap_or(0.0);
        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        Self {
            spans,
            x,
            y,
            font_size,
        }
    }

    fn into_layout_line(self) -> LayoutLine {
        LayoutLine::new(
            self.spans
                .into_iter()
                .map(|s| Span::new(s.text, s.font_size))
                .collect(),
        )
    }
}

impl BlockBuilder {
    /// Build a layout page from extracted content.
    ///
    /// Text blocks come first, top to bottom. Painted XObjects carry no
    /// position here, so their image blocks follow the text.
    pub fn build(&self, number: u32, content: PageContent) -> LayoutPage {
        let lines = self.group_lines(content.spans);
        let mut blocks = self.group_blocks(lines);
        blocks.extend(std::iter::repeat(LayoutBlock::Image).take(content.image_count));

        log::debug!("Page {}: {} blocks", number, blocks.len());
        LayoutPage::with_blocks(number, blocks)
    }

    fn group_lines(&self, mut spans: Vec<TextSpan>) -> Vec<GroupedLine> {
        // PDF Y grows upward: sort top to bottom, then left to right
        spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut lines = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in spans {
            let tolerance = span.font_size * self.line_tolerance;
            match current_y {
                Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        lines.push(GroupedLine::from_spans(std::mem::take(&mut current)));
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            lines.push(GroupedLine::from_spans(current));
        }

        lines
    }

    fn group_blocks(&self, lines: Vec<GroupedLine>) -> Vec<LayoutBlock> {
        let avg_spacing = average_line_spacing(&lines);

        let mut blocks = Vec::new();
        let mut current: Vec<GroupedLine> = Vec::new();

        for line in lines {
            let starts_block = current
                .last()
                .map(|prev| self.should_break(prev, &line, avg_spacing))
                .unwrap_or(false);
            if starts_block {
                blocks.push(to_block(std::mem::take(&mut current)));
            }
            current.push(line);
        }
        if !current.is_empty() {
            blocks.push(to_block(current));
        }

        blocks
    }

    fn should_break(&self, prev: &GroupedLine, curr: &GroupedLine, avg_spacing: f32) -> bool {
        (prev.y - curr.y).abs() > avg_spacing * self.block_gap_ratio
            || (prev.font_size - curr.font_size).abs() > self.size_change
            || (prev.x - curr.x).abs() > self.indent_change
    }
}

fn to_block(lines: Vec<GroupedLine>) -> LayoutBlock {
    LayoutBlock::text(lines.into_iter().map(GroupedLine::into_layout_line).collect())
}

fn average_line_spacing(lines: &[GroupedLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Rough advance width: half an em per character.
fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}

/// Text state tracked across content stream operators.
#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 12.0,
        }
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    line_x: f32,
    line_y: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_x: 0.0,
            line_y: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            line_x: e,
            line_y: f,
        };
    }

    /// Move to the start of the next line, offset from the current line start.
    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_x += tx * self.a + ty * self.c;
        self.line_y += tx * self.b + ty * self.d;
        self.e = self.line_x;
        self.f = self.line_y;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    /// Move the pen along the baseline by `tx` unscaled units.
    fn advance(&mut self, tx: f32) {
        self.e += tx * self.a;
        self.f += tx * self.b;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if a character belongs to a script written without word spaces.
///
/// Chinese and Japanese qualify; Korean uses spaces and does not.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Text decoding fallback when a font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, size, "Helvetica".to_string())
    }

    #[test]
    fn test_span_continuation() {
        let mut first = span("Intro", 72.0, 700.0, 10.0);
        // 5 chars * 10pt * 0.5 = 25pt wide
        assert_eq!(first.end_x(), 97.0);

        let touching = span("duction", 97.0, 700.0, 10.0);
        assert!(first.continues_with(&touching));
        first.absorb(touching);
        assert_eq!(first.text, "Introduction");

        let spaced = span("Notes", 137.0, 700.0, 10.0);
        assert!(first.continues_with(&spaced));
        first.absorb(spaced);
        assert_eq!(first.text, "Introduction Notes");

        let other_line = span("Body", 72.0, 680.0, 10.0);
        assert!(!first.continues_with(&other_line));
    }

    #[test]
    fn test_group_lines_by_baseline() {
        let builder = BlockBuilder::default();
        let lines = builder.group_lines(vec![
            span("world", 120.0, 700.0, 12.0),
            span("Next", 72.0, 680.0, 12.0),
            span("Hello", 72.0, 701.0, 12.0),
        ]);

        assert_eq!(lines.len(), 2);
        let first: Vec<&str> = lines[0].spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(first, vec!["Hello", "world"]);
    }

    #[test]
    fn test_blocks_split_on_size_and_gap() {
        let builder = BlockBuilder::default();
        let content = PageContent {
            spans: vec![
                span("1. Introduction", 72.0, 720.0, 18.0),
                span("First body line", 72.0, 690.0, 11.0),
                span("Second body line", 72.0, 676.0, 11.0),
                span("Third body line", 72.0, 662.0, 11.0),
                span("After a gap", 72.0, 560.0, 11.0),
            ],
            image_count: 1,
        };

        let page = builder.build(3, content);
        assert_eq!(page.number, 3);
        assert_eq!(page.blocks.len(), 4);

        let line_counts: Vec<Option<usize>> =
            page.blocks.iter().map(|b| b.lines().map(|l| l.len())).collect();
        assert_eq!(line_counts, vec![Some(1), Some(3), Some(1), None]);
    }

    #[test]
    fn test_text_matrix_lines() {
        let mut m = TextMatrix::default();
        m.set(1.0, 0.0, 0.0, 1.0, 72.0, 720.0);
        m.advance(50.0);
        assert_eq!(m.position(), (122.0, 720.0));
        m.next_line(14.0);
        assert_eq!(m.position(), (72.0, 706.0));
        m.translate(10.0, -20.0);
        assert_eq!(m.position(), (82.0, 686.0));
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x43, 0x61, 0x66, 0xE9]), "Caf\u{e9}");
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('\u{4E2D}'));
        assert!(is_spaceless_script_char('\u{3042}'));
        assert!(!is_spaceless_script_char('\u{D55C}'));
        assert!(!is_spaceless_script_char('a'));
    }
}
