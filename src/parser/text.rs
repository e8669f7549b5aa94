//! Line classification for freeform section content.

use crate::model::{Block, SectionInput};

/// Markers that open a bullet item.
const BULLET_MARKERS: [&str; 2] = ["- ", "• "];

/// Indent width (in columns) at which a bullet becomes nested.
const NESTED_INDENT: usize = 2;

/// Column width counted for a leading tab.
const TAB_WIDTH: usize = 2;

/// Parse section content into blocks.
///
/// Blank lines are dropped; every other line yields exactly one block,
/// in line order.
pub fn parse(content: &str) -> Vec<Block> {
    content.split('\n').filter_map(classify_line).collect()
}

/// Parse each section's content independently.
pub fn parse_sections(sections: &[SectionInput]) -> Vec<Vec<Block>> {
    sections.iter().map(|s| parse(&s.content)).collect()
}

/// Classify a single line. Returns `None` for blank lines.
///
/// Any indent of two columns or more marks a nested bullet; deeper
/// indents fold into the same level.
pub fn classify_line(line: &str) -> Option<Block> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let block = match strip_marker(trimmed) {
        Some(text) if indent_width(line) >= NESTED_INDENT => Block::bullet(text, 1),
        Some(text) => Block::bullet(text, 0),
        None => Block::paragraph(trimmed),
    };
    Some(block)
}

fn strip_marker(trimmed: &str) -> Option<&str> {
    BULLET_MARKERS
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}
