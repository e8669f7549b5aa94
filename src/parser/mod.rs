//! Section content parsing module.
//!
//! Section content is line-oriented text: unindented `"- "` or `"• "`
//! lines are top-level bullets, indented ones are nested bullets, and
//! anything else is a paragraph.

mod text;

pub use text::{classify_line, parse, parse_sections};
