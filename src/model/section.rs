//! Section input and its parsed form.

use serde::{Deserialize, Serialize};

use super::Block;

/// Title used when a section has none.
pub const UNTITLED: &str = "Untitled";

/// A section record supplied by the caller.
///
/// The caller owns the persisted record; the pipeline only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInput {
    /// Section title
    #[serde(default)]
    pub title: Option<String>,

    /// Freeform line-oriented content
    #[serde(default)]
    pub content: String,
}

impl SectionInput {
    /// Create a section with a title.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: content.into(),
        }
    }

    /// Create a section without a title.
    pub fn untitled(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: content.into(),
        }
    }

    /// The title if present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// A section after its content has been parsed into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSection {
    /// 1-based position in the document
    pub index: usize,

    /// Section title as supplied
    pub title: Option<String>,

    /// Parsed content
    pub blocks: Vec<Block>,
}

impl FlowSection {
    /// Title if present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Title for display, `"Untitled"` when missing.
    pub fn display_title(&self) -> &str {
        self.title().unwrap_or(UNTITLED)
    }

    /// Enumerated title, e.g. `"2. Results"`.
    pub fn numbered_title(&self) -> String {
        format!("{}. {}", self.index, self.display_title())
    }

    /// The section heading block.
    pub fn heading(&self) -> Block {
        Block::heading(self.numbered_title(), 1)
    }

    /// Check if the section has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
