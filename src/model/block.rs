//! Block-level content types.

use serde::{Deserialize, Serialize};

/// Deepest bullet nesting level recognized in section content.
pub const MAX_BULLET_LEVEL: u8 = 1;

/// One normalized unit of section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1 = section title)
    Heading {
        /// Heading text
        text: String,
        /// Heading level, starting at 1
        level: u8,
    },

    /// Plain flowing text
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// A bulleted list item
    BulletItem {
        /// Item text without the marker
        text: String,
        /// Nesting level (0 or 1)
        level: u8,
    },
}

impl Block {
    /// Create a heading block. Level 0 is raised to 1.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Block::Heading {
            text: text.into(),
            level: level.max(1),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a bullet item. Levels past the deepest tier fold into it.
    pub fn bullet(text: impl Into<String>, level: u8) -> Self {
        Block::BulletItem {
            text: text.into(),
            level: level.min(MAX_BULLET_LEVEL),
        }
    }

    /// Text payload of the block.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::BulletItem { text, .. } => text,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a bullet item.
    pub fn is_bullet(&self) -> bool {
        matches!(self, Block::BulletItem { .. })
    }

    /// Indent level used by list-style renderers.
    ///
    /// Paragraphs and headings sit at level 0.
    pub fn list_level(&self) -> u8 {
        match self {
            Block::BulletItem { level, .. } => *level,
            _ => 0,
        }
    }
}
