//! Document-level types.

use super::{Block, FlowSection, SectionInput};
use serde::{Deserialize, Serialize};

/// An export-ready document: a title plus parsed sections in caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Project title
    pub title: String,

    /// Sections in caller-supplied order
    pub sections: Vec<FlowSection>,
}

impl FlowDocument {
    /// Create a new empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Parse every section's content and number the sections from 1.
    pub fn from_sections(title: impl Into<String>, sections: &[SectionInput]) -> Self {
        let mut doc = Self::new(title);
        for section in sections {
            doc.add_section(section.title.clone(), crate::parser::parse(&section.content));
        }
        doc
    }

    /// Append a section, assigning the next index.
    pub fn add_section(&mut self, title: Option<String>, blocks: Vec<Block>) {
        let index = self.sections.len() + 1;
        self.sections.push(FlowSection {
            index,
            title,
            blocks,
        });
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of content blocks across all sections.
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Table of contents lines, `"{i}. {title}"` per section.
    pub fn table_of_contents(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.numbered_title()).collect()
    }

    /// The whole document as one block sequence: each section heading
    /// followed by its content.
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(self.block_count() + self.sections.len());
        for section in &self.sections {
            blocks.push(section.heading());
            blocks.extend(section.blocks.iter().cloned());
        }
        blocks
    }
}
