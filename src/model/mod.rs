//! Flow-document model for export content.
//!
//! This module defines the intermediate representation that bridges
//! section parsing and binary rendering. The model is format-agnostic:
//! both the Word and slide renderers consume the same block sequence.

mod block;
mod document;
mod section;

pub use block::{Block, MAX_BULLET_LEVEL};
pub use document::FlowDocument;
pub use section::{FlowSection, SectionInput, UNTITLED};
