//! # docexport
//!
//! Export pipeline for generated documents.
//!
//! Section records (`{title, content}`) are parsed into a flow of blocks,
//! rendered into a Word (`.docx`) or PowerPoint (`.pptx`) binary, and
//! saved to a timestamped file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docexport::{export_document, save_export, ExportFormat, SectionInput};
//! use serde_json::Map;
//!
//! fn main() -> docexport::Result<()> {
//!     let sections = vec![
//!         SectionInput::new("Overview", "Plain paragraph\n- bullet\n  - nested bullet"),
//!         SectionInput::new("Next Steps", "- ship it"),
//!     ];
//!
//!     let bytes = export_document(&sections, "pptx", &Map::new(), "Launch Plan", None)?;
//!     let path = save_export(&bytes, "doc-1", ExportFormat::Pptx, "./exports")?;
//!     println!("saved {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Content format
//!
//! - blank lines are dropped
//! - lines starting with `- ` or `• ` are bullets
//! - bullets indented by two or more columns are nested one level
//! - anything else is a paragraph

pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod model;
pub mod package;
pub mod parser;
pub mod render;

pub use config::ExportSettings;
pub use error::{Error, Result};
pub use export::{ExportArtifact, ExportFormat, ExportReport, ExportRequest, Exporter};
pub use model::{Block, FlowDocument, FlowSection, SectionInput};
pub use parser::parse;
pub use render::{render_docx, render_pptx, StyleConfig};

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Render sections in the named format (`"docx"` or `"pptx"`, any case).
///
/// `options` is the style option map; `slide_titles` only affects slides.
pub fn export_document(
    sections: &[SectionInput],
    format: &str,
    options: &Map<String, Value>,
    project_title: &str,
    slide_titles: Option<&[String]>,
) -> Result<Vec<u8>> {
    let request = ExportRequest {
        document_id: String::new(),
        format: format.to_string(),
        sections: sections.to_vec(),
        options: options.clone(),
        project_title: project_title.to_string(),
        slide_titles: slide_titles.map(<[String]>::to_vec),
    };
    Exporter::default()
        .export_document(&request)
        .map(|artifact| artifact.bytes)
}

/// Save rendered bytes under `target_dir` with a unique timestamped name.
pub fn save_export(
    bytes: &[u8],
    document_id: &str,
    format: ExportFormat,
    target_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    export::save_export(bytes, document_id, format, target_dir)
}
