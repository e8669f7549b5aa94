//! Export coordination: format dispatch, rendering and persistence.
//!
//! # Example
//!
//! ```no_run
//! use docexport::export::{ExportRequest, Exporter};
//! use docexport::{ExportSettings, SectionInput};
//!
//! fn main() -> docexport::Result<()> {
//!     let request = ExportRequest::new("doc-42", "DOCX")
//!         .with_project_title("Quarterly Report")
//!         .with_sections(vec![SectionInput::new("Summary", "Revenue grew.\n- Q1\n- Q2")]);
//!
//!     let exporter = Exporter::new(ExportSettings::default());
//!     let report = exporter.export_and_save(&request)?;
//!     println!("{} ({} bytes)", report.path.display(), report.file_size_bytes);
//!     Ok(())
//! }
//! ```

mod save;

pub use save::save_export;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ExportSettings;
use crate::error::{Error, Result};
use crate::model::{FlowDocument, SectionInput};
use crate::render::{SlideRenderer, StyleConfig, WordRenderer};

/// Title used when a request carries none.
pub const DEFAULT_PROJECT_TITLE: &str = "Document";

/// Status recorded for a completed export.
pub const STATUS_SUCCESS: &str = "success";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Word document
    Docx,
    /// PowerPoint presentation
    Pptx,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pptx => "pptx",
        }
    }

    /// MIME type of the rendered artifact.
    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Case-insensitive exact match; padded names are rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "docx" => Ok(ExportFormat::Docx),
            "pptx" => Ok(ExportFormat::Pptx),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn default_project_title() -> String {
    DEFAULT_PROJECT_TITLE.to_string()
}

/// Everything needed to export one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Identifier used in the saved file name
    pub document_id: String,

    /// Requested format, e.g. `"docx"` or `"PPTX"`
    pub format: String,

    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<SectionInput>,

    /// Style option map (`font`, `font_size`, `line_spacing`)
    #[serde(default)]
    pub options: Map<String, Value>,

    /// Document title
    #[serde(default = "default_project_title")]
    pub project_title: String,

    /// Slide headings by section position; slides only
    #[serde(default)]
    pub slide_titles: Option<Vec<String>>,
}

impl ExportRequest {
    pub fn new(document_id: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            format: format.into(),
            sections: Vec::new(),
            options: Map::new(),
            project_title: default_project_title(),
            slide_titles: None,
        }
    }

    pub fn with_sections(mut self, sections: Vec<SectionInput>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_project_title(mut self, title: impl Into<String>) -> Self {
        self.project_title = title.into();
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    pub fn with_slide_titles(mut self, titles: Vec<String>) -> Self {
        self.slide_titles = Some(titles);
        self
    }
}

/// A rendered document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub document_id: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    /// Suggested download name, `{document_id}.{ext}`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.document_id, self.format.extension())
    }
}

/// Record of a saved export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub document_id: String,
    pub format: ExportFormat,
    pub file_size_bytes: u64,
    pub path: PathBuf,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Renders export requests and saves the results.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    settings: ExportSettings,
    clock: Option<DateTime<Utc>>,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            clock: None,
        }
    }

    /// Use a fixed time for generation stamps and file names.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }

    /// Render a request to bytes in the requested format.
    pub fn export_document(&self, request: &ExportRequest) -> Result<ExportArtifact> {
        let format: ExportFormat = request.format.parse()?;
        let style = StyleConfig::from_options(&request.options)?;
        let doc = FlowDocument::from_sections(request.project_title.as_str(), &request.sections);
        debug!(
            "exporting {} as {}: {} sections, {} blocks",
            request.document_id,
            format,
            doc.section_count(),
            doc.block_count()
        );

        let now = self.now();
        let bytes = match format {
            ExportFormat::Docx => WordRenderer::new(style).at(now).render(&doc)?,
            ExportFormat::Pptx => SlideRenderer::new(style)
                .at(now)
                .render(&doc, request.slide_titles.as_deref())?,
        };

        Ok(ExportArtifact {
            document_id: request.document_id.clone(),
            format,
            bytes,
        })
    }

    /// Render a request and save it under the configured export directory.
    pub fn export_and_save(&self, request: &ExportRequest) -> Result<ExportReport> {
        let artifact = self.export_document(request)?;
        self.save_artifact(artifact)
    }

    /// Save an already rendered artifact, enforcing the size limit first.
    pub fn save_artifact(&self, artifact: ExportArtifact) -> Result<ExportReport> {
        let size = artifact.len() as u64;
        if let Some(limit) = self.settings.max_file_size_bytes() {
            if size > limit {
                return Err(Error::TooLarge { size, limit });
            }
        }

        let created_at = self.now();
        let path = save::save_export_at(
            &artifact.bytes,
            &artifact.document_id,
            artifact.format,
            &self.settings.export_dir,
            created_at,
        )?;
        info!("export {} complete: {} bytes", artifact.document_id, size);

        Ok(ExportReport {
            document_id: artifact.document_id,
            format: artifact.format,
            file_size_bytes: size,
            path,
            status: STATUS_SUCCESS.to_string(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_case_insensitive() {
        assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("PpTx".parse::<ExportFormat>().unwrap(), ExportFormat::Pptx);
    }

    #[test]
    fn test_format_parse_rejects_padding() {
        for padded in [" pptx ", "docx\n", "\tDOCX"] {
            let err = padded.parse::<ExportFormat>().unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == padded));
        }
    }

    #[test]
    fn test_format_parse_rejects_unknown() {
        let err = "xlsx".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == "xlsx"));
        assert!("".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_media_types() {
        assert!(ExportFormat::Docx.media_type().ends_with("wordprocessingml.document"));
        assert!(ExportFormat::Pptx.media_type().ends_with("presentationml.presentation"));
    }

    #[test]
    fn test_request_defaults_from_json() {
        let request: ExportRequest =
            serde_json::from_str(r#"{"document_id": "d1", "format": "docx"}"#).unwrap();
        assert_eq!(request.project_title, "Document");
        assert!(request.sections.is_empty());
        assert!(request.slide_titles.is_none());
    }

    #[test]
    fn test_unsupported_format_renders_nothing() {
        let exporter = Exporter::default();
        let request = ExportRequest::new("d1", "pdf");
        assert!(matches!(
            exporter.export_document(&request),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_invalid_style_option() {
        let mut options = Map::new();
        options.insert("font_size".into(), Value::from("large"));
        let request = ExportRequest::new("d1", "docx").with_options(options);
        assert!(matches!(
            Exporter::default().export_document(&request),
            Err(Error::InvalidStyle(_))
        ));
    }

    #[test]
    fn test_artifact_file_name() {
        let artifact = ExportArtifact {
            document_id: "abc".into(),
            format: ExportFormat::Pptx,
            bytes: vec![1, 2, 3],
        };
        assert_eq!(artifact.file_name(), "abc.pptx");
        assert_eq!(artifact.len(), 3);
    }
}
