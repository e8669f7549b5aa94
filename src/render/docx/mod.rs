//! Word (`.docx`) rendering.
//!
//! The document is laid out as: centered title, italic generation stamp,
//! a table of contents, then one heading plus body per section with page
//! breaks between sections. The whole package is built in memory and
//! serialized at once.

mod body;
mod template;

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::Result;
use crate::model::{Block, FlowDocument, SectionInput};
use crate::package::constants::{content_type as ct, relationship_type as rt};
use crate::package::{CoreProperties, OpcPackage, Relationships};

use super::StyleConfig;
use body::{Align, BodyWriter, ParaProps, RunProps, STYLE_HEADING1, STYLE_LIST_BULLET, STYLE_TITLE};

/// Heading placed above the table of contents.
const TOC_HEADING: &str = "Table of Contents";

/// Renders a flow document into a `.docx` package.
#[derive(Debug, Clone)]
pub struct WordRenderer {
    style: StyleConfig,
    generated_at: DateTime<Utc>,
}

impl WordRenderer {
    /// Create a renderer stamped with the current time.
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style,
            generated_at: Utc::now(),
        }
    }

    /// Use a fixed generation time.
    pub fn at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// The generation stamp line, e.g. `Generated: 2024-03-01 12:00:00`.
    pub fn generated_line(&self) -> String {
        format!("Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))
    }

    /// Render parsed content to docx bytes.
    pub fn render(&self, doc: &FlowDocument) -> Result<Vec<u8>> {
        self.style.validate()?;

        let body = self.write_body(doc)?;
        debug!(
            "docx body: {} sections, {} paragraphs, {} page breaks",
            doc.section_count(),
            body.paragraphs(),
            body.page_breaks()
        );

        let mut package = OpcPackage::new();
        package.add_package_rel(rt::OFFICE_DOCUMENT, "word/document.xml");
        package.add_part("word/document.xml", ct::WML_DOCUMENT_MAIN, body.finish());
        package.add_part("word/styles.xml", ct::WML_STYLES, template::styles_xml(&self.style));
        package.add_part("word/numbering.xml", ct::WML_NUMBERING, template::numbering_xml());

        let mut rels = Relationships::new();
        rels.add(rt::STYLES, "styles.xml");
        rels.add(rt::NUMBERING, "numbering.xml");
        package.set_part_rels("word/document.xml", rels);

        CoreProperties::new(doc.title.as_str(), self.generated_at).write_to(&mut package)?;

        package.to_bytes()
    }

    fn write_body(&self, doc: &FlowDocument) -> Result<BodyWriter> {
        let body_run = RunProps::body(&self.style);
        let line_twips = self.style.line_twips();
        let mut body = BodyWriter::new();

        body.paragraph(
            ParaProps {
                style: Some(STYLE_TITLE),
                align: Some(Align::Center),
                ..Default::default()
            },
            RunProps::default(),
            &doc.title,
        )?;

        body.paragraph(
            ParaProps::default(),
            RunProps {
                italic: true,
                ..body_run
            },
            &self.generated_line(),
        )?;

        body.paragraph(heading_props(), RunProps::default(), TOC_HEADING)?;
        body.lines(ParaProps::default(), body_run, &doc.table_of_contents())?;

        if doc.is_empty() {
            return Ok(body);
        }
        body.page_break();

        let last = doc.section_count();
        for section in &doc.sections {
            body.paragraph(heading_props(), RunProps::default(), &section.numbered_title())?;

            for block in &section.blocks {
                match block {
                    Block::BulletItem { text, .. } => body.paragraph(
                        ParaProps {
                            style: Some(STYLE_LIST_BULLET),
                            bullet: true,
                            line_twips,
                            align: None,
                        },
                        body_run,
                        text,
                    )?,
                    Block::Paragraph { text } => body.paragraph(
                        ParaProps {
                            style: None,
                            bullet: false,
                            line_twips,
                            align: Some(Align::Left),
                        },
                        body_run,
                        text,
                    )?,
                    Block::Heading { text, .. } => {
                        body.paragraph(heading_props(), RunProps::default(), text)?
                    }
                }
            }

            if section.index < last {
                body.blank();
                body.page_break();
            }
        }

        Ok(body)
    }
}

fn heading_props() -> ParaProps<'static> {
    ParaProps {
        style: Some(STYLE_HEADING1),
        ..Default::default()
    }
}

/// Render sections to docx bytes, stamped with the current time.
pub fn render_docx(title: &str, sections: &[SectionInput], style: &StyleConfig) -> Result<Vec<u8>> {
    let doc = FlowDocument::from_sections(title, sections);
    WordRenderer::new(style.clone()).render(&doc)
}
