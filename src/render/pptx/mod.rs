//! PowerPoint (`.pptx`) rendering.
//!
//! A deck is a title slide followed by one content slide per section.
//! Every block becomes a bulleted paragraph on its section's slide; plain
//! paragraphs sit at the top bullet level because the slide body has no
//! unbulleted paragraph style.

mod shape;
mod template;

pub use shape::{inches, TextAlign, TextBox, TextParagraph, EMU_PER_INCH};

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::Result;
use crate::model::{FlowDocument, FlowSection, SectionInput};
use crate::package::constants::{content_type as ct, relationship_type as rt};
use crate::package::{CoreProperties, OpcPackage, Relationships};

use super::StyleConfig;

/// Slide width: 10in.
pub const SLIDE_WIDTH: i64 = 9_144_000;
/// Slide height: 7.5in.
pub const SLIDE_HEIGHT: i64 = 6_858_000;

const TITLE_SIZE: u32 = 54;
const SUBTITLE_SIZE: u32 = 24;
const HEADING_SIZE: u32 = 40;
/// Body font sizes for bullet levels 0 and 1.
const BODY_SIZES: [u32; 2] = [20, 18];

/// A single slide's shapes.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    pub shapes: Vec<TextBox>,
}

impl Slide {
    fn to_xml(&self, font: &str) -> Result<String> {
        let mut xml = template::slide_open();
        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(template::SP_TREE_HEADER);
        for (i, shape) in self.shapes.iter().enumerate() {
            // id 1 is the group shape
            shape.to_xml(&mut xml, i as u32 + 2, font)?;
        }
        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str(template::SLIDE_CLOSE);
        Ok(xml)
    }
}

/// Renders a flow document into a `.pptx` package.
#[derive(Debug, Clone)]
pub struct SlideRenderer {
    style: StyleConfig,
    generated_at: DateTime<Utc>,
}

impl SlideRenderer {
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

    /// Subtitle line on the title slide, e.g. `Generated: March 01, 2024`.
    pub fn generated_line(&self) -> String {
        format!("Generated: {}", self.generated_at.format("%B %d, %Y"))
    }

    /// Lay out all slides without serializing them.
    pub fn build_slides(&self, doc: &FlowDocument, slide_titles: Option<&[String]>) -> Vec<Slide> {
        let mut slides = Vec::with_capacity(doc.section_count() + 1);
        slides.push(self.title_slide(&doc.title));

        for (idx, section) in doc.sections.iter().enumerate() {
            let heading = slide_heading(section, idx, slide_titles);
            slides.push(self.content_slide(heading, section));
        }
        slides
    }

    /// Render parsed content to pptx bytes.
    pub fn render(&self, doc: &FlowDocument, slide_titles: Option<&[String]>) -> Result<Vec<u8>> {
        self.style.validate()?;

        let slides = self.build_slides(doc, slide_titles);
        debug!("pptx deck: {} slides", slides.len());

        let mut package = OpcPackage::new();
        package.add_package_rel(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");

        let mut pres_rels = Relationships::new();
        pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");

        let mut slide_parts = Vec::with_capacity(slides.len());
        let mut slide_rel_ids = Vec::with_capacity(slides.len());
        for (i, slide) in slides.iter().enumerate() {
            let name = format!("slides/slide{}.xml", i + 1);
            slide_rel_ids.push(pres_rels.add(rt::SLIDE, name.as_str()));
            slide_parts.push((format!("ppt/{}", name), slide.to_xml(&self.style.font)?));
        }

        package.add_part(
            "ppt/presentation.xml",
            ct::PML_PRESENTATION_MAIN,
            template::presentation_xml(&slide_rel_ids, SLIDE_WIDTH, SLIDE_HEIGHT),
        );
        package.set_part_rels("ppt/presentation.xml", pres_rels);

        package.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            ct::PML_SLIDE_MASTER,
            template::slide_master_xml(),
        );
        let mut master_rels = Relationships::new();
        master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rt::THEME, "../theme/theme1.xml");
        package.set_part_rels("ppt/slideMasters/slideMaster1.xml", master_rels);

        package.add_part(
            "ppt/slideLayouts/slideLayout1.xml",
            ct::PML_SLIDE_LAYOUT,
            template::slide_layout_xml(),
        );
        let mut layout_rels = Relationships::new();
        layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        package.set_part_rels("ppt/slideLayouts/slideLayout1.xml", layout_rels);

        package.add_part("ppt/theme/theme1.xml", ct::OFC_THEME, template::theme_xml());

        for (name, xml) in slide_parts {
            let mut rels = Relationships::new();
            rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
            package.set_part_rels(name.as_str(), rels);
            package.add_part(name, ct::PML_SLIDE, xml);
        }

        CoreProperties::new(doc.title.as_str(), self.generated_at).write_to(&mut package)?;

        package.to_bytes()
    }

    fn title_slide(&self, title: &str) -> Slide {
        let title_box = TextBox::new(inches(0.5), inches(2.5), inches(9.0), inches(2.0))
            .with(TextParagraph::plain(title, TITLE_SIZE).bold().centered());
        let subtitle_box = TextBox::new(inches(0.5), inches(4.5), inches(9.0), inches(1.0))
            .with(TextParagraph::plain(self.generated_line(), SUBTITLE_SIZE).centered());

        Slide {
            shapes: vec![title_box, subtitle_box],
        }
    }

    fn content_slide(&self, heading: String, section: &FlowSection) -> Slide {
        let heading_box = TextBox::new(inches(0.5), inches(0.5), inches(9.0), inches(1.0))
            .with(TextParagraph::plain(heading, HEADING_SIZE).bold());

        let mut body = TextBox::new(inches(0.5), inches(1.5), inches(9.0), inches(5.5));
        for block in &section.blocks {
            let level = block.list_level().min(1);
            body.push(TextParagraph::bullet(
                block.text(),
                level,
                BODY_SIZES[usize::from(level)],
            ));
        }

        Slide {
            shapes: vec![heading_box, body],
        }
    }
}

/// Pick the heading for the content slide at `idx` (0-based).
///
/// Order: the caller's slide title at that position, then the section
/// title, then `"Slide {n}"`.
pub fn slide_heading(section: &FlowSection, idx: usize, slide_titles: Option<&[String]>) -> String {
    slide_titles
        .and_then(|titles| titles.get(idx))
        .map(String::clone)
        .or_else(|| section.title().map(str::to_string))
        .unwrap_or_else(|| format!("Slide {}", idx + 1))
}

/// Render sections to pptx bytes, stamped with the current time.
pub fn render_pptx(
    title: &str,
    sections: &[SectionInput],
    slide_titles: Option<&[String]>,
    style: &StyleConfig,
) -> Result<Vec<u8>> {
    let doc = FlowDocument::from_sections(title, sections);
    SlideRenderer::new(style.clone()).render(&doc, slide_titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn renderer() -> SlideRenderer {
        SlideRenderer::new(StyleConfig::default())
            .at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_generated_line() {
        assert_eq!(renderer().generated_line(), "Generated: March 01, 2024");
    }

    #[test]
    fn test_empty_document_is_title_slide_only() {
        let doc = FlowDocument::from_sections("Deck", &[]);
        let slides = renderer().build_slides(&doc, None);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].shapes[0].paragraphs[0].text, "Deck");
    }

    #[test]
    fn test_slide_heading_fallbacks() {
        let doc = FlowDocument::from_sections(
            "Deck",
            &[
                SectionInput::new("First", ""),
                SectionInput::new("Second", ""),
                SectionInput::untitled(""),
            ],
        );
        let titles = vec!["Opening".to_string()];

        assert_eq!(slide_heading(&doc.sections[0], 0, Some(&titles)), "Opening");
        assert_eq!(slide_heading(&doc.sections[1], 1, Some(&titles)), "Second");
        assert_eq!(slide_heading(&doc.sections[2], 2, Some(&titles)), "Slide 3");
        assert_eq!(slide_heading(&doc.sections[2], 2, None), "Slide 3");
    }

    #[test]
    fn test_paragraphs_render_as_top_level_bullets() {
        let doc = FlowDocument::from_sections(
            "Deck",
            &[SectionInput::new("S", "Intro text\n- First\n  - Nested")],
        );
        let slides = renderer().build_slides(&doc, None);
        let body = &slides[1].shapes[1].paragraphs;

        assert_eq!(body.len(), 3);
        assert_eq!(body[0], TextParagraph::bullet("Intro text", 0, 20));
        assert_eq!(body[1], TextParagraph::bullet("First", 0, 20));
        assert_eq!(body[2], TextParagraph::bullet("Nested", 1, 18));
    }

    #[test]
    fn test_slide_xml_shape_ids() {
        let doc = FlowDocument::from_sections("Deck", &[]);
        let slides = renderer().build_slides(&doc, None);
        let xml = slides[0].to_xml("Calibri").unwrap();
        assert!(xml.contains(r#"<p:cNvPr id="2""#));
        assert!(xml.contains(r#"<p:cNvPr id="3""#));
    }
}
