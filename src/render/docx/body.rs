//! WordprocessingML body writer.

use crate::error::Result;
use crate::package::xml::escape_xml;
use crate::render::StyleConfig;
use std::fmt::Write as FmtWrite;

/// Paragraph style IDs defined in `styles.xml`.
pub(super) const STYLE_TITLE: &str = "Title";
pub(super) const STYLE_HEADING1: &str = "Heading1";
pub(super) const STYLE_LIST_BULLET: &str = "ListBullet";

/// Numbering instance used for bullet paragraphs.
pub(super) const BULLET_NUM_ID: u32 = 1;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Align {
    Left,
    Center,
}

impl Align {
    fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
        }
    }
}

/// Paragraph properties used by the exporter.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct ParaProps<'a> {
    pub style: Option<&'a str>,
    pub bullet: bool,
    pub line_twips: Option<u32>,
    pub align: Option<Align>,
}

/// Run formatting.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct RunProps<'a> {
    pub font: Option<&'a str>,
    pub half_points: Option<u32>,
    pub italic: bool,
}

impl<'a> RunProps<'a> {
    /// Body text formatting from the style config.
    pub fn body(style: &'a StyleConfig) -> Self {
        Self {
            font: Some(&style.font),
            half_points: Some(style.half_points()),
            italic: false,
        }
    }
}

/// Accumulates `<w:body>` content.
#[derive(Debug, Default)]
pub(super) struct BodyWriter {
    xml: String,
    paragraphs: usize,
    page_breaks: usize,
}

impl BodyWriter {
    pub fn new() -> Self {
        Self {
            xml: String::with_capacity(8192),
            paragraphs: 0,
            page_breaks: 0,
        }
    }

    /// Paragraph with a single run of text.
    pub fn paragraph(&mut self, props: ParaProps<'_>, run: RunProps<'_>, text: &str) -> Result<()> {
        self.lines(props, run, &[text])
    }

    /// Paragraph with one run whose lines are separated by line breaks.
    pub fn lines<S: AsRef<str>>(
        &mut self,
        props: ParaProps<'_>,
        run: RunProps<'_>,
        lines: &[S],
    ) -> Result<()> {
        self.xml.push_str("<w:p>");
        self.write_ppr(props)?;
        if !lines.is_empty() {
            self.xml.push_str("<w:r>");
            self.write_rpr(run)?;
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    self.xml.push_str("<w:br/>");
                }
                write!(
                    self.xml,
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape_xml(line.as_ref())
                )?;
            }
            self.xml.push_str("</w:r>");
        }
        self.xml.push_str("</w:p>");
        self.paragraphs += 1;
        Ok(())
    }

    /// An empty paragraph.
    pub fn blank(&mut self) {
        self.xml.push_str("<w:p/>");
        self.paragraphs += 1;
    }

    /// A paragraph holding only a page break.
    pub fn page_break(&mut self) {
        self.xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
        self.paragraphs += 1;
        self.page_breaks += 1;
    }

    pub fn page_breaks(&self) -> usize {
        self.page_breaks
    }

    pub fn paragraphs(&self) -> usize {
        self.paragraphs
    }

    /// Wrap the body into a complete `word/document.xml`.
    pub fn finish(self) -> String {
        let mut xml = String::with_capacity(self.xml.len() + 1024);
        xml.push_str(crate::package::xml::XML_DECLARATION);
        xml.push_str(concat!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
            r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#
        ));
        xml.push_str("<w:body>");
        xml.push_str(&self.xml);
        // US Letter with 1in margins
        xml.push_str(concat!(
            r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
            r#"</w:sectPr>"#
        ));
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn write_ppr(&mut self, props: ParaProps<'_>) -> Result<()> {
        if props.style.is_none() && !props.bullet && props.line_twips.is_none() && props.align.is_none()
        {
            return Ok(());
        }

        self.xml.push_str("<w:pPr>");
        if let Some(style) = props.style {
            write!(self.xml, r#"<w:pStyle w:val="{}"/>"#, escape_xml(style))?;
        }
        if props.bullet {
            write!(
                self.xml,
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                BULLET_NUM_ID
            )?;
        }
        if let Some(line) = props.line_twips {
            write!(self.xml, r#"<w:spacing w:line="{}" w:lineRule="auto"/>"#, line)?;
        }
        if let Some(align) = props.align {
            write!(self.xml, r#"<w:jc w:val="{}"/>"#, align.as_str())?;
        }
        self.xml.push_str("</w:pPr>");
        Ok(())
    }

    fn write_rpr(&mut self, run: RunProps<'_>) -> Result<()> {
        if run.font.is_none() && run.half_points.is_none() && !run.italic {
            return Ok(());
        }

        self.xml.push_str("<w:rPr>");
        if let Some(font) = run.font {
            let font = escape_xml(font);
            write!(
                self.xml,
                r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
                font
            )?;
        }
        if run.italic {
            self.xml.push_str("<w:i/>");
        }
        if let Some(size) = run.half_points {
            write!(self.xml, r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#, size)?;
        }
        self.xml.push_str("</w:rPr>");
        Ok(())
    }
}
