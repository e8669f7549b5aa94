//! Text box shapes for generated slides.

use crate::error::Result;
use crate::package::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Convert inches to EMU.
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Bullet indentation: `(marL, indent)` in EMU for levels 0 and 1.
const BULLET_INDENTS: [(i64, i64); 2] = [(342_900, -342_900), (742_950, -285_750)];

/// One paragraph inside a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParagraph {
    pub text: String,
    pub size_pt: u32,
    pub bold: bool,
    pub align: TextAlign,
    /// Bullet level, `None` for an unbulleted paragraph
    pub bullet_level: Option<u8>,
}

impl TextParagraph {
    /// Plain paragraph.
    pub fn plain(text: impl Into<String>, size_pt: u32) -> Self {
        Self {
            text: text.into(),
            size_pt,
            bold: false,
            align: TextAlign::Left,
            bullet_level: None,
        }
    }

    /// Bulleted paragraph at the given level.
    pub fn bullet(text: impl Into<String>, level: u8, size_pt: u32) -> Self {
        Self {
            bullet_level: Some(level.min(1)),
            ..Self::plain(text, size_pt)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// A positioned text box.
#[derive(Debug, Clone)]
pub struct TextBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub paragraphs: Vec<TextParagraph>,
}

impl TextBox {
    /// Create an empty text box; all coordinates in EMU.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            paragraphs: Vec::new(),
        }
    }

    pub fn push(&mut self, paragraph: TextParagraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn with(mut self, paragraph: TextParagraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    /// Write the `<p:sp>` element.
    pub fn to_xml(&self, xml: &mut String, shape_id: u32, font: &str) -> Result<()> {
        xml.push_str("<p:sp><p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
            shape_id,
            shape_id.saturating_sub(1)
        )?;
        xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

        xml.push_str("<p:spPr><a:xfrm>");
        write!(xml, r#"<a:off x="{}" y="{}"/>"#, self.x, self.y)?;
        write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, self.width, self.height)?;
        xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

        xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr><a:lstStyle/>"#);
        if self.paragraphs.is_empty() {
            xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        }
        let font = escape_xml(font);
        for paragraph in &self.paragraphs {
            write_paragraph(xml, paragraph, &font)?;
        }
        xml.push_str("</p:txBody></p:sp>");
        Ok(())
    }
}

fn write_paragraph(xml: &mut String, p: &TextParagraph, font: &str) -> Result<()> {
    xml.push_str("<a:p>");
    match p.bullet_level {
        Some(level) => {
            let (mar_l, indent) = BULLET_INDENTS[usize::from(level.min(1))];
            write!(
                xml,
                r#"<a:pPr marL="{}" lvl="{}" indent="{}">"#,
                mar_l, level, indent
            )?;
            xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="•"/></a:pPr>"#);
        }
        None => {
            let algn = match p.align {
                TextAlign::Left => "l",
                TextAlign::Center => "ctr",
            };
            write!(xml, r#"<a:pPr algn="{}"><a:buNone/></a:pPr>"#, algn)?;
        }
    }

    xml.push_str("<a:r>");
    write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, p.size_pt * 100)?;
    if p.bold {
        xml.push_str(r#" b="1""#);
    }
    xml.push_str(r#" dirty="0">"#);
    write!(xml, r#"<a:latin typeface="{0}"/><a:cs typeface="{0}"/>"#, font)?;
    xml.push_str("</a:rPr>");
    write!(xml, "<a:t>{}</a:t>", escape_xml(&p.text))?;
    xml.push_str("</a:r></a:p>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches() {
        assert_eq!(inches(10.0), 9_144_000);
        assert_eq!(inches(7.5), 6_858_000);
        assert_eq!(inches(0.5), 457_200);
    }

    #[test]
    fn test_bullet_paragraph_xml() {
        let tb = TextBox::new(0, 0, 10, 10).with(TextParagraph::bullet("nested", 1, 18));
        let mut xml = String::new();
        tb.to_xml(&mut xml, 3, "Calibri").unwrap();

        assert!(xml.contains(r#"<a:pPr marL="742950" lvl="1" indent="-285750">"#));
        assert!(xml.contains(r#"sz="1800""#));
        assert!(xml.contains("<a:t>nested</a:t>"));
        assert!(xml.contains(r#"<p:cNvPr id="3" name="TextBox 2"/>"#));
    }

    #[test]
    fn test_centered_bold_title() {
        let tb = TextBox::new(0, 0, 10, 10).with(TextParagraph::plain("Deck", 54).bold().centered());
        let mut xml = String::new();
        tb.to_xml(&mut xml, 2, "Arial").unwrap();

        assert!(xml.contains(r#"<a:pPr algn="ctr"><a:buNone/></a:pPr>"#));
        assert!(xml.contains(r#"sz="5400" b="1""#));
        assert!(xml.contains(r#"<a:latin typeface="Arial"/>"#));
    }

    #[test]
    fn test_empty_box_has_paragraph() {
        let mut xml = String::new();
        TextBox::new(0, 0, 1, 1).to_xml(&mut xml, 2, "Calibri").unwrap();
        assert!(xml.contains("<a:endParaRPr"));
    }
}
