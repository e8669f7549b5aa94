//! Integration tests for the Word and slide renderers.

use std::io::{Cursor, Read};

use chrono::{TimeZone, Utc};
use docexport::model::{FlowDocument, SectionInput};
use docexport::render::{render_docx, render_pptx, SlideRenderer, StyleConfig, WordRenderer};
use zip::ZipArchive;

fn open(bytes: &[u8]) -> ZipArchive<Cursor<&[u8]>> {
    ZipArchive::new(Cursor::new(bytes)).unwrap()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = open(bytes);
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = open(bytes);
    archive.file_names().map(str::to_string).collect()
}

fn sample_sections() -> Vec<SectionInput> {
    vec![
        SectionInput::new("Background", "Why we started.\n- Market gap\n  - Small teams"),
        SectionInput::new("Plan", "- Build\n- Ship"),
        SectionInput::untitled("Closing thoughts & <notes>"),
    ]
}

#[test]
fn test_docx_is_zip() {
    let bytes = render_docx("Report", &sample_sections(), &StyleConfig::default()).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_docx_parts() {
    let bytes = render_docx("Report", &sample_sections(), &StyleConfig::default()).unwrap();
    let names = part_names(&bytes);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "word/numbering.xml",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(names.iter().any(|n| n == part), "missing {}", part);
    }
}

#[test]
fn test_docx_toc_lists_every_section() {
    let bytes = render_docx("Report", &sample_sections(), &StyleConfig::default()).unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    assert!(xml.contains("Table of Contents"));
    for line in ["1. Background", "2. Plan", "3. Untitled"] {
        // once in the table of contents, once as the section heading
        assert_eq!(xml.matches(line).count(), 2, "{}", line);
    }
    assert!(xml.contains("Closing thoughts &amp; &lt;notes&gt;"));
}

#[test]
fn test_docx_blank_title_is_untitled() {
    let sections = vec![
        SectionInput::new("", "Body without a heading."),
        SectionInput::new("   ", "- still untitled"),
    ];
    let bytes = render_docx("Report", &sections, &StyleConfig::default()).unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    for line in ["1. Untitled", "2. Untitled"] {
        assert_eq!(xml.matches(line).count(), 2, "{}", line);
    }
    assert!(!xml.contains("<w:t>1. </w:t>"));
    assert!(!xml.contains(r#"<w:t xml:space="preserve">1. </w:t>"#));

    let bytes = render_pptx("Deck", &sections, None, &StyleConfig::default()).unwrap();
    assert!(read_part(&bytes, "ppt/slides/slide2.xml").contains("<a:t>Slide 1</a:t>"));
}

#[test]
fn test_docx_empty_sections() {
    let bytes = render_docx("Empty", &[], &StyleConfig::default()).unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    assert!(xml.contains("Empty"));
    assert!(xml.contains("Table of Contents"));
    assert!(!xml.contains(r#"<w:br w:type="page"/>"#));
}

#[test]
fn test_docx_style_applied() {
    let style = StyleConfig::default()
        .with_font("Georgia")
        .with_font_size(11)
        .with_line_spacing(1.5);
    let bytes = render_docx("Styled", &sample_sections(), &style).unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    assert!(xml.contains(r#"w:ascii="Georgia""#));
    assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
    assert!(xml.contains(r#"w:line="360""#));
}

#[test]
fn test_docx_fixed_clock_is_deterministic() {
    let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let doc = FlowDocument::from_sections("Report", &sample_sections());
    let a = WordRenderer::new(StyleConfig::default()).at(at).render(&doc).unwrap();
    let b = WordRenderer::new(StyleConfig::default()).at(at).render(&doc).unwrap();
    assert_eq!(a, b);

    let xml = read_part(&a, "word/document.xml");
    assert!(xml.contains("Generated: 2024-05-06 07:08:09"));
}

#[test]
fn test_pptx_is_zip_with_slide_per_section() {
    let bytes = render_pptx("Deck", &sample_sections(), None, &StyleConfig::default()).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let names = part_names(&bytes);
    let slides = names
        .iter()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count();
    assert_eq!(slides, 4);
    for part in [
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/_rels/slide1.xml.rels",
    ] {
        assert!(names.iter().any(|n| n == part), "missing {}", part);
    }
}

#[test]
fn test_pptx_empty_sections_single_slide() {
    let bytes = render_pptx("Deck", &[], None, &StyleConfig::default()).unwrap();
    let names = part_names(&bytes);
    assert!(names.iter().any(|n| n == "ppt/slides/slide1.xml"));
    assert!(!names.iter().any(|n| n == "ppt/slides/slide2.xml"));

    let pres = read_part(&bytes, "ppt/presentation.xml");
    assert_eq!(pres.matches("<p:sldId ").count(), 1);
}

#[test]
fn test_pptx_slide_titles_override() {
    let titles = vec!["Why".to_string(), "How".to_string()];
    let bytes =
        render_pptx("Deck", &sample_sections(), Some(&titles), &StyleConfig::default()).unwrap();

    assert!(read_part(&bytes, "ppt/slides/slide2.xml").contains("<a:t>Why</a:t>"));
    assert!(read_part(&bytes, "ppt/slides/slide3.xml").contains("<a:t>How</a:t>"));
    // out of range and untitled
    assert!(read_part(&bytes, "ppt/slides/slide4.xml").contains("<a:t>Slide 3</a:t>"));
}

#[test]
fn test_pptx_bullet_levels_and_font() {
    let style = StyleConfig::default().with_font("Verdana");
    let bytes = render_pptx("Deck", &sample_sections(), None, &style).unwrap();
    let slide = read_part(&bytes, "ppt/slides/slide2.xml");

    assert!(slide.contains("<a:t>Background</a:t>"));
    assert_eq!(slide.matches(r#"lvl="0""#).count(), 2);
    assert_eq!(slide.matches(r#"lvl="1""#).count(), 1);
    assert!(slide.contains(r#"<a:latin typeface="Verdana"/>"#));
    assert!(!slide.contains("Calibri"));
}

#[test]
fn test_pptx_title_slide() {
    let at = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
    let doc = FlowDocument::from_sections("Holiday Plan", &[]);
    let bytes = SlideRenderer::new(StyleConfig::default())
        .at(at)
        .render(&doc, None)
        .unwrap();
    let slide = read_part(&bytes, "ppt/slides/slide1.xml");

    assert!(slide.contains("<a:t>Holiday Plan</a:t>"));
    assert!(slide.contains("<a:t>Generated: December 25, 2024</a:t>"));
    assert!(slide.contains(r#"sz="5400" b="1""#));
}

#[test]
fn test_invalid_style_fails_both_renderers() {
    let style = StyleConfig::default().with_font("");
    assert!(render_docx("x", &[], &style).is_err());
    assert!(render_pptx("x", &[], None, &style).is_err());
}
