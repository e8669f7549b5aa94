//! Integration tests for export dispatch and persistence.

use std::fs;

use chrono::{TimeZone, Utc};
use docexport::export::{ExportRequest, Exporter};
use docexport::{save_export, Error, ExportFormat, ExportSettings, SectionInput};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn sections() -> Vec<SectionInput> {
    vec![
        SectionInput::new("Intro", "Welcome.\n- First point"),
        SectionInput::new("Details", "  - nested only"),
    ]
}

/// Pseudo-random alphanumeric lines that deflate poorly.
fn noise(len: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut out = String::with_capacity(len + len / 80);
    for i in 0..len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.push(ALPHABET[(state % ALPHABET.len() as u64) as usize] as char);
        if i % 80 == 79 {
            out.push('\n');
        }
    }
    out
}

fn fixed_exporter(dir: &TempDir) -> Exporter {
    let settings = ExportSettings::new().with_export_dir(dir.path());
    Exporter::new(settings).at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
}

#[test]
fn test_format_case_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    let exporter = fixed_exporter(&dir);

    for (lower, upper) in [("docx", "DOCX"), ("pptx", "PPTX")] {
        let a = exporter
            .export_document(&ExportRequest::new("d", lower).with_sections(sections()))
            .unwrap();
        let b = exporter
            .export_document(&ExportRequest::new("d", upper).with_sections(sections()))
            .unwrap();
        assert_eq!(a.bytes, b.bytes, "{} vs {}", lower, upper);
        assert_eq!(a.format, b.format);
    }
}

#[test]
fn test_unsupported_format() {
    let err = docexport::export_document(&sections(), "xlsx", &Map::new(), "T", None).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == "xlsx"));
    assert_eq!(err.to_string(), "Unsupported export format: xlsx");
}

#[test]
fn test_padded_format_rejected() {
    for padded in [" docx ", "pptx\n", "\tdocx"] {
        let err = docexport::export_document(&sections(), padded, &Map::new(), "T", None).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedFormat(ref f) if f == padded),
            "{:?} was accepted",
            padded
        );
    }
}

#[test]
fn test_output_starts_with_zip_magic() {
    for format in ["docx", "pptx"] {
        let bytes = docexport::export_document(&sections(), format, &Map::new(), "T", None).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}

#[test]
fn test_empty_sections_export() {
    for format in ["docx", "pptx"] {
        let bytes = docexport::export_document(&[], format, &Map::new(), "Empty", None).unwrap();
        assert!(!bytes.is_empty());
    }
}

#[test]
fn test_style_options_from_map() {
    let options: Map<String, Value> = match json!({"font": "Arial", "font_size": 14, "theme": "dark"}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    assert!(docexport::export_document(&sections(), "docx", &options, "T", None).is_ok());

    let mut bad = Map::new();
    bad.insert("line_spacing".into(), json!(-1.0));
    let err = docexport::export_document(&sections(), "docx", &bad, "T", None).unwrap_err();
    assert!(matches!(err, Error::InvalidStyle(_)));
}

#[test]
fn test_back_to_back_saves_are_distinct() {
    let dir = TempDir::new().unwrap();
    let first = vec![1u8; 100];
    let second = vec![2u8; 250];

    let a = save_export(&first, "same-id", ExportFormat::Docx, dir.path()).unwrap();
    let b = save_export(&second, "same-id", ExportFormat::Docx, dir.path()).unwrap();

    assert_ne!(a, b);
    assert_eq!(fs::metadata(&a).unwrap().len(), 100);
    assert_eq!(fs::metadata(&b).unwrap().len(), 250);
    assert_eq!(fs::read(&a).unwrap(), first);
}

#[test]
fn test_saved_file_name_layout() {
    let dir = TempDir::new().unwrap();
    let path = save_export(b"PK..", "doc-7", ExportFormat::Pptx, dir.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();

    assert!(name.starts_with("doc-7_"));
    assert!(name.ends_with(".pptx"));
    let stamp = name.trim_start_matches("doc-7_").trim_end_matches(".pptx");
    let (secs, micros) = stamp.split_once('.').unwrap();
    assert!(secs.parse::<i64>().unwrap() > 0);
    assert_eq!(micros.len(), 6);
}

#[test]
fn test_export_and_save_report() {
    let dir = TempDir::new().unwrap();
    let exporter = fixed_exporter(&dir);
    let request = ExportRequest::new("report-1", "Pptx")
        .with_project_title("Deck")
        .with_sections(sections())
        .with_slide_titles(vec!["Hello".into()]);

    let report = exporter.export_and_save(&request).unwrap();
    assert_eq!(report.status, "success");
    assert_eq!(report.format, ExportFormat::Pptx);
    assert_eq!(report.document_id, "report-1");
    assert_eq!(fs::metadata(&report.path).unwrap().len(), report.file_size_bytes);
    assert!(report.path.starts_with(dir.path()));
    assert_eq!(
        report.path.file_name().unwrap().to_string_lossy(),
        "report-1_1704164645.000000.pptx"
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["format"], "pptx");
    assert_eq!(json["status"], "success");
}

#[test]
fn test_size_limit_enforced() {
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(
        ExportSettings::new()
            .with_export_dir(dir.path().join("out"))
            .with_max_file_size_mb(0),
    );
    // 0 means unlimited
    assert!(exporter
        .export_and_save(&ExportRequest::new("d", "docx").with_sections(sections()))
        .is_ok());

    let request = ExportRequest::new("d", "docx")
        .with_sections(vec![SectionInput::new("Big", noise(3 * 1024 * 1024))]);
    let limited = Exporter::new(
        ExportSettings::new()
            .with_export_dir(dir.path().join("limited"))
            .with_max_file_size_mb(1),
    );
    match limited.export_and_save(&request) {
        Err(Error::TooLarge { size, limit }) => {
            assert_eq!(limit, 1024 * 1024);
            assert!(size > limit);
        }
        other => panic!("expected TooLarge, got {:?}", other.map(|r| r.file_size_bytes)),
    }
    assert!(!dir.path().join("limited").exists());
}

#[test]
fn test_save_rendered_artifact() {
    let dir = TempDir::new().unwrap();
    let exporter = fixed_exporter(&dir);
    let artifact = exporter
        .export_document(&ExportRequest::new("two-step", "docx").with_sections(sections()))
        .unwrap();
    let len = artifact.len() as u64;

    let report = exporter.save_artifact(artifact).unwrap();
    assert_eq!(report.file_size_bytes, len);
    assert_eq!(report.format, ExportFormat::Docx);
    assert_eq!(
        report.path.file_name().unwrap().to_string_lossy(),
        "two-step_1704164645.000000.docx"
    );
}
