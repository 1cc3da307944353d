//! Integration tests for directory batch processing.

mod common;

use std::fs;

use common::{build_pdf, sample_report, Mark};
use pdfoutline::batch::{BatchOptions, BatchProcessor};
use pdfoutline::model::DocumentOutline;
use pdfoutline::outline::OutlineConfig;

fn populate(dir: &std::path::Path) {
    fs::write(dir.join("a.pdf"), sample_report()).unwrap();
    fs::write(
        dir.join("b.PDF"),
        build_pdf(&[vec![Mark::Text("Release Notes", 20, 760)]]),
    )
    .unwrap();
    fs::write(dir.join("broken.pdf"), b"this is not a pdf").unwrap();
    fs::write(dir.join("notes.txt"), b"plain text").unwrap();
}

#[test]
fn test_batch_isolates_failures() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    populate(input.path());

    let processor = BatchProcessor::new(OutlineConfig::default(), BatchOptions::new().sequential());
    let report = processor.run(input.path(), output.path()).unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped, 1);

    let names: Vec<String> = report
        .documents
        .iter()
        .map(|d| d.input.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.PDF", "broken.pdf"]);

    assert!(output.path().join("a.json").exists());
    assert!(output.path().join("b.json").exists());
    assert!(!output.path().join("broken.json").exists());
}

#[test]
fn test_batch_output_content() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    populate(input.path());

    BatchProcessor::default()
        .run(input.path(), output.path())
        .unwrap();

    let json = fs::read_to_string(output.path().join("b.json")).unwrap();
    let outline: DocumentOutline = serde_json::from_str(&json).unwrap();
    assert_eq!(outline.title, "Release Notes");
    assert_eq!(outline.outline.len(), 1);
}

#[test]
fn test_batch_creates_output_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let nested = output.path().join("outlines").join("2024");
    fs::write(input.path().join("report.pdf"), sample_report()).unwrap();

    let report = BatchProcessor::default().run(input.path(), &nested).unwrap();
    assert!(report.is_success());
    assert!(nested.join("report.json").exists());
}

#[test]
fn test_batch_missing_input_dir() {
    let output = tempfile::tempdir().unwrap();
    let missing = output.path().join("does-not-exist");
    assert!(BatchProcessor::default()
        .run(&missing, output.path())
        .is_err());
}

#[test]
fn test_batch_empty_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let report = BatchProcessor::default()
        .run(input.path(), output.path())
        .unwrap();
    assert_eq!(report.total(), 0);
    assert!(report.is_success());
}

#[test]
fn test_batch_same_stem_written_once() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a.PDF"), sample_report()).unwrap();
    fs::write(
        input.path().join("a.pdf"),
        build_pdf(&[vec![Mark::Text("Release Notes", 20, 760)]]),
    )
    .unwrap();

    let report = BatchProcessor::default()
        .run(input.path(), output.path())
        .unwrap();

    assert_eq!(report.total(), 2);
    assert_eq!(report.succeeded(), 1);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.input, input.path().join("a.pdf"));

    let json = fs::read_to_string(output.path().join("a.json")).unwrap();
    let outline: DocumentOutline = serde_json::from_str(&json).unwrap();
    assert!(outline.title.starts_with("Annual Report"));
}
