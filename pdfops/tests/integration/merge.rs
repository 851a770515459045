//! Integration tests for merging.

use lopdf::{Object, dictionary};
use pdfops::PdfOpsError;
use pdfops::config::{MergeRequest, OverwriteMode};
use pdfops::ops;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{
    expected_tags, open, output, tagged_document, tags, write_document, write_encrypted_pdf,
    write_tagged_pdf,
};

fn request(inputs: Vec<PathBuf>, out: PathBuf) -> MergeRequest {
    MergeRequest {
        inputs,
        decrypt_password: None,
        output: output(&out),
    }
}

#[tokio::test]
async fn test_merge_concatenates_pages_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write_tagged_pdf(dir.path(), "a.pdf", "A", 2);
    let b = write_tagged_pdf(dir.path(), "b.pdf", "B", 3);
    let out = dir.path().join("merged.pdf");

    let report = ops::merge(&request(vec![a, b], out.clone()), |_, _| {})
        .await
        .unwrap();

    assert!(report.written);
    assert_eq!(report.pages_written, 5);
    assert!(report.bytes_written > 0);

    let mut expected = expected_tags("A", 1, 2);
    expected.extend(expected_tags("B", 1, 3));
    assert_eq!(tags(&open(&out, None).await), expected);
}

#[tokio::test]
async fn test_merge_keeps_repeated_inputs() {
    let dir = TempDir::new().unwrap();
    let a = write_tagged_pdf(dir.path(), "a.pdf", "A", 1);
    let b = write_tagged_pdf(dir.path(), "b.pdf", "B", 1);
    let out = dir.path().join("merged.pdf");

    ops::merge(&request(vec![a.clone(), b, a], out.clone()), |_, _| {})
        .await
        .unwrap();

    assert_eq!(tags(&open(&out, None).await), vec!["A-1", "B-1", "A-1"]);
}

#[tokio::test]
async fn test_merge_reports_progress_per_file() {
    let dir = TempDir::new().unwrap();
    let inputs = vec![
        write_tagged_pdf(dir.path(), "a.pdf", "A", 1),
        write_tagged_pdf(dir.path(), "b.pdf", "B", 1),
        write_tagged_pdf(dir.path(), "c.pdf", "C", 1),
    ];
    let out = dir.path().join("merged.pdf");

    let mut calls = Vec::new();
    ops::merge(&request(inputs, out), |done, total| calls.push((done, total)))
        .await
        .unwrap();

    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_merge_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");
    let real = write_tagged_pdf(dir.path(), "real.pdf", "R", 1);
    let out = dir.path().join("merged.pdf");

    let result = ops::merge(&request(vec![missing.clone(), real], out.clone()), |_, _| {}).await;

    match result {
        Err(PdfOpsError::InputNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
    assert!(!out.exists());
}

#[tokio::test]
async fn test_merge_corrupt_input_aborts_batch() {
    let dir = TempDir::new().unwrap();
    let good = write_tagged_pdf(dir.path(), "good.pdf", "G", 2);
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"%PDF-1.4\nthis is not really a pdf").unwrap();
    let out = dir.path().join("merged.pdf");

    let result = ops::merge(&request(vec![good, bad], out.clone()), |_, _| {}).await;

    assert!(matches!(result, Err(PdfOpsError::CorruptDocument { .. })));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_merge_refuses_existing_output_before_reading_inputs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("merged.pdf");
    std::fs::write(&out, b"keep me").unwrap();

    let result = ops::merge(
        &request(vec![dir.path().join("missing.pdf")], out.clone()),
        |_, _| {},
    )
    .await;

    assert!(matches!(result, Err(PdfOpsError::OutputExists { .. })));
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
}

#[tokio::test]
async fn test_merge_force_overwrites_output() {
    let dir = TempDir::new().unwrap();
    let a = write_tagged_pdf(dir.path(), "a.pdf", "A", 1);
    let out = dir.path().join("merged.pdf");
    std::fs::write(&out, b"old").unwrap();

    let mut req = request(vec![a], out.clone());
    req.output.overwrite = OverwriteMode::Force;
    ops::merge(&req, |_, _| {}).await.unwrap();

    assert_eq!(tags(&open(&out, None).await), vec!["A-1"]);
}

#[tokio::test]
async fn test_merge_encrypted_inputs_and_output() {
    let dir = TempDir::new().unwrap();
    let a = write_encrypted_pdf(dir.path(), "a.pdf", "A", 1, "secret").await;
    let b = write_tagged_pdf(dir.path(), "b.pdf", "B", 1);
    let out = dir.path().join("merged.pdf");

    let mut req = request(vec![a.clone(), b.clone()], out.clone());
    let result = ops::merge(&req, |_, _| {}).await;
    assert!(matches!(result, Err(PdfOpsError::PasswordRequired { .. })));
    assert!(!out.exists());

    req.decrypt_password = Some("secret".to_string());
    req.output.encrypt_password = Some("secret".to_string());
    let report = ops::merge(&req, |_, _| {}).await.unwrap();
    assert!(report.encrypted);

    let locked = pdfops::io::PdfReader::new().open(&out, None).await;
    assert!(matches!(locked, Err(PdfOpsError::PasswordRequired { .. })));
    assert_eq!(tags(&open(&out, Some("secret")).await), vec!["A-1", "B-1"]);
}

#[tokio::test]
async fn test_merge_writes_only_reachable_objects() {
    let dir = TempDir::new().unwrap();
    let mut doc = tagged_document("A", 2);
    let outlines = doc.add_object(dictionary! { "Type" => "Outlines", "Count" => 0 });
    let info = doc.add_object(dictionary! { "Producer" => Object::string_literal("fixture") });
    let catalog = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    doc.get_dictionary_mut(catalog)
        .unwrap()
        .set("Outlines", outlines);
    doc.trailer.set("Info", info);
    let a = write_document(dir.path(), "a.pdf", doc);
    let b = write_tagged_pdf(dir.path(), "b.pdf", "B", 1);
    let out = dir.path().join("merged.pdf");

    ops::merge(&request(vec![a, b], out.clone()), |_, _| {})
        .await
        .unwrap();

    let merged = open(&out, None).await;
    assert_eq!(tags(&merged), vec!["A-1", "A-2", "B-1"]);
    // The cross-reference stream is read back as an object too.
    let written = merged
        .objects
        .values()
        .filter(|object| match object {
            Object::Stream(stream) => !stream.dict.has_type(b"XRef"),
            _ => true,
        })
        .count();
    // Catalog and root, plus a Pages node, pages and content streams per input.
    assert_eq!(written, 2 + (1 + 4) + (1 + 2));
}
