//! Integration tests for the optimize step.

use pdfops::config::{MergeRequest, SplitRequest};
use pdfops::ops;
use pdfops::report::OptimizeOutcome;
use tempfile::TempDir;

use crate::common::{expected_tags, open, output, tags, write_tagged_pdf};

#[tokio::test]
async fn test_merge_with_optimize() {
    let dir = TempDir::new().unwrap();
    let a = write_tagged_pdf(dir.path(), "a.pdf", "A", 3);
    let b = write_tagged_pdf(dir.path(), "b.pdf", "B", 3);
    let out = dir.path().join("merged.pdf");

    let mut req = MergeRequest {
        inputs: vec![a, b],
        decrypt_password: None,
        output: output(&out),
    };
    req.output.optimize = true;

    let report = ops::merge(&req, |_, _| {}).await.unwrap();

    match &report.optimization {
        Some(OptimizeOutcome::Optimized { size_after, .. }) => {
            assert_eq!(*size_after, std::fs::metadata(&out).unwrap().len());
            assert_eq!(report.bytes_written, *size_after);
        }
        other => panic!("expected Optimized, got {other:?}"),
    }
    assert!(report.warnings.is_empty());

    let mut expected = expected_tags("A", 1, 3);
    expected.extend(expected_tags("B", 1, 3));
    assert_eq!(tags(&open(&out, None).await), expected);
}

#[tokio::test]
async fn test_optimize_twice_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_tagged_pdf(dir.path(), "doc.pdf", "P", 4);

    ops::optimize_file(&path, None).await.unwrap();
    let first = std::fs::read(&path).unwrap();

    ops::optimize_file(&path, None).await.unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_optimize_keeps_encryption() {
    let dir = TempDir::new().unwrap();
    let path =
        crate::common::write_encrypted_pdf(dir.path(), "locked.pdf", "P", 2, "pw").await;

    let outcome = ops::optimize_file(&path, Some("pw")).await.unwrap();
    assert!(matches!(outcome, OptimizeOutcome::Optimized { .. }));

    let reopened = pdfops::io::PdfReader::new().open(&path, None).await;
    assert!(matches!(
        reopened,
        Err(pdfops::PdfOpsError::PasswordRequired { .. })
    ));
    assert_eq!(tags(&open(&path, Some("pw")).await), expected_tags("P", 1, 2));
}

#[tokio::test]
async fn test_optimize_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"definitely not a pdf").unwrap();

    let result = ops::optimize_file(&path, None).await;
    assert!(result.is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"definitely not a pdf");
}

#[tokio::test]
async fn test_optimize_encrypted_split_keeps_pages() {
    let dir = TempDir::new().unwrap();
    let input = write_tagged_pdf(dir.path(), "in.pdf", "P", 4);
    let out = dir.path().join("part.pdf");

    let mut options = output(&out);
    options.optimize = true;
    options.encrypt_password = Some("secret".to_string());
    let req = SplitRequest {
        input,
        start_page: 1,
        end_page: 2,
        decrypt_password: None,
        output: options,
    };

    let report = ops::split(&req, |_, _| {}).await.unwrap();

    assert!(report.encrypted);
    assert!(matches!(
        report.optimization,
        Some(OptimizeOutcome::Optimized { .. })
    ));
    assert!(report.warnings.is_empty());
    assert_eq!(
        tags(&open(&out, Some("secret")).await),
        expected_tags("P", 1, 2)
    );
}
