//! Integration tests for error handling, dry runs and the dispatcher.

use pdfops::PdfOpsError;
use pdfops::config::{
    Command, CropRect, CropRequest, MergeRequest, OverwriteMode, RotateRequest, SplitRequest,
};
use pdfops::ops;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{output, write_tagged_pdf};

fn commands(input: &Path, out: &Path) -> Vec<Command> {
    vec![
        Command::Merge(MergeRequest {
            inputs: vec![input.to_path_buf()],
            decrypt_password: None,
            output: output(out),
        }),
        Command::Split(SplitRequest {
            input: input.to_path_buf(),
            start_page: 1,
            end_page: 1,
            decrypt_password: None,
            output: output(out),
        }),
        Command::Rotate(RotateRequest {
            input: input.to_path_buf(),
            degrees: 90,
            decrypt_password: None,
            output: output(out),
        }),
        Command::Crop(CropRequest {
            input: input.to_path_buf(),
            page: 1,
            rect: CropRect::new(0.0, 0.0, 100.0, 100.0),
            decrypt_password: None,
            output: output(out),
        }),
    ]
}

#[tokio::test]
async fn test_every_operation_refuses_existing_output() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");
    let out = dir.path().join("out.pdf");
    std::fs::write(&out, b"existing").unwrap();

    for command in commands(&missing, &out) {
        let err = ops::execute(&command, |_, _| {}).await.unwrap_err();
        assert!(
            matches!(err, PdfOpsError::OutputExists { .. }),
            "{} returned {err:?}",
            command.name()
        );
        assert_eq!(err.exit_code(), 4);
    }

    assert_eq!(std::fs::read(&out).unwrap(), b"existing");
}

#[tokio::test]
async fn test_every_operation_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");
    let out = dir.path().join("out.pdf");

    for command in commands(&missing, &out) {
        let err = ops::execute(&command, |_, _| {}).await.unwrap_err();
        assert!(matches!(err, PdfOpsError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    assert!(!out.exists());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_tagged_pdf(dir.path(), "in.pdf", "P", 3);
    let out = dir.path().join("out.pdf");

    for mut command in commands(&input, &out) {
        match &mut command {
            Command::Merge(req) => req.output.dry_run = true,
            Command::Split(req) => req.output.dry_run = true,
            Command::Rotate(req) => req.output.dry_run = true,
            Command::Crop(req) => req.output.dry_run = true,
        }

        let report = ops::execute(&command, |_, _| {}).await.unwrap();
        assert!(!report.written, "{} wrote output", command.name());
        assert!(report.pages_written > 0);
        assert_eq!(report.bytes_written, 0);
    }

    assert!(!out.exists());
}

#[tokio::test]
async fn test_execute_fills_in_report() {
    let dir = TempDir::new().unwrap();
    let input = write_tagged_pdf(dir.path(), "in.pdf", "P", 2);
    let out = dir.path().join("out.pdf");

    let command = commands(&input, &out).remove(2);
    let report = ops::execute(&command, |_, _| {}).await.unwrap();

    assert_eq!(report.operation, "rotate");
    assert_eq!(report.output, out);
    assert_eq!(report.pages_written, 2);
    assert!(report.written);
    assert!(!report.encrypted);
    assert!(report.optimization.is_none());
}

#[tokio::test]
async fn test_directory_input_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.pdf");

    let command = commands(dir.path(), &out).remove(1);
    let err = ops::execute(&command, |_, _| {}).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::NotAFile { .. }));
}

#[tokio::test]
async fn test_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let input = write_tagged_pdf(dir.path(), "in.pdf", "P", 1);
    let out = dir.path().join("nope").join("out.pdf");

    let command = commands(&input, &out).remove(2);
    let err = ops::execute(&command, |_, _| {}).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::InvalidConfig { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_empty_file_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.pdf");
    std::fs::write(&input, b"").unwrap();
    let out = dir.path().join("out.pdf");

    let command = commands(&input, &out).remove(1);
    let err = ops::execute(&command, |_, _| {}).await.unwrap_err();

    assert!(matches!(err, PdfOpsError::CorruptDocument { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_force_allows_overwrite_for_every_operation() {
    let dir = TempDir::new().unwrap();
    let input = write_tagged_pdf(dir.path(), "in.pdf", "P", 2);
    let out: PathBuf = dir.path().join("out.pdf");
    std::fs::write(&out, b"old").unwrap();

    for mut command in commands(&input, &out) {
        match &mut command {
            Command::Merge(req) => req.output.overwrite = OverwriteMode::Force,
            Command::Split(req) => req.output.overwrite = OverwriteMode::Force,
            Command::Rotate(req) => req.output.overwrite = OverwriteMode::Force,
            Command::Crop(req) => req.output.overwrite = OverwriteMode::Force,
        }

        let report = ops::execute(&command, |_, _| {}).await.unwrap();
        assert!(report.written);
        assert!(std::fs::read(&out).unwrap().starts_with(b"%PDF-"));
    }
}
