//! The four document operations and the optimize step.
//!
//! Every operation follows the same shape:
//!
//! 1. Refuse an existing output (unless forced) before opening any input
//! 2. Check inputs and arguments
//! 3. Load, transform in memory
//! 4. Write once through [`PdfWriter`], then optionally optimize
//!
//! Operations return an [`OperationReport`] and never print. Progress is
//! reported through an `FnMut(current, total)` callback.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::config::{Command, OutputOptions, RotateRequest};
//! use pdfops::ops;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let command = Command::Rotate(RotateRequest {
//!     input: PathBuf::from("scan.pdf"),
//!     degrees: 90,
//!     decrypt_password: None,
//!     output: OutputOptions::new("rotated.pdf"),
//! });
//!
//! let report = ops::execute(&command, |_, _| {}).await?;
//! println!("Wrote {} pages", report.pages_written);
//! # Ok(())
//! # }
//! ```

pub mod crop;
pub mod merge;
pub mod optimize;
pub mod rotate;
pub mod split;

use lopdf::Document;
use std::time::Instant;

use crate::config::{Command, OutputOptions};
use crate::error::Result;
use crate::io::PdfWriter;
use crate::report::{OperationReport, OptimizeOutcome};

pub use crop::crop;
pub use merge::merge;
pub use optimize::optimize_file;
pub use rotate::rotate;
pub use split::split;

/// Run one command end to end.
///
/// # Errors
///
/// Returns the first error raised by validation, loading or writing.
/// Optimize-step failures are not errors; they are recorded in the report.
pub async fn execute<F>(command: &Command, mut on_progress: F) -> Result<OperationReport>
where
    F: FnMut(usize, usize),
{
    let start = Instant::now();
    tracing::debug!(operation = command.name(), "starting operation");

    let report = match command {
        Command::Merge(request) => merge(request, &mut on_progress).await?,
        Command::Split(request) => split(request, &mut on_progress).await?,
        Command::Rotate(request) => rotate(request, &mut on_progress).await?,
        Command::Crop(request) => crop(request).await?,
    };

    let report = report.finish(start.elapsed());
    tracing::info!(
        operation = report.operation,
        pages = report.pages_written,
        bytes = report.bytes_written,
        written = report.written,
        elapsed_ms = report.elapsed_ms,
        "operation complete"
    );

    Ok(report)
}

/// Persist `doc` per `options` and fill in the write-related report fields.
pub(crate) async fn write_output(
    doc: Document,
    pages: usize,
    options: &OutputOptions,
    report: &mut OperationReport,
) -> Result<()> {
    report.pages_written = pages;

    if options.dry_run {
        tracing::info!(path = %options.path.display(), "dry run, not writing output");
        return Ok(());
    }

    let writer = PdfWriter::encrypting(options.encrypt_password.as_deref());
    let stats = writer.save(doc, &options.path).await?;
    report.written = true;
    report.encrypted = stats.encrypted;
    report.bytes_written = stats.file_size;

    if options.optimize {
        let outcome =
            optimize::run(&options.path, options.encrypt_password.as_deref(), pages).await;
        match &outcome {
            OptimizeOutcome::Optimized { size_after, .. } => report.bytes_written = *size_after,
            OptimizeOutcome::Failed { reason } => {
                report.warn(format!("Optimization failed, kept un-optimized output: {reason}"))
            }
        }
        report.optimization = Some(outcome);
    }

    Ok(())
}
