//! Shrink an already-written PDF in place.
//!
//! The pass prunes unreachable objects, drops zero-length streams,
//! Flate-compresses uncompressed streams and renumbers objects densely.
//! Encrypted files are unlocked with the password they were written with
//! and re-encrypted with it. A pass that would change the page count is
//! abandoned and the file left as it was. Running the pass on its own output
//! yields the same bytes.

use lopdf::Document;
use std::path::Path;
use tokio::task;

use crate::error::{PdfOpsError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::report::OptimizeOutcome;

/// Optimize the PDF at `path`, rewriting it atomically.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, unlocked or rewritten,
/// or if optimizing would change its page count. The original file is
/// untouched in that case.
pub async fn optimize_file(path: &Path, password: Option<&str>) -> Result<OptimizeOutcome> {
    optimize_checked(path, password, None).await
}

/// Run the optimize step on a freshly written output of `expected_pages`
/// pages, turning a failure into [`OptimizeOutcome::Failed`].
pub(crate) async fn run(
    path: &Path,
    password: Option<&str>,
    expected_pages: usize,
) -> OptimizeOutcome {
    match optimize_checked(path, password, Some(expected_pages)).await {
        Ok(outcome) => outcome,
        Err(err) => OptimizeOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

async fn optimize_checked(
    path: &Path,
    password: Option<&str>,
    expected_pages: Option<usize>,
) -> Result<OptimizeOutcome> {
    let loaded = PdfReader::new().open(path, password).await?;

    let pages_before = loaded.page_count;
    if let Some(expected) = expected_pages
        && pages_before != expected
    {
        return Err(PdfOpsError::unexpected(format!(
            "Reloaded output has {pages_before} pages, expected {expected}"
        )));
    }

    let size_before = loaded.file_size;
    let reencrypt = if loaded.was_encrypted { password } else { None };

    let document = task::spawn_blocking(move || {
        let mut document = loaded.document;
        optimize_document(&mut document);
        document
    })
    .await
    .map_err(|e| PdfOpsError::unexpected(format!("Optimize task failed: {e}")))?;

    let pages_after = document.get_pages().len();
    if pages_after != pages_before {
        return Err(PdfOpsError::unexpected(format!(
            "Optimizing would leave {pages_after} of {pages_before} pages"
        )));
    }

    let stats = PdfWriter::encrypting(reencrypt).save(document, path).await?;

    tracing::debug!(
        path = %path.display(),
        size_before,
        size_after = stats.file_size,
        "optimized output"
    );

    Ok(OptimizeOutcome::Optimized {
        size_before,
        size_after: stats.file_size,
    })
}

/// Apply the in-memory optimizations.
pub fn optimize_document(document: &mut Document) {
    let pruned = document.prune_objects();
    let empty_streams = document.delete_zero_length_streams();
    document.compress();
    document.renumber_objects();

    tracing::trace!(
        pruned = pruned.len(),
        empty_streams = empty_streams.len(),
        objects = document.objects.len(),
        "optimized document"
    );
}
