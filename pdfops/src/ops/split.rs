//! Extract an inclusive page range.

use lopdf::ObjectId;

use crate::config::SplitRequest;
use crate::error::{PdfOpsError, Result};
use crate::io::PdfReader;
use crate::ops::write_output;
use crate::pages;
use crate::report::OperationReport;
use crate::validation::Validator;

/// Write pages `start_page..=end_page` (1-based) of the input to the output.
///
/// Calls `on_progress(pages_done, pages_total)` while collecting pages. If
/// the range selects no pages, nothing is written and the report carries a
/// warning.
///
/// # Errors
///
/// Returns [`PdfOpsError::InvalidRange`] for ranges outside the document,
/// plus the usual output, input and load errors.
pub async fn split<F>(request: &SplitRequest, mut on_progress: F) -> Result<OperationReport>
where
    F: FnMut(usize, usize),
{
    let validator = Validator::new();
    validator.check_output(&request.output).await?;
    validator.check_input(&request.input).await?;

    let loaded = PdfReader::new()
        .open(&request.input, request.decrypt_password.as_deref())
        .await?;

    let span = validator.page_span(
        &request.input,
        request.start_page,
        request.end_page,
        loaded.page_count,
    )?;

    let page_ids = pages::page_ids(&loaded.document);
    let selected = page_ids.get(span.indices()).ok_or_else(|| {
        PdfOpsError::unexpected(format!(
            "Page tree lists {} pages, expected {}",
            page_ids.len(),
            loaded.page_count
        ))
    })?;

    let total = selected.len();
    let mut keep: Vec<ObjectId> = Vec::with_capacity(total);
    for &id in selected {
        keep.push(id);
        on_progress(keep.len(), total);
    }

    let mut report = OperationReport::new("split", &request.output.path);

    if keep.is_empty() {
        report.warn(format!(
            "Range {}-{} selects no pages; no output written",
            request.start_page, request.end_page
        ));
        return Ok(report);
    }

    tracing::debug!(
        first = span.start,
        last = span.end,
        pages = keep.len(),
        "extracting page range"
    );

    let mut document = loaded.document;
    pages::retain_pages(&mut document, &keep)?;
    write_output(document, keep.len(), &request.output, &mut report).await?;

    Ok(report)
}
