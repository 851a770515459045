//! Crop one page into a single-page document.

use crate::config::CropRequest;
use crate::error::{PdfOpsError, Result};
use crate::io::PdfReader;
use crate::ops::write_output;
use crate::pages;
use crate::report::OperationReport;
use crate::validation::Validator;

/// Set `/CropBox` on page `request.page` (1-based) and write a document
/// containing only that page.
///
/// The rectangle is in default user space (points, origin bottom-left) and
/// must lie inside the page's media box.
///
/// # Errors
///
/// Returns [`PdfOpsError::InvalidPage`] for a page outside the document and
/// [`PdfOpsError::InvalidCropBox`] for a rectangle that is not finite, is
/// empty, or extends past the media box.
pub async fn crop(request: &CropRequest) -> Result<OperationReport> {
    let validator = Validator::new();
    validator.check_output(&request.output).await?;
    validator.check_input(&request.input).await?;

    let loaded = PdfReader::new()
        .open(&request.input, request.decrypt_password.as_deref())
        .await?;

    let index = validator.page_index(&request.input, request.page, loaded.page_count)?;

    let mut document = loaded.document;
    let page_id = pages::page_ids(&document)
        .get(index)
        .copied()
        .ok_or_else(|| {
            PdfOpsError::unexpected(format!("Page {} missing from page tree", request.page))
        })?;

    let media_box = pages::media_box(&document, page_id).ok_or_else(|| {
        PdfOpsError::corrupt_document(
            request.input.clone(),
            format!("page {} has no valid MediaBox", request.page),
        )
    })?;
    let rect = validator.crop_box(&request.rect, &media_box)?;

    tracing::debug!(page = request.page, %rect, %media_box, "cropping page");

    pages::set_crop_box(&mut document, page_id, &rect)?;
    pages::retain_pages(&mut document, &[page_id])?;

    let mut report = OperationReport::new("crop", &request.output.path);
    write_output(document, 1, &request.output, &mut report).await?;

    Ok(report)
}
