//! Rotate every page.

use crate::config::RotateRequest;
use crate::error::Result;
use crate::io::PdfReader;
use crate::ops::write_output;
use crate::pages;
use crate::report::OperationReport;
use crate::validation::Validator;

/// Add `request.degrees` to the rotation of every page.
///
/// The angle is checked before the input is opened. Each page's new
/// `/Rotate` is its effective (possibly inherited) rotation plus the angle,
/// modulo 360. Calls `on_progress(pages_done, pages_total)` per page.
///
/// # Errors
///
/// Returns [`PdfOpsError::InvalidRotation`](crate::PdfOpsError::InvalidRotation)
/// unless the angle is 90, 180 or 270.
pub async fn rotate<F>(request: &RotateRequest, mut on_progress: F) -> Result<OperationReport>
where
    F: FnMut(usize, usize),
{
    let validator = Validator::new();
    validator.check_output(&request.output).await?;
    let rotation = validator.rotation(request.degrees)?;
    validator.check_input(&request.input).await?;

    let loaded = PdfReader::new()
        .open(&request.input, request.decrypt_password.as_deref())
        .await?;

    let mut document = loaded.document;
    let page_ids = pages::page_ids(&document);
    let total = page_ids.len();

    for (idx, page_id) in page_ids.into_iter().enumerate() {
        let rotated = pages::rotate_page(&mut document, page_id, rotation.as_degrees())?;
        tracing::trace!(page = idx + 1, rotate = rotated, "rotated page");
        on_progress(idx + 1, total);
    }

    let mut report = OperationReport::new("rotate", &request.output.path);
    write_output(document, total, &request.output, &mut report).await?;

    Ok(report)
}
