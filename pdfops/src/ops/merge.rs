//! Concatenate documents.

use lopdf::{Document, ObjectId};

use crate::config::MergeRequest;
use crate::error::{PdfOpsError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::ops::write_output;
use crate::pages;
use crate::report::OperationReport;
use crate::validation::Validator;

/// Accumulates documents into a single page tree.
///
/// Each appended document keeps its own page-tree root, grafted as a child
/// of a fresh root, so attributes inherited inside one input never leak
/// onto pages of another.
pub struct Merger {
    document: Document,
    root: ObjectId,
    pages: usize,
    files: usize,
}

impl Merger {
    /// Start an empty merge.
    pub fn new() -> Self {
        let (document, root) = pages::empty_document("1.4");
        Self {
            document,
            root,
            pages: 0,
            files: 0,
        }
    }

    /// Append every page of `loaded`, in order.
    pub fn append(&mut self, loaded: LoadedPdf) -> Result<usize> {
        if loaded.document.version > self.document.version {
            self.document.version = loaded.document.version.clone();
        }

        let appended = pages::graft(&mut self.document, self.root, loaded.document)?;
        self.pages += appended;
        self.files += 1;

        tracing::debug!(
            path = %loaded.path.display(),
            pages = appended,
            total_pages = self.pages,
            "appended document"
        );

        Ok(appended)
    }

    /// Pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Documents appended so far.
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// The merged document, without objects that only the dropped source
    /// catalogs and trailers referred to.
    pub fn into_document(mut self) -> Document {
        let pruned = self.document.prune_objects();
        tracing::debug!(objects = pruned.len(), "dropped unreachable objects");
        self.document
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge `request.inputs` in order into `request.output`.
///
/// Calls `on_progress(files_done, files_total)` after each input.
///
/// # Errors
///
/// Fails before writing anything if the output exists (without force), any
/// input is missing, or any input cannot be loaded or unlocked.
pub async fn merge<F>(request: &MergeRequest, mut on_progress: F) -> Result<OperationReport>
where
    F: FnMut(usize, usize),
{
    let validator = Validator::new();
    validator.check_output(&request.output).await?;

    if request.inputs.is_empty() {
        return Err(PdfOpsError::invalid_config("No input files specified"));
    }
    validator.check_inputs(&request.inputs).await?;

    let reader = PdfReader::new();
    let mut merger = Merger::new();
    let total = request.inputs.len();

    for (idx, path) in request.inputs.iter().enumerate() {
        let loaded = reader
            .open(path, request.decrypt_password.as_deref())
            .await?;
        merger.append(loaded)?;
        on_progress(idx + 1, total);
    }

    tracing::debug!(
        files = merger.file_count(),
        pages = merger.page_count(),
        "merged page trees"
    );

    let mut report = OperationReport::new("merge", &request.output.path);
    let pages = merger.page_count();
    write_output(merger.into_document(), pages, &request.output, &mut report).await?;

    Ok(report)
}
