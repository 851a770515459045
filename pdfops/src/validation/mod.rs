//! Input validation for pdfops.
//!
//! Every check an operation performs before it touches a document lives
//! here:
//! - Output overwrite protection and output directory existence
//! - Input existence (first missing input aborts the batch)
//! - Split ranges, page numbers, rotation angles and crop rectangles
//!
//! Page numbers arrive 1-based from the user. [`Validator::page_span`] and
//! [`Validator::page_index`] are the only places they are converted; the
//! zero-based values they return are used unchanged by the page-tree code.
//!
//! # Examples
//!
//! ```
//! use pdfops::validation::Validator;
//! use std::path::Path;
//!
//! let validator = Validator::new();
//! let span = validator.page_span(Path::new("doc.pdf"), 2, 4, 10).unwrap();
//! assert_eq!((span.start, span.end), (1, 3));
//! assert_eq!(span.len(), 3);
//! ```

use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::config::{CropRect, OutputOptions, OverwriteMode, Rotation};
use crate::error::{PdfOpsError, Result};

/// Inclusive, zero-based page span produced by validating a 1-based range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpan {
    /// First page index (zero-based).
    pub start: usize,
    /// Last page index (zero-based, inclusive).
    pub end: usize,
}

impl PageSpan {
    /// Number of pages in the span.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A validated span is never empty; provided for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Indices covered by the span.
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Validator for paths and numeric arguments.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Check the output path before anything else happens.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output exists and overwrite mode is not [`OverwriteMode::Force`]
    /// - The output directory does not exist
    pub async fn check_output(&self, output: &OutputOptions) -> Result<()> {
        let path = &output.path;

        if tokio::fs::try_exists(path).await? && output.overwrite != OverwriteMode::Force {
            return Err(PdfOpsError::output_exists(path.clone()));
        }

        let parent = output_dir(path);
        if !tokio::fs::try_exists(&parent).await? {
            return Err(PdfOpsError::invalid_config(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    /// Check that a single input exists and is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InputNotFound`] or [`PdfOpsError::NotAFile`].
    pub async fn check_input(&self, path: &Path) -> Result<()> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfOpsError::input_not_found(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };

        if !metadata.is_file() {
            return Err(PdfOpsError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    /// Check every input in order, stopping at the first failure.
    pub async fn check_inputs(&self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            self.check_input(path).await?;
        }
        Ok(())
    }

    /// Validate a rotation angle.
    pub fn rotation(&self, degrees: i64) -> Result<Rotation> {
        Rotation::from_degrees(degrees)
    }

    /// Validate a 1-based inclusive range against a document's page count
    /// and convert it to a zero-based span.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidRange`] if `start < 1`,
    /// `end > total_pages` or `start > end`.
    pub fn page_span(
        &self,
        path: &Path,
        start: i64,
        end: i64,
        total_pages: usize,
    ) -> Result<PageSpan> {
        let invalid = || PdfOpsError::InvalidRange {
            path: path.to_path_buf(),
            start,
            end,
            total_pages,
        };

        if start < 1 || start > end {
            return Err(invalid());
        }

        let end_index = usize::try_from(end).map_err(|_| invalid())?;
        if end_index > total_pages {
            return Err(invalid());
        }

        Ok(PageSpan {
            start: (start - 1) as usize,
            end: end_index - 1,
        })
    }

    /// Validate a 1-based page number and convert it to a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidPage`] if the page is outside
    /// `[1, total_pages]`.
    pub fn page_index(&self, path: &Path, page: i64, total_pages: usize) -> Result<usize> {
        match usize::try_from(page) {
            Ok(number) if (1..=total_pages).contains(&number) => Ok(number - 1),
            _ => Err(PdfOpsError::InvalidPage {
                path: path.to_path_buf(),
                page,
                total_pages,
            }),
        }
    }

    /// Validate a crop rectangle against the page's media box.
    ///
    /// The rectangle must be finite, have a non-zero area and lie inside
    /// `media_box`. It is never clamped.
    pub fn crop_box(&self, rect: &CropRect, media_box: &CropRect) -> Result<CropRect> {
        if !rect.is_finite() {
            return Err(PdfOpsError::invalid_crop_box(
                rect,
                "coordinates must be finite numbers",
            ));
        }

        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(PdfOpsError::invalid_crop_box(
                rect,
                "rectangle has zero width or height",
            ));
        }

        if !rect.within(media_box) {
            return Err(PdfOpsError::invalid_crop_box(
                rect,
                format!("rectangle extends outside the page media box {media_box}"),
            ));
        }

        Ok(*rect)
    }
}

/// Directory the output file will be created in.
pub(crate) fn output_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
