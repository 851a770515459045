//! pdfops - Merge, split, rotate, crop and optimize PDF files.
//!
//! This library is a thin layer over [`lopdf`]: every operation opens its
//! input(s), edits the page tree, and writes the result exactly once. It
//! provides:
//!
//! - Argument and path validation before any document is touched
//! - Page-tree editing that preserves inherited page attributes
//! - Password handling for encrypted inputs and outputs
//! - Atomic output writes with an optional optimize pass
//! - Structured, serializable operation reports
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfops::config::{MergeRequest, OutputOptions};
//! use pdfops::ops;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = MergeRequest {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     decrypt_password: None,
//!     output: OutputOptions::new("merged.pdf"),
//! };
//!
//! let report = ops::merge(&request, |done, total| {
//!     println!("{done}/{total}");
//! })
//! .await?;
//! println!("Created {} page document", report.pages_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfops::io::{PdfReader, PdfWriter};
//! use pdfops::pages;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().open(Path::new("input.pdf"), None).await?;
//! let mut document = loaded.document;
//!
//! let first = pages::page_ids(&document)[0];
//! pages::rotate_page(&mut document, first, 90)?;
//!
//! PdfWriter::new().save(document, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod ops;
pub mod output;
pub mod pages;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfOpsError, Result};
pub use report::{OperationReport, OptimizeOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
