//! PDF loading.
//!
//! Loading classifies failures the way users need to see them:
//! - Unreadable or malformed files become [`PdfOpsError::CorruptDocument`]
//! - Encrypted files without a password become [`PdfOpsError::PasswordRequired`]
//! - Encrypted files whose password is rejected become
//!   [`PdfOpsError::IncorrectPassword`]
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.open(Path::new("document.pdf"), None).await?;
//! println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOpsError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document, already decrypted.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Whether the file on disk was encrypted.
    pub was_encrypted: bool,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader that decrypts and rejects documents without pages.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a PDF and unlock it with `password` if it is encrypted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File is not a valid PDF, or has no pages
    /// - PDF is encrypted and no password was supplied
    /// - The supplied password is rejected
    pub async fn open(&self, path: &Path, password: Option<&str>) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let password = password.map(str::to_owned);

        task::spawn_blocking(move || load_blocking(path_buf, password.as_deref()))
            .await
            .map_err(|e| PdfOpsError::unexpected(format!("Load task failed: {e}")))?
    }
}

fn load_blocking(path: PathBuf, password: Option<&str>) -> Result<LoadedPdf> {
    let start = Instant::now();

    // lopdf decrypts while parsing. Files with an empty user password open
    // without one; anything else needs the password up front.
    let loaded = match password {
        Some(password) => Document::load_with_password(&path, password),
        None => Document::load(&path),
    };

    let document = loaded.map_err(|e| match e {
        lopdf::Error::InvalidPassword => {
            tracing::debug!(path = %path.display(), "password rejected");
            PdfOpsError::IncorrectPassword { path: path.clone() }
        }
        other => PdfOpsError::corrupt_document(path.clone(), other.to_string()),
    })?;

    // Still locked: only the encryption dictionary was parsed.
    if document.is_encrypted() {
        return Err(PdfOpsError::PasswordRequired { path });
    }

    let was_encrypted = document.was_encrypted();
    if was_encrypted {
        tracing::debug!(path = %path.display(), "decrypted input");
    }

    let page_count = document.get_pages().len();
    if page_count == 0 {
        return Err(PdfOpsError::corrupt_document(path, "PDF has no pages"));
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let load_time = start.elapsed();

    tracing::debug!(
        path = %path.display(),
        pages = page_count,
        bytes = file_size,
        encrypted = was_encrypted,
        ?load_time,
        "loaded document"
    );

    Ok(LoadedPdf {
        document,
        path,
        page_count,
        was_encrypted,
        load_time,
        file_size,
    })
}
