//! PDF writing.
//!
//! Every write is atomic: the document is serialized into a temporary file
//! in the destination directory, which is renamed over the output path only
//! after the write succeeded. A failed write never leaves a partial file.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(doc, Path::new("output.pdf")).await?;
//! println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tokio::task;

use crate::error::{PdfOpsError, Result};
use crate::io::format_file_size;
use crate::validation::output_dir;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Encrypt the output with this password (used as owner and user password).
    pub encrypt_password: Option<String>,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            encrypt_password: None,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether the output was encrypted.
    pub encrypted: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that encrypts with `password` when one is given.
    pub fn encrypting(password: Option<&str>) -> Self {
        Self::with_options(WriteOptions {
            encrypt_password: password.map(str::to_owned),
            ..Default::default()
        })
    }

    /// Encrypt (if configured) and save a document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Encryption fails
    /// - The temporary file cannot be created in the output directory
    /// - Serializing or renaming into place fails
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || save_blocking(doc, path_buf, &options))
            .await
            .map_err(|e| PdfOpsError::unexpected(format!("Write task failed: {e}")))?
    }
}

fn save_blocking(
    mut doc: Document,
    path: PathBuf,
    options: &WriteOptions,
) -> Result<WriteStatistics> {
    let start = Instant::now();

    let encrypted = match &options.encrypt_password {
        Some(password) => {
            encrypt(&mut doc, password, &path)?;
            true
        }
        None => false,
    };

    let failed = |source: std::io::Error| PdfOpsError::FailedToWrite {
        path: path.clone(),
        source,
    };

    let mut temp = NamedTempFile::new_in(output_dir(&path)).map_err(failed)?;
    {
        let mut writer = BufWriter::with_capacity(options.buffer_size, temp.as_file_mut());
        doc.save_to(&mut writer).map_err(|e| failed(std::io::Error::other(e)))?;
        writer.flush().map_err(failed)?;
    }
    temp.as_file().sync_all().map_err(failed)?;
    temp.persist(&path).map_err(|e| failed(e.error))?;

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let write_time = start.elapsed();

    tracing::debug!(
        path = %path.display(),
        bytes = file_size,
        encrypted,
        ?write_time,
        "wrote document"
    );

    Ok(WriteStatistics {
        write_time,
        file_size,
        output_path: path,
        encrypted,
    })
}

/// Encrypt `doc` with `password` as both owner and user password.
fn encrypt(doc: &mut Document, password: &str, path: &Path) -> Result<()> {
    ensure_document_id(doc, path);

    let version = EncryptionVersion::V2 {
        document: doc,
        owner_password: password,
        user_password: password,
        key_length: 128,
        permissions: Permissions::all(),
    };

    let state = EncryptionState::try_from(version)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to prepare encryption: {e}")))?;
    doc.encrypt(&state)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to encrypt document: {e}")))?;

    Ok(())
}

/// The encryption key is derived from the trailer `/ID`; give documents
/// without one a stable identifier.
fn ensure_document_id(doc: &mut Document, path: &Path) {
    if doc.trailer.has(b"ID") {
        return;
    }

    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    doc.max_id.hash(&mut hasher);
    doc.objects.len().hash(&mut hasher);
    let digest = hasher.finish().to_be_bytes();

    let mut id = Vec::with_capacity(16);
    id.extend_from_slice(&digest);
    id.extend_from_slice(&digest.map(|b| !b));

    let id = Object::String(id, StringFormat::Hexadecimal);
    doc.trailer.set("ID", Object::Array(vec![id.clone(), id]));
}
