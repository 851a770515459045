//! Error types for pdfops.
//!
//! Every failure an operation can report is a variant of [`PdfOpsError`].
//! Messages are meant to be shown to the user as-is, and each variant maps
//! to a stable process exit code via [`PdfOpsError::exit_code`].
//!
//! # Error Categories
//!
//! - **Input errors**: missing files, paths that are not files
//! - **Argument errors**: page ranges, rotation, page numbers, crop boxes
//! - **Document errors**: corrupt PDFs, missing or wrong passwords
//! - **Output errors**: existing output, write failures

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfops operations.
pub type Result<T> = std::result::Result<T, PdfOpsError>;

/// Main error type for pdfops operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfOpsError {
    /// Output file already exists and `--force` was not given.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    InputNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Split range is outside the document or reversed.
    #[error(
        "Invalid page range {start}-{end} for PDF: {}\n  PDF has {total_pages} page(s). Pages must satisfy 1 <= start <= end <= {total_pages}",
        path.display()
    )]
    InvalidRange {
        /// Path to the PDF file.
        path: PathBuf,
        /// Requested first page (1-based).
        start: i64,
        /// Requested last page (1-based, inclusive).
        end: i64,
        /// Total pages in the PDF.
        total_pages: usize,
    },

    /// Rotation is not one of 90, 180, 270.
    #[error("Invalid rotation: {degrees}. Must be 90, 180, or 270")]
    InvalidRotation {
        /// Requested rotation in degrees.
        degrees: i64,
    },

    /// Page number is outside the document.
    #[error(
        "Invalid page {page} for PDF: {}\n  PDF has {total_pages} page(s)",
        path.display()
    )]
    InvalidPage {
        /// Path to the PDF file.
        path: PathBuf,
        /// Requested page (1-based).
        page: i64,
        /// Total pages in the PDF.
        total_pages: usize,
    },

    /// Crop rectangle is empty, non-finite, or outside the page.
    #[error("Invalid crop box {rect}: {reason}")]
    InvalidCropBox {
        /// Rectangle as given by the user.
        rect: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Document is encrypted and no password was supplied.
    #[error(
        "PDF is encrypted: {}\n  Hint: supply the password with --password",
        path.display()
    )]
    PasswordRequired {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Supplied password did not unlock the document.
    #[error("Incorrect password for encrypted PDF: {}", path.display())]
    IncorrectPassword {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// PDF file is malformed or unreadable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptDocument {
        /// Path to the PDF.
        path: PathBuf,
        /// Details about the failure.
        details: String,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid combination of arguments.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Library-level failure not otherwise classified.
    #[error("Unexpected error: {message}")]
    Unexpected {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfOpsError {
    fn from(err: lopdf::Error) -> Self {
        Self::unexpected(err.to_string())
    }
}

impl PdfOpsError {
    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InputNotFound error.
    pub fn input_not_found(path: PathBuf) -> Self {
        Self::InputNotFound { path }
    }

    /// Create a CorruptDocument error.
    pub fn corrupt_document(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptDocument {
            path,
            details: details.into(),
        }
    }

    /// Create an InvalidCropBox error.
    pub fn invalid_crop_box(rect: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidCropBox {
            rect: rect.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Stable kind name, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutputExists { .. } => "output_exists",
            Self::InputNotFound { .. } => "input_not_found",
            Self::NotAFile { .. } => "not_a_file",
            Self::InvalidRange { .. } => "invalid_range",
            Self::InvalidRotation { .. } => "invalid_rotation",
            Self::InvalidPage { .. } => "invalid_page",
            Self::InvalidCropBox { .. } => "invalid_crop_box",
            Self::PasswordRequired { .. } => "password_required",
            Self::IncorrectPassword { .. } => "incorrect_password",
            Self::CorruptDocument { .. } => "corrupt_document",
            Self::FailedToWrite { .. } => "failed_to_write",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::Io(_) => "io",
            Self::Unexpected { .. } => "unexpected",
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => 1,
            Self::InputNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::CorruptDocument { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::Io(_) => 5,
            Self::Unexpected { .. } => 6,
            Self::InvalidRange { .. } => 7,
            Self::InvalidRotation { .. } => 8,
            Self::InvalidPage { .. } => 9,
            Self::InvalidCropBox { .. } => 9,
            Self::PasswordRequired { .. } => 10,
            Self::IncorrectPassword { .. } => 10,
        }
    }
}
