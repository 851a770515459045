//! Structured result of an operation.
//!
//! Operations never print. They return an [`OperationReport`], which the CLI
//! renders as status lines or serializes as JSON.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::io::format_file_size;

/// Outcome of the optional optimize step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OptimizeOutcome {
    /// The output was rewritten.
    #[serde(rename_all = "camelCase")]
    Optimized {
        /// Output size before optimizing, in bytes.
        size_before: u64,
        /// Output size after optimizing, in bytes.
        size_after: u64,
    },

    /// Optimizing failed; the un-optimized output was kept.
    Failed {
        /// Why the optimize step failed.
        reason: String,
    },
}

impl OptimizeOutcome {
    /// Bytes saved by optimizing, if it succeeded.
    pub fn bytes_saved(&self) -> Option<i64> {
        match self {
            Self::Optimized {
                size_before,
                size_after,
            } => Some(*size_before as i64 - *size_after as i64),
            Self::Failed { .. } => None,
        }
    }
}

/// What an operation did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    /// Operation name (`merge`, `split`, `rotate`, `crop`).
    pub operation: &'static str,

    /// Output path.
    pub output: PathBuf,

    /// Pages in the output document.
    pub pages_written: usize,

    /// Final size of the output file in bytes (0 when nothing was written).
    pub bytes_written: u64,

    /// Whether an output file was written.
    pub written: bool,

    /// Whether the output is encrypted.
    pub encrypted: bool,

    /// Result of the optimize step, when it was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizeOutcome>,

    /// Non-fatal problems.
    pub warnings: Vec<String>,

    /// Wall-clock time spent, in milliseconds.
    pub elapsed_ms: u64,
}

impl OperationReport {
    /// Report for an operation that has not written anything yet.
    pub fn new(operation: &'static str, output: impl Into<PathBuf>) -> Self {
        Self {
            operation,
            output: output.into(),
            pages_written: 0,
            bytes_written: 0,
            written: false,
            encrypted: false,
            optimization: None,
            warnings: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// Record a non-fatal problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(operation = self.operation, "{message}");
        self.warnings.push(message);
    }

    /// Record elapsed time.
    pub fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = elapsed.as_millis() as u64;
        self
    }

    /// Human-readable size of the output.
    pub fn format_bytes_written(&self) -> String {
        format_file_size(self.bytes_written)
    }
}
