//! Output formatting and display for pdfops.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Progress indicators
//! - Operation summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::output::OutputFormatter;
//! use pdfops::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::io::format_file_size;
use crate::report::{OperationReport, OptimizeOutcome};

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Progress bar for `config`'s operation, or a disabled one when status
/// output is off or the operation has no meaningful progress.
pub fn create_progress(config: &Config) -> ProgressBar {
    use crate::config::Command;

    if !config.should_print() {
        return ProgressBar::disabled();
    }

    let message = match &config.command {
        Command::Merge(_) => "Merging files",
        Command::Split(_) => "Extracting pages",
        Command::Rotate(_) => "Rotating pages",
        Command::Crop(_) => return ProgressBar::disabled(),
    };

    let mut progress = ProgressBar::new(0, ProgressStyle::Bar);
    progress.set_message(message);
    progress
}

/// One-line summary of a finished operation.
pub fn summary_line(report: &OperationReport, dry_run: bool) -> String {
    let output = report.output.display();

    if report.written {
        format!(
            "Wrote {} page(s) to {} ({})",
            report.pages_written,
            output,
            report.format_bytes_written()
        )
    } else if dry_run {
        format!(
            "Dry run: would write {} page(s) to {}",
            report.pages_written, output
        )
    } else {
        format!("No output written to {output}")
    }
}

/// Display an operation report to the user.
pub fn display_report(formatter: &OutputFormatter, report: &OperationReport, dry_run: bool) {
    for warning in &report.warnings {
        formatter.warning(warning);
    }

    if report.written || dry_run {
        formatter.success(&summary_line(report, dry_run));
    } else {
        formatter.info(&summary_line(report, dry_run));
    }

    formatter.detail("Operation", report.operation);
    formatter.detail("Encrypted", if report.encrypted { "yes" } else { "no" });

    if let Some(OptimizeOutcome::Optimized {
        size_before,
        size_after,
    }) = &report.optimization
    {
        formatter.detail(
            "Optimized",
            &format!(
                "{} -> {}",
                format_file_size(*size_before),
                format_file_size(*size_after)
            ),
        );
    }

    formatter.detail("Elapsed", &format!("{} ms", report.elapsed_ms));
}
