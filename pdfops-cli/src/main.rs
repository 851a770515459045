//! pdfops - Merge, split, rotate, crop and optimize PDF files.
//!
//! Command-line front end for the `pdfops` library.

mod cli;

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdfops::config::Config;
use pdfops::error::PdfOpsError;
use pdfops::ops;
use pdfops::output::{OutputFormatter, create_formatter, create_progress, display_report};
use pdfops::report::OperationReport;

/// Exit code for command-line usage errors reported by clap.
const USAGE_EXIT_CODE: i32 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            err.print().ok();
            process::exit(code);
        }
    };

    init_tracing(cli.verbose, cli.quiet);

    let json = cli.json;
    let errors = OutputFormatter::new(cli.quiet || json, false);
    if let Err(err) = run(cli).await {
        if json {
            println!("{}", error_json(&err));
        }
        errors.error(&err.to_string());
        process::exit(err.exit_code());
    }
}

/// Install the stderr log subscriber. The filter comes from the flags only.
fn init_tracing(verbose: bool, quiet: bool) {
    let directive = if verbose && !quiet {
        "pdfops=debug"
    } else {
        "error"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfOpsError> {
    let config = cli.to_config()?;
    tracing::debug!(operation = config.command.name(), "parsed arguments");
    let formatter = create_formatter(&config);

    formatter.debug(&format!("{} v{}", pdfops::NAME, pdfops::VERSION));
    for input in config.command.inputs() {
        formatter.detail("Input", &input.display().to_string());
    }

    let mut progress = create_progress(&config);
    let report = ops::execute(&config.command, |current, total| {
        progress.observe(current, total)
    })
    .await?;
    progress.finish();

    render(&config, &formatter, &report)
}

fn render(
    config: &Config,
    formatter: &OutputFormatter,
    report: &OperationReport,
) -> Result<(), PdfOpsError> {
    if config.json {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| PdfOpsError::unexpected(format!("Failed to serialize report: {e}")))?;
        println!("{json}");
        for warning in &report.warnings {
            formatter.warning(warning);
        }
    } else {
        display_report(formatter, report, config.command.output().dry_run);
    }

    Ok(())
}

/// JSON error object printed on stdout in `--json` mode.
fn error_json(err: &PdfOpsError) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "kind": err.kind(),
            "message": err.to_string(),
            "exitCode": err.exit_code(),
        }
    })
}
