//! CLI argument parsing for pdfops.
//!
//! Defines the subcommands and flags with `clap` and turns them into a
//! validated [`Config`]. Numeric arguments are parsed as plain integers or
//! floats here; range and angle checks happen in the library so their
//! errors carry the right exit codes.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfops::config::{
    Command, Config, CropRect, CropRequest, MergeRequest, OutputOptions, OverwriteMode,
    RotateRequest, SplitRequest,
};
use pdfops::error::{PdfOpsError, Result};

/// Merge, split, rotate, crop and optimize PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdfops")]
#[command(version)]
#[command(about = "Merge, split, rotate, crop and optimize PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output - show details and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the operation report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Dry run - run the operation in memory without writing the output
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Optimize the output file after writing it
    ///
    /// Removes unused objects and empty streams, compresses streams and
    /// renumbers objects.
    #[arg(short = 'o', long)]
    pub optimize: bool,

    /// Password for encrypted inputs; also encrypts the output with it
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    pub force: bool,
}

/// Available operations.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Concatenate PDF files in the given order
    ///
    /// Example:
    ///   pdfops merge a.pdf b.pdf c.pdf merged.pdf
    Merge {
        /// Input PDF files to merge (in order)
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        /// Output PDF file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: OutputArgs,
    },

    /// Extract an inclusive page range (pages are numbered from 1)
    ///
    /// Example:
    ///   pdfops split book.pdf 3 7 chapter.pdf
    #[command(allow_negative_numbers = true)]
    Split {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// First page to keep
        #[arg(value_name = "START")]
        start_page: i64,

        /// Last page to keep
        #[arg(value_name = "END")]
        end_page: i64,

        /// Output PDF file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: OutputArgs,
    },

    /// Rotate every page by 90, 180 or 270 degrees
    ///
    /// Example:
    ///   pdfops rotate scan.pdf 90 upright.pdf
    #[command(allow_negative_numbers = true)]
    Rotate {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Rotation in degrees
        #[arg(value_name = "DEGREES")]
        rotation: i64,

        /// Output PDF file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: OutputArgs,
    },

    /// Crop one page and write it as a single-page document
    ///
    /// Coordinates are PDF points with the origin at the bottom-left of the
    /// page and must lie inside the page.
    ///
    /// Example:
    ///   pdfops crop doc.pdf 2 50 50 300 400 figure.pdf
    #[command(allow_negative_numbers = true)]
    Crop {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Page to crop
        #[arg(value_name = "PAGE")]
        page: i64,

        /// Left edge
        #[arg(value_name = "X0")]
        x0: f32,

        /// Bottom edge
        #[arg(value_name = "Y0")]
        y0: f32,

        /// Right edge
        #[arg(value_name = "X1")]
        x1: f32,

        /// Top edge
        #[arg(value_name = "Y1")]
        y1: f32,

        /// Output PDF file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: OutputArgs,
    },
}

impl OutputArgs {
    fn output_options(&self, path: &PathBuf, dry_run: bool) -> OutputOptions {
        OutputOptions {
            path: path.clone(),
            overwrite: if self.force {
                OverwriteMode::Force
            } else {
                OverwriteMode::NoClobber
            },
            optimize: self.optimize,
            encrypt_password: self.password.clone(),
            dry_run,
        }
    }
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// `--password` is used both to unlock inputs and to encrypt the
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidConfig`] if configuration validation
    /// fails.
    pub fn to_config(&self) -> Result<Config> {
        let command = match &self.command {
            Commands::Merge {
                inputs,
                output,
                options,
            } => Command::Merge(MergeRequest {
                inputs: inputs.clone(),
                decrypt_password: options.password.clone(),
                output: options.output_options(output, self.dry_run),
            }),
            Commands::Split {
                input,
                start_page,
                end_page,
                output,
                options,
            } => Command::Split(SplitRequest {
                input: input.clone(),
                start_page: *start_page,
                end_page: *end_page,
                decrypt_password: options.password.clone(),
                output: options.output_options(output, self.dry_run),
            }),
            Commands::Rotate {
                input,
                rotation,
                output,
                options,
            } => Command::Rotate(RotateRequest {
                input: input.clone(),
                degrees: *rotation,
                decrypt_password: options.password.clone(),
                output: options.output_options(output, self.dry_run),
            }),
            Commands::Crop {
                input,
                page,
                x0,
                y0,
                x1,
                y1,
                output,
                options,
            } => Command::Crop(CropRequest {
                input: input.clone(),
                page: *page,
                rect: CropRect::new(*x0, *y0, *x1, *y1),
                decrypt_password: options.password.clone(),
                output: options.output_options(output, self.dry_run),
            }),
        };

        let config = Config {
            command,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
        };

        config.validate().map_err(|e| match e {
            PdfOpsError::InvalidConfig { .. } => e,
            other => PdfOpsError::invalid_config(other.to_string()),
        })?;

        Ok(config)
    }
}
