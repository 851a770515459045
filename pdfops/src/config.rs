//! Configuration module for pdfops.
//!
//! The CLI maps its arguments onto one of the request types defined here.
//! Requests carry raw user values (1-based page numbers, degrees, corner
//! coordinates); range and bounds checks that need the opened document
//! happen in [`crate::validation`].

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PdfOpsError, Result};

/// Page rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidRotation`] unless `degrees` is exactly
    /// 90, 180 or 270.
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        match degrees {
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(PdfOpsError::InvalidRotation { degrees }),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> i64 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

/// Crop rectangle in PDF user space.
///
/// Coordinates are PDF points with the origin at the bottom-left corner of
/// the page and y growing upward, in the same space as the page's
/// `/MediaBox`. Corners may be given in any order; [`CropRect::new`]
/// normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRect {
    /// Left edge.
    pub x0: f32,
    /// Bottom edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
}

impl CropRect {
    /// Build a rectangle from two opposite corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        // Plain comparisons keep NaN in place so `is_finite` can reject it.
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y1 < y0 { (y1, y0) } else { (y0, y1) };
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle width in points.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Rectangle height in points.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Whether `self` lies entirely inside `outer`.
    pub fn within(&self, outer: &CropRect) -> bool {
        self.x0 >= outer.x0 && self.y0 >= outer.y0 && self.x1 <= outer.x1 && self.y1 <= outer.y1
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {} {}]", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OverwriteMode {
    /// Never overwrite, error if file exists (default).
    #[default]
    NoClobber,
    /// Always overwrite.
    Force,
}

/// Settings shared by every operation for the file it produces.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Destination path.
    pub path: PathBuf,

    /// File overwrite behavior.
    pub overwrite: OverwriteMode,

    /// Run the optimize step on the written file.
    pub optimize: bool,

    /// Encrypt the output with this password.
    pub encrypt_password: Option<String>,

    /// Run everything in memory but write nothing.
    pub dry_run: bool,
}

impl OutputOptions {
    /// Options writing to `path` with defaults for everything else.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Concatenate several documents.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,
    /// Password used to unlock encrypted inputs.
    pub decrypt_password: Option<String>,
    /// Output settings.
    pub output: OutputOptions,
}

/// Extract an inclusive page range.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Input PDF file path.
    pub input: PathBuf,
    /// First page to keep (1-based).
    pub start_page: i64,
    /// Last page to keep (1-based, inclusive).
    pub end_page: i64,
    /// Password used to unlock an encrypted input.
    pub decrypt_password: Option<String>,
    /// Output settings.
    pub output: OutputOptions,
}

/// Rotate every page.
#[derive(Debug, Clone)]
pub struct RotateRequest {
    /// Input PDF file path.
    pub input: PathBuf,
    /// Rotation in degrees, validated against 90/180/270.
    pub degrees: i64,
    /// Password used to unlock an encrypted input.
    pub decrypt_password: Option<String>,
    /// Output settings.
    pub output: OutputOptions,
}

/// Crop one page and keep only that page.
#[derive(Debug, Clone)]
pub struct CropRequest {
    /// Input PDF file path.
    pub input: PathBuf,
    /// Page to crop (1-based).
    pub page: i64,
    /// Visible area to keep.
    pub rect: CropRect,
    /// Password used to unlock an encrypted input.
    pub decrypt_password: Option<String>,
    /// Output settings.
    pub output: OutputOptions,
}

/// One operation to perform.
#[derive(Debug, Clone)]
pub enum Command {
    /// Merge several documents.
    Merge(MergeRequest),
    /// Extract a page range.
    Split(SplitRequest),
    /// Rotate all pages.
    Rotate(RotateRequest),
    /// Crop a single page.
    Crop(CropRequest),
}

impl Command {
    /// Output settings of the wrapped request.
    pub fn output(&self) -> &OutputOptions {
        match self {
            Self::Merge(req) => &req.output,
            Self::Split(req) => &req.output,
            Self::Rotate(req) => &req.output,
            Self::Crop(req) => &req.output,
        }
    }

    /// Input paths of the wrapped request, in processing order.
    pub fn inputs(&self) -> Vec<&Path> {
        match self {
            Self::Merge(req) => req.inputs.iter().map(PathBuf::as_path).collect(),
            Self::Split(req) => vec![req.input.as_path()],
            Self::Rotate(req) => vec![req.input.as_path()],
            Self::Crop(req) => vec![req.input.as_path()],
        }
    }

    /// Subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merge",
            Self::Split(_) => "split",
            Self::Rotate(_) => "rotate",
            Self::Crop(_) => "crop",
        }
    }
}

/// Complete configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Operation to run.
    pub command: Command,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the operation report as JSON.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - A merge has no inputs
    ///
    /// An output that is also an input is allowed here. It is refused as an
    /// existing file unless overwriting is forced, and the atomic write makes
    /// rewriting in place safe.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfOpsError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Command::Merge(req) = &self.command
            && req.inputs.is_empty()
        {
            return Err(PdfOpsError::invalid_config("No input files specified"));
        }

        Ok(())
    }

    /// Check if status output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet && !self.json
    }
}
