//! Progress indicator for files merged or pages processed.
//!
//! # Examples
//!
//! ```
//! use pdfops::output::progress::{ProgressBar, ProgressStyle};
//!
//! let mut progress = ProgressBar::new(100, ProgressStyle::Bar);
//! progress.set_message("Rotating pages");
//!
//! for i in 0..=100 {
//!     progress.update(i);
//! }
//!
//! progress.finish();
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Classic progress bar: [=====>    ]
    Bar,
    /// Simple counter: 42/100
    Counter,
}

/// Progress bar drawn on stderr.
#[derive(Debug)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    style: ProgressStyle,
    message: Option<String>,
    start_time: Instant,
    last_update: Instant,
    update_interval: Duration,
    enabled: bool,
    drawn: bool,
}

impl ProgressBar {
    /// Create a new progress bar, enabled only when stderr is a terminal.
    pub fn new(total: usize, style: ProgressStyle) -> Self {
        Self {
            total,
            current: 0,
            style,
            message: None,
            start_time: Instant::now(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
            enabled: io::stderr().is_terminal(),
            drawn: false,
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new(0, ProgressStyle::Counter);
        pb.enabled = false;
        pb
    }

    /// Set the message to display with the progress bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Change the total, e.g. once an operation knows how many pages it has.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Update the progress bar to a specific value.
    pub fn update(&mut self, current: usize) {
        self.current = current;

        // Rate limit updates
        if self.last_update.elapsed() < self.update_interval && current < self.total {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Whether the bar draws anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Feed an operation's `(current, total)` progress callback.
    pub fn observe(&mut self, current: usize, total: usize) {
        self.set_total(total);
        self.update(current);
    }

    /// Mark the progress bar as finished and move to a new line.
    pub fn finish(&mut self) {
        self.current = self.total;
        if self.enabled && self.drawn {
            self.render();
            eprintln!();
        }
    }

    fn render(&mut self) {
        if !self.enabled {
            return;
        }

        let output = match self.style {
            ProgressStyle::Bar => self.render_bar(),
            ProgressStyle::Counter => self.render_counter(),
        };

        eprint!("\r{output}");
        io::stderr().flush().ok();
        self.drawn = true;
    }

    fn render_bar(&self) -> String {
        let width = 40;
        let filled = (width * self.current.min(self.total)) / self.total.max(1);
        let empty = width - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let mut parts = vec![
            bar,
            format!("{:.0}%", self.percent()),
            format!("{}/{}", self.current, self.total),
            format_duration(self.start_time.elapsed()),
        ];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }

    fn render_counter(&self) -> String {
        let mut parts = vec![
            format!("{}/{}", self.current, self.total),
            format_duration(self.start_time.elapsed()),
        ];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }

    /// Get the current progress percentage.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Get the elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
