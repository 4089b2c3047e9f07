//! Terminal-facing helpers for the binary

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::convert::Progress;

/// Progress sink backed by an indicatif bar
///
/// With a known expected total this draws a bar with a percentage; without
/// one it falls back to a spinner with a running record count. Either way the
/// bar is cleared when the run finishes.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(expected_total: Option<u64>) -> Self {
        let bar = match expected_total {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} records",
                        )
                        .unwrap()
                        .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {pos} records")
                        .unwrap(),
                );
                pb
            }
        };
        Self { bar }
    }
}

impl Progress for BarProgress {
    fn records(&self, count: u64) {
        self.bar.set_position(count);
    }

    fn finish(&self, total: u64) {
        self.bar.set_position(total);
        self.bar.finish_and_clear();
    }
}

/// Show a success message (if not in quiet mode)
pub fn show_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Show an error message
pub fn show_error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format a duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let total_millis = duration.as_millis();

    if total_millis < 1000 {
        format!("{}ms", total_millis)
    } else if total_millis < 60_000 {
        format!("{:.1}s", total_millis as f64 / 1000.0)
    } else {
        let minutes = total_millis / 60_000;
        let seconds = (total_millis % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}
