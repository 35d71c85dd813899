//! Progress tracking for feed exports
//!
//! Shows a progress bar over the page cap while pages are being fetched.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker for export operations
pub struct ProgressTracker {
    /// Start time of the operation
    start_time: Instant,
    /// Progress bar (optional, can be disabled)
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a new progress tracker
    ///
    /// # Arguments
    /// * `max_pages` - Page cap, used as the bar length
    /// * `enable_bar` - Whether to display a progress bar
    pub fn new(max_pages: u32, enable_bar: bool) -> Self {
        let bar = enable_bar.then(|| {
            let bar = ProgressBar::new(u64::from(max_pages));
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] page {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            bar
        });

        Self {
            start_time: Instant::now(),
            bar,
        }
    }

    /// Record a fetched page
    ///
    /// # Arguments
    /// * `pages` - Pages fetched so far
    /// * `records` - Casts fetched so far
    pub fn update(&self, pages: u32, records: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_position(u64::from(pages));

            let elapsed = self.start_time.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                bar.set_message(format!(
                    "{} casts ({:.0} casts/sec)",
                    records,
                    records as f64 / elapsed
                ));
            }
        }
    }

    /// Show a status message next to the bar
    pub fn set_phase(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
