//! Progress reporting for CLI

use crate::domain::entities::{ExtractionProgress, file_name};
use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} entries";

/// Progress reporter using indicatif
///
/// Owned by the main thread; workers send [`ExtractionProgress`] values over
/// a channel and the main loop feeds them to [`update`](Self::update).
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Creates a reporter whose length is filled in by the first update
    pub fn for_extraction(message: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Updates from extraction progress
    pub fn update(&self, progress: &ExtractionProgress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.done as u64);
        if !progress.current.is_empty() {
            self.bar
                .set_message(file_name(&progress.current).to_string());
        }
    }

    /// Keeps the spinner moving while nothing is reported
    pub fn tick(&self) {
        self.bar.tick();
    }

    /// Finishes with a message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stops the bar, leaving it where it was
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}
