//! CLI-specific progress handling for route-planner
//!
//! Spinners shown while geocoding or route requests are in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a spinner for CLI display
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Failed to create spinner style")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message.to_string());
    pb
}

/// Spinner that ticks while an operation runs and clears itself when done
pub struct Spinner {
    pub pb: ProgressBar,
}

impl Spinner {
    /// Start a spinner unless output is quiet
    pub fn start(message: &str, quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            create_spinner(message)
        };
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
