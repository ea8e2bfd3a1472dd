//! Progress indicators
//!
//! Spinners for loading and filtering. indicatif hides them when stderr is
//! not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// A spinner that never draws, for machine-readable output modes
pub fn hidden() -> ProgressBar {
    ProgressBar::hidden()
}

/// Finish a progress bar and remove it from the terminal
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Loading route...");
        pb.set_message("Filtering...");
        finish_clear(&pb);
        assert!(pb.is_finished());
    }

    #[test]
    fn test_hidden() {
        let pb = hidden();
        assert!(pb.is_hidden());
        finish_clear(&pb);
    }
}
