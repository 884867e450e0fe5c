//! Progress display for collapse runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static COLLAPSE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Steps: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks one collapse run against its step budget
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar sized to the step budget
    pub fn new(max_steps: usize) -> Self {
        let bar = ProgressBar::new(max_steps as u64);
        bar.set_style(COLLAPSE_STYLE.clone());
        Self { bar }
    }

    /// Report the current step and boundary size
    pub fn update(&self, step: usize, boundary_sockets: usize) {
        self.bar.set_position(step as u64);
        self.bar
            .set_message(format!("{boundary_sockets} open sockets"));
    }

    /// Finish the bar with a closing message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
