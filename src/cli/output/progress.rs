//! Turn-by-turn progress display for episode generation

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const EPISODE_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} turn {pos}/{len} {wide_msg}";
const EPISODE_BAR_CHARS: &str = "=> ";

/// Progress bar over the `total_turns` of an episode, drawn to stderr.
///
/// Hidden in JSON mode so stdout stays machine-readable and stderr quiet.
pub fn create_progress_bar(total_turns: u64, hidden: bool) -> ProgressBar {
    let bar = ProgressBar::new(total_turns);
    if hidden {
        bar.set_draw_target(ProgressDrawTarget::hidden());
        return bar;
    }

    if let Ok(style) = ProgressStyle::default_bar().template(EPISODE_TEMPLATE) {
        bar.set_style(style.progress_chars(EPISODE_BAR_CHARS));
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Final states of an episode progress bar.
pub trait ProgressBarExt {
    /// Leave the bar on screen with a checkmark
    fn finish_success(&self, message: impl Into<String>);

    /// Leave the bar where it stopped with a cross
    fn finish_error(&self, message: impl Into<String>);
}

impl ProgressBarExt for ProgressBar {
    fn finish_success(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✓ {}", message.into()));
    }

    fn finish_error(&self, message: impl Into<String>) {
        self.abandon_with_message(format!("✗ {}", message.into()));
    }
}
