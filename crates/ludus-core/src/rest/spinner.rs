//! Terminal spinner shown while a request is outstanding

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Braille frames; the trailing empty string is the finished state
const FRAMES: [&str; 11] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];

const TICK: Duration = Duration::from_millis(100);

pub const WAITING_MESSAGE: &str = "Waiting for server...";

/// Spinner drawn on stderr for the lifetime of one request
///
/// Dropping it clears the line, so an early return never leaves it running.
pub struct WaitSpinner {
    bar: Option<ProgressBar>,
}

impl WaitSpinner {
    /// Start animating, unless disabled or stderr is not a terminal
    pub fn start(enabled: bool) -> Self {
        if !enabled || !std::io::stderr().is_terminal() {
            return Self { bar: None };
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        let style = ProgressStyle::default_spinner()
            .tick_strings(&FRAMES)
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(WAITING_MESSAGE);
        bar.enable_steady_tick(TICK);

        Self { bar: Some(bar) }
    }

    /// Stop animating and clear the line
    pub fn stop(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for WaitSpinner {
    fn drop(&mut self) {
        self.clear();
    }
}
