use std::borrow::Cow;
use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// A spinner on stderr for waits the user can't see progress on.
///
/// Nothing is drawn unless stderr is a terminal; the spinner is cleared when dropped.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn on_stderr() -> Spinner {
        Spinner::new(io::stderr().is_terminal())
    }

    pub(crate) fn new(visible: bool) -> Spinner {
        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };
        Spinner { bar }
    }

    pub fn is_visible(&self) -> bool {
        !self.bar.is_hidden()
    }

    pub fn start(&self, message: impl Into<Cow<'static, str>>) {
        self.bar.set_message(message);
        self.bar.enable_steady_tick(TICK);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
