//! Terminal, filesystem and timing helpers shared by every appctl crate.

mod clock;
mod error;
mod fs;
mod style;

pub mod print;
pub mod prompt;

pub use clock::{sleep_or_cancel, Cancelled, Clock, SystemClock};
pub use error::AppctlStdError;
pub use fs::Fs;
pub use style::is_no_color_set;
pub use style::Style;
