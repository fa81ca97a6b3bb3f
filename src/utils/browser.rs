use std::process::Command;

use anyhow::anyhow;
use appctl_std::Style;

use crate::AppctlResult;

/// Opens `url` in `$BROWSER` when it is set, otherwise in the default browser.
pub fn open(url: &str) -> AppctlResult<()> {
    let browser_var = Style::Command.paint("$BROWSER");
    let link = Style::Link.paint(url);

    if let Some(browser_override) = std::env::var_os("BROWSER") {
        eprintln!("Opening {link} with the application specified by {browser_var}.");
        Command::new(&browser_override).arg(url).status().map_err(|e| {
            anyhow!(
                "Couldn't open browser {}: {}",
                browser_override.to_string_lossy(),
                e
            )
        })?;
    } else {
        eprintln!(
            "Opening {link} with your default browser. This can be overridden by setting the {browser_var} environment variable."
        );
        opener::open(url)?;
    }

    Ok(())
}
