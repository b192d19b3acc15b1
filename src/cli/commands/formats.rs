//! Format listing command handler.

use anyhow::Result;

use crate::config::ConfigManager;
use crate::format::FORMATS;
use crate::ui::Style;

const SAMPLE: &str = "hello world";

/// Prints the supported case formats with a sample conversion, marking the
/// configured default.
pub fn print_formats() -> Result<()> {
    let config = ConfigManager::new()?.load_or_default()?;
    let default = config.namecast.format.unwrap_or_default();

    println!("{}\n", Style::header("Case formats"));
    for info in FORMATS {
        println!(
            "  {} {:<52} {}{}",
            Style::label(format!("{:<10}", info.key)),
            info.description,
            Style::code(info.format.apply(SAMPLE)),
            if info.format == default {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            }
        );
    }
    Ok(())
}
