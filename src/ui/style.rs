//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Colors are turned
//! off by `--no-color` or the `NO_COLOR` environment variable.

use owo_colors::OwoColorize;
use std::fmt::Display;
use std::sync::OnceLock;

static COLORS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Sets whether styles emit ANSI colors.
///
/// Only the first call has an effect; later calls are ignored.
pub fn init_colors(no_color: bool) {
    let _ = COLORS_ENABLED.set(!no_color && std::env::var_os("NO_COLOR").is_none());
}

fn colors_enabled() -> bool {
    *COLORS_ENABLED.get_or_init(|| std::env::var_os("NO_COLOR").is_none())
}

fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
    if colors_enabled() {
        styled(&text)
    } else {
        text.to_string()
    }
}

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers (e.g., "Configured providers")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, |t| t.bold().to_string())
    }

    /// Style for labels/keys (e.g., "format", "model")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    /// Style for a translated, formatted result
    pub fn result<T: Display>(text: T) -> String {
        paint(text, |t| t.cyan().bold().to_string())
    }

    /// Style for primary values (e.g., provider keys)
    pub fn value<T: Display>(text: T) -> String {
        paint(text, |t| t.cyan().to_string())
    }

    /// Style for secondary/supplementary info (e.g., provider titles, endpoints)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    /// Style for success markers
    pub fn success<T: Display>(text: T) -> String {
        paint(text, |t| t.green().to_string())
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        paint(text, |t| t.red().bold().to_string())
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }

    /// Style for format keys
    pub fn code<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }

    /// Style for hints/help text and in-flight providers
    pub fn hint<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().italic().to_string())
    }

    /// Style for the default marker
    pub fn default_marker() -> String {
        Self::secondary("(default)")
    }
}
