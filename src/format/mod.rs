//! Case formats applied to translated text.
//!
//! Every provider result passes through exactly one [`CaseFormat`] before it
//! reaches the view. Formatting is pure and never fails: input that has no
//! word characters simply comes out empty or unchanged.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A target casing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaseFormat {
    /// `HELLO_WORLD`
    #[default]
    Constant,
    /// `hello_world`
    Snake,
    /// `helloWorld`
    Camel,
}

/// Descriptive information for a case format (used by `namecast formats`).
#[derive(Debug, Clone)]
pub struct FormatInfo {
    pub format: CaseFormat,
    pub key: &'static str,
    pub description: &'static str,
}

/// All formats in display order.
pub const FORMATS: &[FormatInfo] = &[
    FormatInfo {
        format: CaseFormat::Constant,
        key: "constant",
        description: "Upper case words joined by underscores",
    },
    FormatInfo {
        format: CaseFormat::Snake,
        key: "snake",
        description: "Lower case alphanumeric words joined by underscores",
    },
    FormatInfo {
        format: CaseFormat::Camel,
        key: "camel",
        description: "Lower camel case, first word lower, rest capitalized",
    },
];

impl CaseFormat {
    /// Formats raw provider output into this case convention.
    pub fn apply(self, text: &str) -> String {
        let text = text.trim();
        match self {
            Self::Constant => join_whitespace(&text.to_uppercase(), '_'),
            Self::Snake => join_whitespace(&text.to_lowercase(), '_')
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
                .collect(),
            Self::Camel => to_camel(text),
        }
    }

    pub fn key(self) -> &'static str {
        self.info().key
    }

    pub fn info(self) -> &'static FormatInfo {
        // FORMATS lists every variant
        FORMATS
            .iter()
            .find(|info| info.format == self)
            .unwrap_or(&FORMATS[0])
    }
}

impl fmt::Display for CaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a format name does not match any [`CaseFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = FORMATS.iter().map(|info| info.key).collect();
        write!(
            f,
            "Unknown format '{}'\n\nAvailable formats: {}",
            self.0,
            keys.join(", ")
        )
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for CaseFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FORMATS
            .iter()
            .find(|info| info.key.eq_ignore_ascii_case(s.trim()))
            .map(|info| info.format)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Collapses every whitespace run into a single `sep`.
fn join_whitespace(text: &str, sep: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(sep);
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn to_camel(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
