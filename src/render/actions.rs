use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use tracing::{debug, warn};

/// User actions offered on a successful entry.
///
/// Both take the exact formatted string and return nothing; failures are
/// logged, never reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Insert the text where the caller's cursor is (written to stdout).
    Paste,
    /// Put the text on the terminal clipboard.
    Copy,
}

impl Action {
    pub const ALL: [Self; 2] = [Self::Paste, Self::Copy];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Paste => "Paste",
            Self::Copy => "Copy to Clipboard",
        }
    }

    pub fn perform(self, text: &str) {
        let result = match self {
            Self::Paste => paste(text),
            Self::Copy => copy(text),
        };
        match result {
            Ok(()) => debug!(action = self.title(), "action performed"),
            Err(e) => warn!(action = self.title(), error = %e, "action failed"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// OSC 52 escape sequence that asks the terminal to set its clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

fn paste(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

fn copy(text: &str) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    if !stderr.is_terminal() {
        return Err(io::Error::other("clipboard needs a terminal on stderr"));
    }
    stderr.write_all(osc52_sequence(text).as_bytes())?;
    stderr.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("HELLO_WORLD"), "\x1b]52;c;SEVMTE9fV09STEQ=\x07");
    }

    #[test]
    fn test_action_titles() {
        assert_eq!(Action::Paste.to_string(), "Paste");
        assert_eq!(Action::Copy.to_string(), "Copy to Clipboard");
    }
}
