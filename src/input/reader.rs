use anyhow::{Context, Result, bail};
use std::io::{self, Read};

/// Upper bound for a single query. Identifiers come from short phrases.
const MAX_INPUT_SIZE: usize = 16 * 1024;

pub struct InputReader;

impl InputReader {
    /// Returns the query from the command line, or reads all of stdin.
    pub fn read(text: Option<&str>) -> Result<String> {
        match text {
            Some(text) => {
                check_size(text.len())?;
                Ok(text.to_string())
            }
            None => Self::read_stdin(),
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            check_size(buffer.len())?;
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        bail!(
            "Input size ({:.1} KB) exceeds maximum allowed size (16 KB).\n\n\
             namecast translates short phrases into identifiers.",
            size as f64 / 1024.0
        );
    }
    Ok(())
}
