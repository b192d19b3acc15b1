use clap::{Parser, Subcommand};

use crate::format::CaseFormat;

#[derive(Parser, Debug)]
#[command(name = "namecast")]
#[command(about = "Translate text into identifiers with several translation providers at once")]
#[command(version)]
pub struct Args {
    /// Text to translate (reads from stdin if not provided)
    pub text: Option<String>,

    /// Case format applied to every result
    #[arg(short = 'f', long, value_enum, global = true)]
    pub format: Option<CaseFormat>,

    /// Target language code (e.g., en)
    #[arg(short = 't', long = "to", global = true)]
    pub to: Option<String>,

    /// Debounce window for live input, in milliseconds
    #[arg(short = 'd', long, global = true)]
    pub debounce_ms: Option<u64>,

    /// Print only the top result to stdout
    #[arg(short = 'p', long, conflicts_with = "pick")]
    pub print: bool,

    /// Copy the top result to the clipboard
    #[arg(short = 'c', long, conflicts_with = "pick")]
    pub copy: bool,

    /// Choose a result and an action interactively
    #[arg(long)]
    pub pick: bool,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate each stdin line as it arrives, debouncing rapid edits
    Watch,
    /// List translation providers and whether they are enabled
    Providers,
    /// List supported case formats
    Formats,
    /// Choose enabled providers and the default format
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
