use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use namecast::cli::commands::{configure, formats, providers, translate, watch};
use namecast::cli::{Args, Command};
use namecast::config::ResolveOptions;
use namecast::ui::{Style, init_colors};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_colors(args.no_color);
    init_tracing(args.verbose);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            exitcode::SOFTWARE
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("namecast=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("namecast=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<exitcode::ExitCode> {
    let resolve = ResolveOptions {
        format: args.format,
        to: args.to,
        debounce_ms: args.debounce_ms,
    };

    match args.command {
        Some(Command::Watch) => watch::run_watch(resolve).await,
        Some(Command::Providers) => {
            providers::print_providers()?;
            Ok(exitcode::OK)
        }
        Some(Command::Formats) => {
            formats::print_formats()?;
            Ok(exitcode::OK)
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
            Ok(exitcode::OK)
        }
        None => {
            let options = translate::TranslateOptions {
                text: args.text,
                resolve,
                print: args.print,
                copy: args.copy,
                pick: args.pick,
            };
            translate::run_translate(options).await
        }
    }
}
