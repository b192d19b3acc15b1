//! Configure command handler for enabled providers and defaults.

use anyhow::{Result, bail};
use inquire::{MultiSelect, Select, Text};

use super::providers::{ProviderStatus, registry_for};
use crate::config::{ConfigFile, ConfigManager};
use crate::format::{CaseFormat, FORMATS};
use crate::provider::ProviderId;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current settings and returns. Otherwise walks the
/// user through enabling providers and picking the default format and
/// target language.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    if show {
        print_current(&config);
        return Ok(());
    }

    let Some(()) = handle_prompt_cancellation(|| edit(&mut config))? else {
        return Ok(());
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );
    print_credential_hints(&config)?;

    Ok(())
}

fn edit(config: &mut ConfigFile) -> Result<()> {
    print_current(config);

    let enabled = select_providers(config)?;
    if enabled.is_empty() {
        bail!("At least one provider must be enabled");
    }
    for id in ProviderId::ALL {
        config.set_enabled(id, enabled.contains(&id));
    }

    config.namecast.format = Some(select_format(config.namecast.format.unwrap_or_default())?);

    let to = Text::new("Target language:")
        .with_default(config.namecast.to.as_deref().unwrap_or("en"))
        .with_help_message("Language code passed to every provider, e.g. en")
        .prompt()?;
    if to.trim().is_empty() {
        bail!("Target language cannot be empty");
    }
    config.namecast.to = Some(to.trim().to_string());

    Ok(())
}

fn select_providers(config: &ConfigFile) -> Result<Vec<ProviderId>> {
    let titles: Vec<&str> = ProviderId::ALL.iter().map(|id| id.title()).collect();
    let defaults: Vec<usize> = ProviderId::ALL
        .iter()
        .enumerate()
        .filter(|(_, id)| config.is_enabled(**id))
        .map(|(index, _)| index)
        .collect();

    let selected = MultiSelect::new("Enabled providers:", titles)
        .with_default(&defaults)
        .raw_prompt()?;

    Ok(selected
        .into_iter()
        .map(|option| ProviderId::ALL[option.index])
        .collect())
}

fn select_format(current: CaseFormat) -> Result<CaseFormat> {
    let options: Vec<String> = FORMATS
        .iter()
        .map(|info| format!("{} - {}", info.key, info.description))
        .collect();
    let starting = FORMATS
        .iter()
        .position(|info| info.format == current)
        .unwrap_or(0);

    let selected = Select::new("Default format:", options)
        .with_starting_cursor(starting)
        .raw_prompt()?;

    Ok(FORMATS[selected.index].format)
}

fn print_current(config: &ConfigFile) {
    println!("{}", Style::header("Current settings"));
    println!(
        "  {}     {}",
        Style::label("format"),
        Style::value(config.namecast.format.unwrap_or_default())
    );
    println!(
        "  {}         {}",
        Style::label("to"),
        Style::value(config.namecast.to.as_deref().unwrap_or("en"))
    );
    println!(
        "  {} {}",
        Style::label("debounce_ms"),
        config
            .namecast
            .debounce_ms
            .map_or_else(|| Style::secondary("(by provider count)"), Style::value)
    );
    println!(
        "  {} {}",
        Style::label("http_proxy "),
        config
            .namecast
            .http_proxy
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    let enabled: Vec<&str> = ProviderId::ALL
        .into_iter()
        .filter(|id| config.is_enabled(*id))
        .map(ProviderId::key)
        .collect();
    println!(
        "  {}  {}",
        Style::label("providers"),
        if enabled.is_empty() {
            Style::secondary("(none)")
        } else {
            Style::value(enabled.join(", "))
        }
    );
    println!();
}

fn print_credential_hints(config: &ConfigFile) -> Result<()> {
    let registry = registry_for(config)?;
    for id in ProviderId::ALL {
        if let ProviderStatus::Misconfigured(message) = ProviderStatus::of(&registry, id) {
            println!(
                "{} {}: {} (see [providers.{}])",
                Style::warning("!"),
                id.title(),
                message,
                id.key()
            );
        }
    }
    Ok(())
}
