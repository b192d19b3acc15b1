//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, ResolveOptions, resolve_config};
use crate::provider::{Backend, ProviderId, Registry};
use crate::ui::Style;

/// Readiness of one provider, read off the registry built from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Disabled,
    Ready,
    /// Enabled but unusable, with the registry's reason.
    Misconfigured(String),
}

impl ProviderStatus {
    pub fn of(registry: &Registry, id: ProviderId) -> Self {
        match registry.backend(id) {
            Backend::Disabled => Self::Disabled,
            Backend::Misconfigured(message) => Self::Misconfigured(message.clone()),
            Backend::Ready(_) => Self::Ready,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Disabled => Style::secondary("disabled"),
            Self::Ready => Style::success("enabled"),
            Self::Misconfigured(message) => Style::warning(format!("enabled, {message}")),
        }
    }
}

/// Builds the registry the translate commands would use for `config`.
pub(crate) fn registry_for(config: &ConfigFile) -> Result<Registry> {
    let resolved = resolve_config(&ResolveOptions::default(), config)?;
    Registry::from_config(config, &resolved)
}

/// Prints every provider with its enabled and credential state.
pub fn print_providers() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    let registry = registry_for(&config)?;

    println!("{}\n", Style::header("Translation providers"));
    for id in ProviderId::ALL {
        let status = ProviderStatus::of(&registry, id);
        println!(
            "  {} {:<20} {}",
            Style::label(format!("{:<10}", id.key())),
            id.title(),
            status.describe()
        );
        if let Some(model) = config.provider(id).model {
            println!("    model: {}", Style::value(model));
        }
    }
    println!(
        "\n{}",
        Style::hint(format!(
            "Edit {} or run 'namecast configure' to change providers.",
            manager.config_path().display()
        ))
    );

    Ok(())
}
