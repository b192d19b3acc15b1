//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Format listing command handler.
pub mod formats;

/// Provider listing command handler.
pub mod providers;

/// One-shot translation command handler.
pub mod translate;

/// Live, debounced translation of stdin lines.
pub mod watch;

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::orchestrator::Orchestrator;
use crate::provider::Registry;

/// Loads config.toml, merges CLI overrides and builds the orchestrator.
pub(crate) fn load_orchestrator(
    options: &ResolveOptions,
) -> Result<(ResolvedConfig, Orchestrator)> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    let resolved = resolve_config(options, &config_file)?;
    let registry = Registry::from_config(&config_file, &resolved)?;
    let orchestrator = Orchestrator::new(registry, resolved.format);
    Ok((resolved, orchestrator))
}
