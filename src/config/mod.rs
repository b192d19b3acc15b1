//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, Defaults, ProviderSettings, ResolveOptions, ResolvedConfig,
    resolve_config,
};
