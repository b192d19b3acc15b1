use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::format::CaseFormat;
use crate::paths;
use crate::provider::ProviderId;

/// Default settings in the `[namecast]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Default case format.
    pub format: Option<CaseFormat>,
    /// Target language code passed to every provider.
    pub to: Option<String>,
    /// Debounce window override for live input, in milliseconds.
    pub debounce_ms: Option<u64>,
    /// HTTP(S) proxy applied to every provider request.
    pub http_proxy: Option<String>,
}

/// Settings for a single provider (`[providers.<key>]`).
///
/// Secrets can be given inline or through an environment variable; the
/// environment variable wins when both are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Whether the provider is called at all.
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_id_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ProviderSettings {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key_env.as_deref(), self.api_key.as_ref())
    }

    pub fn get_secret_id(&self) -> Option<String> {
        resolve_secret(self.secret_id_env.as_deref(), self.secret_id.as_ref())
    }

    pub fn get_secret_key(&self) -> Option<String> {
        resolve_secret(self.secret_key_env.as_deref(), self.secret_key.as_ref())
    }
}

fn resolve_secret(env_var: Option<&str>, inline: Option<&String>) -> Option<String> {
    if let Some(env_var) = env_var
        && let Ok(value) = std::env::var(env_var)
        && !value.is_empty()
    {
        return Some(value);
    }
    inline.filter(|value| !value.is_empty()).cloned()
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/namecast/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub namecast: Defaults,
    /// Provider settings keyed by provider key (`google`, `openai`, ...).
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderSettings>,
}

impl ConfigFile {
    /// Settings for `id`, or empty settings when the section is absent.
    pub fn provider(&self, id: ProviderId) -> ProviderSettings {
        self.providers.get(id.key()).cloned().unwrap_or_default()
    }

    /// Google needs no credentials and is on unless disabled; every other
    /// provider must be switched on explicitly.
    pub fn is_enabled(&self, id: ProviderId) -> bool {
        self.providers
            .get(id.key())
            .and_then(|settings| settings.enabled)
            .unwrap_or(id == ProviderId::Google)
    }

    pub fn set_enabled(&mut self, id: ProviderId, enabled: bool) {
        self.providers.entry(id.key().to_string()).or_default().enabled = Some(enabled);
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub format: CaseFormat,
    pub target_language: String,
    /// Explicit debounce window; `None` means pick by provider count.
    pub debounce: Option<Duration>,
    pub http_proxy: Option<String>,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub format: Option<CaseFormat>,
    pub to: Option<String>,
    pub debounce_ms: Option<u64>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values.
///
/// # Errors
///
/// Returns an error if the file names an unknown provider or an empty
/// target language.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let unknown: Vec<&str> = config_file
        .providers
        .keys()
        .map(String::as_str)
        .filter(|key| key.parse::<ProviderId>().is_err())
        .collect();
    if !unknown.is_empty() {
        let available: Vec<_> = ProviderId::ALL.iter().map(|id| id.key()).collect();
        bail!(
            "Unknown provider(s) in config: {}\n\n\
             Available providers:\n  \
             - {}",
            unknown.join(", "),
            available.join("\n  - ")
        );
    }

    let format = options
        .format
        .or(config_file.namecast.format)
        .unwrap_or_default();

    let target_language = options
        .to
        .as_ref()
        .or(config_file.namecast.to.as_ref())
        .cloned()
        .unwrap_or_else(|| "en".to_string());

    if target_language.trim().is_empty() {
        bail!(
            "Invalid configuration: 'to' (target language) is empty\n\n\
             Set it via:\n  \
             - CLI option: namecast --to <lang>\n  \
             - Config file: ~/.config/namecast/config.toml"
        );
    }

    let debounce = options
        .debounce_ms
        .or(config_file.namecast.debounce_ms)
        .map(Duration::from_millis);

    let http_proxy = config_file
        .namecast
        .http_proxy
        .as_ref()
        .map(|proxy| proxy.trim().to_string())
        .filter(|proxy| !proxy.is_empty());

    Ok(ResolvedConfig {
        format,
        target_language,
        debounce,
        http_proxy,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/namecast/config.toml`
    /// or `~/.config/namecast/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager for an explicit config file path.
    pub fn at(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, falling back to defaults only when it does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::at(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut config = ConfigFile {
            namecast: Defaults {
                format: Some(CaseFormat::Snake),
                to: Some("en".to_string()),
                debounce_ms: Some(750),
                http_proxy: None,
            },
            ..ConfigFile::default()
        };
        config.set_enabled(ProviderId::OpenAi, true);
        config
            .providers
            .get_mut("openai")
            .unwrap()
            .api_key_env = Some("OPENAI_API_KEY".to_string());

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.namecast.format, Some(CaseFormat::Snake));
        assert_eq!(loaded.namecast.debounce_ms, Some(750));
        assert!(loaded.is_enabled(ProviderId::OpenAi));
        assert_eq!(
            loaded.provider(ProviderId::OpenAi).api_key_env.as_deref(),
            Some("OPENAI_API_KEY")
        );
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        let config = manager.load_or_default().unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[namecast\nformat = ").unwrap();

        let err = manager.load_or_default().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_documented_example() {
        let config: ConfigFile = toml::from_str(
            r#"
            [namecast]
            format = "camel"
            http_proxy = "http://127.0.0.1:7890"

            [providers.google]
            enabled = false

            [providers.tencent]
            enabled = true
            secret_id = "id"
            secret_key = "key"
            region = "ap-shanghai"
            "#,
        )
        .unwrap();

        assert_eq!(config.namecast.format, Some(CaseFormat::Camel));
        assert!(!config.is_enabled(ProviderId::Google));
        assert!(config.is_enabled(ProviderId::Tencent));
        assert!(!config.is_enabled(ProviderId::Glm));
        assert_eq!(
            config.provider(ProviderId::Tencent).region.as_deref(),
            Some("ap-shanghai")
        );
    }

    #[test]
    fn test_default_enablement() {
        let config = ConfigFile::default();
        assert!(config.is_enabled(ProviderId::Google));
        for id in [
            ProviderId::OpenAi,
            ProviderId::Deepseek,
            ProviderId::Glm,
            ProviderId::Tencent,
        ] {
            assert!(!config.is_enabled(id));
        }
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_env() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::set_var("NAMECAST_TEST_API_KEY", "test-key-value");
        }

        let settings = ProviderSettings {
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("NAMECAST_TEST_API_KEY".to_string()),
            ..ProviderSettings::default()
        };

        // Environment variable takes priority
        assert_eq!(settings.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("NAMECAST_TEST_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_get_api_key_fallback() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("NAMECAST_NONEXISTENT_KEY");
        }

        let settings = ProviderSettings {
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("NAMECAST_NONEXISTENT_KEY".to_string()),
            ..ProviderSettings::default()
        };

        assert_eq!(settings.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_empty_inline_secret_counts_as_missing() {
        let settings = ProviderSettings {
            secret_key: Some(String::new()),
            ..ProviderSettings::default()
        };
        assert_eq!(settings.get_secret_key(), None);
    }

    // resolve_config tests

    #[test]
    fn test_resolve_config_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

        assert_eq!(resolved.format, CaseFormat::Constant);
        assert_eq!(resolved.target_language, "en");
        assert!(resolved.debounce.is_none());
        assert!(resolved.http_proxy.is_none());
    }

    #[test]
    fn test_resolve_config_cli_overrides_file() {
        let config = ConfigFile {
            namecast: Defaults {
                format: Some(CaseFormat::Snake),
                to: Some("ja".to_string()),
                debounce_ms: Some(300),
                http_proxy: Some("  ".to_string()),
            },
            ..ConfigFile::default()
        };
        let options = ResolveOptions {
            format: Some(CaseFormat::Camel),
            to: None,
            debounce_ms: Some(50),
        };

        let resolved = resolve_config(&options, &config).unwrap();

        assert_eq!(resolved.format, CaseFormat::Camel);
        assert_eq!(resolved.target_language, "ja");
        assert_eq!(resolved.debounce, Some(Duration::from_millis(50)));
        assert!(resolved.http_proxy.is_none());
    }

    #[test]
    fn test_resolve_config_unknown_provider() {
        let mut config = ConfigFile::default();
        config
            .providers
            .insert("bing".to_string(), ProviderSettings::default());

        let err = resolve_config(&ResolveOptions::default(), &config).unwrap_err();
        assert!(err.to_string().contains("Unknown provider(s) in config: bing"));
    }

    #[test]
    fn test_resolve_config_empty_target_language() {
        let options = ResolveOptions {
            to: Some(" ".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("target language"));
    }
}
