use anyhow::{Context, Result};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{
    ChatCompletionTranslator, ChatFlavor, GoogleTranslator, ProviderId, TencentTranslator,
    Translator,
};
use crate::config::{ConfigFile, ProviderSettings, ResolvedConfig};

/// Per-request timeout for every adapter's HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How a registry slot resolves when a dispatch reaches it.
#[derive(Clone)]
pub enum Backend {
    /// Turned off in configuration; the slot becomes `Skipped`.
    Disabled,
    /// Enabled but unusable; the slot becomes `Failed` with this message.
    Misconfigured(String),
    /// Enabled and callable.
    Ready(Arc<dyn Translator>),
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Misconfigured(message) => f.debug_tuple("Misconfigured").field(message).finish(),
            Self::Ready(_) => f.write_str("Ready"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub id: ProviderId,
    pub backend: Backend,
}

/// The fixed provider registry.
///
/// Always holds exactly one entry per [`ProviderId`], in declaration order.
/// Built once per process and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry with every provider disabled.
    pub fn new() -> Self {
        Self {
            entries: ProviderId::ALL
                .into_iter()
                .map(|id| RegistryEntry {
                    id,
                    backend: Backend::Disabled,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn with_backend(mut self, id: ProviderId, backend: Backend) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.backend = backend;
        }
        self
    }

    #[must_use]
    pub fn with_translator(self, id: ProviderId, translator: impl Translator + 'static) -> Self {
        self.with_backend(id, Backend::Ready(Arc::new(translator)))
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn backend(&self, id: ProviderId) -> &Backend {
        // entries always cover every id
        &self.entries[id as usize].backend
    }

    /// Number of providers that are not disabled.
    pub fn enabled_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !matches!(entry.backend, Backend::Disabled))
            .count()
    }

    /// Builds the registry from the config file snapshot.
    ///
    /// Missing credentials do not fail the build; they turn into
    /// [`Backend::Misconfigured`] so one bad provider never blocks the others.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. invalid proxy URL).
    pub fn from_config(config: &ConfigFile, resolved: &ResolvedConfig) -> Result<Self> {
        let client = build_client(resolved.http_proxy.as_deref())?;

        let mut registry = Self::new();
        for id in ProviderId::ALL {
            if !config.is_enabled(id) {
                continue;
            }
            let backend = build_backend(
                id,
                &config.provider(id),
                client.clone(),
                &resolved.target_language,
            );
            registry = registry.with_backend(id, backend);
        }
        Ok(registry)
    }
}

fn build_client(http_proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
    if let Some(proxy) = http_proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .with_context(|| format!("Invalid http_proxy URL: {proxy}"))?;
        builder = builder.proxy(proxy);
    }
    builder.build().context("Failed to build HTTP client")
}

fn build_backend(
    id: ProviderId,
    settings: &ProviderSettings,
    client: Client,
    target_language: &str,
) -> Backend {
    match id {
        ProviderId::Google => {
            let mut translator = GoogleTranslator::new(client).with_target_language(target_language);
            if let Some(endpoint) = &settings.endpoint {
                translator = translator.with_endpoint(endpoint);
            }
            Backend::Ready(Arc::new(translator))
        }
        ProviderId::OpenAi | ProviderId::Deepseek | ProviderId::Glm => {
            let flavor = match id {
                ProviderId::OpenAi => ChatFlavor::OpenAi,
                ProviderId::Deepseek => ChatFlavor::Deepseek,
                _ => ChatFlavor::Glm,
            };
            let Some(api_key) = settings.get_api_key() else {
                return Backend::Misconfigured(format!(
                    "Please configure {} API key first",
                    vendor_name(id)
                ));
            };
            let mut translator = ChatCompletionTranslator::new(client, flavor, api_key)
                .with_target_language(target_language);
            if let Some(endpoint) = &settings.endpoint {
                translator = translator.with_endpoint(endpoint);
            }
            if let Some(model) = &settings.model {
                translator = translator.with_model(model);
            }
            Backend::Ready(Arc::new(translator))
        }
        ProviderId::Tencent => {
            let (Some(secret_id), Some(secret_key)) =
                (settings.get_secret_id(), settings.get_secret_key())
            else {
                return Backend::Misconfigured(
                    "Please configure Tencent SecretId and SecretKey first".to_string(),
                );
            };
            let mut translator = TencentTranslator::new(client, secret_id, secret_key)
                .with_target_language(target_language);
            if let Some(endpoint) = &settings.endpoint {
                translator = translator.with_endpoint(endpoint);
            }
            if let Some(region) = &settings.region {
                translator = translator.with_region(region);
            }
            Backend::Ready(Arc::new(translator))
        }
    }
}

const fn vendor_name(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Google => "Google",
        ProviderId::OpenAi => "OpenAI",
        ProviderId::Deepseek => "Deepseek",
        ProviderId::Glm => "GLM",
        ProviderId::Tencent => "Tencent",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ResolveOptions, resolve_config};

    fn resolved(config: &ConfigFile) -> ResolvedConfig {
        resolve_config(&ResolveOptions::default(), config).unwrap()
    }

    #[test]
    fn test_new_registry_covers_every_provider_in_order() {
        let registry = Registry::new();
        let ids: Vec<_> = registry.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, ProviderId::ALL);
        assert_eq!(registry.enabled_count(), 0);
    }

    #[test]
    fn test_default_config_enables_only_google() {
        let config = ConfigFile::default();
        let registry = Registry::from_config(&config, &resolved(&config)).unwrap();

        assert!(matches!(registry.backend(ProviderId::Google), Backend::Ready(_)));
        assert!(matches!(registry.backend(ProviderId::OpenAi), Backend::Disabled));
        assert_eq!(registry.enabled_count(), 1);
    }

    #[test]
    fn test_missing_credentials_become_misconfigured() {
        let mut config = ConfigFile::default();
        config.set_enabled(ProviderId::Glm, true);
        config.set_enabled(ProviderId::Tencent, true);
        let registry = Registry::from_config(&config, &resolved(&config)).unwrap();

        let Backend::Misconfigured(message) = registry.backend(ProviderId::Glm) else {
            panic!("expected misconfigured GLM backend");
        };
        assert_eq!(message, "Please configure GLM API key first");
        assert!(matches!(
            registry.backend(ProviderId::Tencent),
            Backend::Misconfigured(_)
        ));
        assert_eq!(registry.enabled_count(), 3);
    }

    #[test]
    fn test_configured_chat_provider_is_ready() {
        let mut config = ConfigFile::default();
        config.set_enabled(ProviderId::Deepseek, true);
        config.providers.get_mut("deepseek").unwrap().api_key = Some("sk-test".to_string());
        let registry = Registry::from_config(&config, &resolved(&config)).unwrap();

        assert!(matches!(
            registry.backend(ProviderId::Deepseek),
            Backend::Ready(_)
        ));
    }
}
