//! Translation providers and the registry that holds them.
//!
//! Each provider is reduced to the [`Translator`] contract: one text in, one
//! translated string out, or a [`ProviderError`]. Whether a provider is called
//! at all is decided by the orchestrator from the [`Registry`], never by the
//! adapter itself.

mod error;
mod google;
mod openai;
mod prompt;
mod registry;
mod tencent;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::ProviderError;
pub use google::GoogleTranslator;
pub use openai::{ChatCompletionTranslator, ChatFlavor};
pub use registry::{Backend, Registry, RegistryEntry};
pub use tencent::TencentTranslator;

/// The closed set of supported translation vendors.
///
/// Declaration order is the registry order and the display tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
    Deepseek,
    Glm,
    Tencent,
}

impl ProviderId {
    pub const ALL: [Self; 5] = [
        Self::Google,
        Self::OpenAi,
        Self::Deepseek,
        Self::Glm,
        Self::Tencent,
    ];

    /// Key used in config.toml (`[providers.<key>]`).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
            Self::Deepseek => "deepseek",
            Self::Glm => "glm",
            Self::Tencent => "tencent",
        }
    }

    /// Human-readable title shown next to each result.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Google => "Google Translate",
            Self::OpenAi => "OpenAI Translate",
            Self::Deepseek => "Deepseek Translate",
            Self::Glm => "GLM Translate",
            Self::Tencent => "Tencent Translate",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A provider key that names no supported vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = ProviderId::ALL.iter().map(|id| id.key()).collect();
        write!(
            f,
            "Unknown provider '{}'\n\nAvailable providers: {}",
            self.0,
            keys.join(", ")
        )
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// A single translation backend.
///
/// Implementations must fail with a descriptive [`ProviderError`] on transport,
/// auth or quota problems. They do not check whether they are enabled.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;
}
