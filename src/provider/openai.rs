use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompt::build_system_prompt;
use super::{ProviderError, Translator};

/// Characters GLM tends to leave around its answers.
const GLM_STRIPPED: &[char] = &[
    '.', ',', '#', '!', '$', '%', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~', '(', ')',
    '"', '\'',
];

/// Vendors that speak the OpenAI chat completions dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFlavor {
    OpenAi,
    Deepseek,
    Glm,
}

impl ChatFlavor {
    pub const fn default_endpoint(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Deepseek => "https://api.deepseek.com/v1",
            Self::Glm => "https://open.bigmodel.cn/api/paas/v4",
        }
    }

    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Deepseek => "deepseek-chat",
            Self::Glm => "glm-4-flash",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Deepseek => "Deepseek",
            Self::Glm => "GLM",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Translator backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionTranslator {
    client: Client,
    flavor: ChatFlavor,
    endpoint: String,
    model: String,
    api_key: String,
    target_language: String,
}

impl ChatCompletionTranslator {
    pub fn new(client: Client, flavor: ChatFlavor, api_key: String) -> Self {
        Self {
            client,
            flavor,
            endpoint: flavor.default_endpoint().to_string(),
            model: flavor.default_model().to_string(),
            api_key,
            target_language: "en".to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_target_language(mut self, target_language: impl Into<String>) -> Self {
        self.target_language = target_language.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for ChatCompletionTranslator {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let system_prompt = build_system_prompt(&self.target_language);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(text),
                },
            ],
            stream: false,
            temperature: 0.3,
        };

        let url = self.url();
        debug!(provider = self.flavor.name(), %url, model = %self.model, "sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let body: ChatCompletionResponse = response.json().await?;
        let content = extract_content(body).ok_or_else(|| {
            ProviderError::InvalidResponse(format!("{} returned no choices", self.flavor.name()))
        })?;

        Ok(match self.flavor {
            ChatFlavor::Glm => strip_glm_punctuation(&content),
            ChatFlavor::OpenAi | ChatFlavor::Deepseek => content,
        })
    }
}

fn extract_content(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default().trim().to_string())
}

fn strip_glm_punctuation(text: &str) -> String {
    text.chars().filter(|c| !GLM_STRIPPED.contains(c)).collect()
}
