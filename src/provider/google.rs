use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use super::{ProviderError, Translator};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translator backed by the public Google Translate `gtx` endpoint.
///
/// No credentials are needed; the source language is auto-detected.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    target_language: String,
}

impl GoogleTranslator {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            target_language: "en".to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_target_language(mut self, target_language: impl Into<String>) -> Self {
        self.target_language = target_language.into();
        self
    }

    fn request_url(&self, text: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::Configuration(format!("Invalid Google endpoint: {e}")))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let url = self.request_url(text)?;
        debug!(endpoint = %self.endpoint, "sending google translate request");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let body: Value = response.json().await?;
        parse_segments(&body)
    }
}

/// Joins the translated segments of a `translate_a/single` payload.
///
/// The payload looks like `[[["translated", "source", ...], ...], ...]`.
fn parse_segments(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::InvalidResponse("missing translation segments".into()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}
