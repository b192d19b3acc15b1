use async_trait::async_trait;
use chrono::DateTime;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{ProviderError, Translator};

const HOST: &str = "tmt.tencentcloudapi.com";
const SERVICE: &str = "tmt";
const ACTION: &str = "TextTranslate";
const VERSION: &str = "2018-03-21";
const ALGORITHM: &str = "TC3-HMAC-SHA256";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub const DEFAULT_REGION: &str = "ap-guangzhou";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TextTranslateRequest<'a> {
    source_text: &'a str,
    source: &'a str,
    target: &'a str,
    project_id: u32,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: TextTranslateResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TextTranslateResponse {
    target_text: Option<String>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    code: String,
    message: String,
}

/// Translator backed by Tencent Machine Translation (`TextTranslate`).
pub struct TencentTranslator {
    client: Client,
    endpoint: String,
    secret_id: String,
    secret_key: String,
    region: String,
    target_language: String,
}

impl TencentTranslator {
    pub fn new(client: Client, secret_id: String, secret_key: String) -> Self {
        Self {
            client,
            endpoint: format!("https://{HOST}"),
            secret_id,
            secret_key,
            region: DEFAULT_REGION.to_string(),
            target_language: "en".to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    #[must_use]
    pub fn with_target_language(mut self, target_language: impl Into<String>) -> Self {
        self.target_language = target_language.into();
        self
    }
}

#[async_trait]
impl Translator for TencentTranslator {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let payload = serde_json::to_string(&TextTranslateRequest {
            source_text: text,
            source: "auto",
            target: &self.target_language,
            project_id: 0,
        })
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let timestamp = chrono::Utc::now().timestamp();
        let authorization = sign(&self.secret_id, &self.secret_key, &payload, timestamp);
        debug!(region = %self.region, "sending tencent TextTranslate request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", authorization)
            .header("Content-Type", CONTENT_TYPE)
            .header("Host", HOST)
            .header("X-TC-Action", ACTION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Version", VERSION)
            .header("X-TC-Region", &self.region)
            .body(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let envelope: Envelope = response.json().await?;
        into_result(envelope.response)
    }
}

fn into_result(response: TextTranslateResponse) -> Result<String, ProviderError> {
    if let Some(error) = response.error {
        if error.code.starts_with("RequestLimitExceeded") {
            return Err(ProviderError::RateLimited);
        }
        return Err(ProviderError::Api {
            code: error.code,
            message: error.message,
        });
    }
    response
        .target_text
        .ok_or_else(|| ProviderError::InvalidResponse("missing TargetText".into()))
}

/// Builds the TC3-HMAC-SHA256 `Authorization` header value.
fn sign(secret_id: &str, secret_key: &str, payload: &str, timestamp: i64) -> String {
    let date = DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string();

    let signed_headers = "content-type;host";
    let canonical_request = format!(
        "POST\n/\n\ncontent-type:{CONTENT_TYPE}\nhost:{HOST}\n\n{signed_headers}\n{}",
        sha256_hex(payload.as_bytes())
    );

    let credential_scope = format!("{date}/{SERVICE}/tc3_request");
    let string_to_sign = format!(
        "{ALGORITHM}\n{timestamp}\n{credential_scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(format!("TC3{secret_key}").as_bytes(), date.as_bytes());
    let secret_service = hmac_sha256(&secret_date, SERVICE.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    format!(
        "{ALGORITHM} Credential={secret_id}/{credential_scope}, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
