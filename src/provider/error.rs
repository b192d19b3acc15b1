use thiserror::Error;

/// Errors surfaced by a provider adapter.
///
/// The orchestrator turns every variant into a `Failed` state using its
/// `Display` text, so messages are written for the end user.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Missing credential or invalid setting for an enabled provider.
    #[error("{0}")]
    Configuration(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited")]
    RateLimited,

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The vendor answered but reported an error in its payload.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Maps a non-success HTTP status to an error, reading the body for context.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Self::RateLimited;
        }
        let body = response.text().await.unwrap_or_default();
        Self::Status {
            status: status.as_u16(),
            body: body.trim().to_string(),
        }
    }
}
