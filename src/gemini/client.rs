use super::types::{Content, GenerateContentRequest, GenerateContentResponse};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors on the outbound path to the generative service
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("request to generative service failed: {0}")]
    Request(String),

    #[error("generative service returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response from generative service: {0}")]
    MalformedResponse(String),

    #[error("generative service returned no text content")]
    EmptyResponse,
}

/// Transport seam for the generative service
///
/// Both the chat and the analysis paths go through this trait, so tests can
/// substitute a scripted backend without touching the network.
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Send ordered contents to the model and return the response text
    async fn generate(&self, model: &str, contents: &[Content]) -> Result<String, TransportError>;
}

/// HTTP client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: Option<&str>) -> Result<Self, TransportError> {
        let base_url = base_url
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, model: &str, contents: &[Content]) -> Result<String, TransportError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = GenerateContentRequest { contents };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(TransportError::Api { status, body: text });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        let reply = parsed
            .candidates
            .first()
            .map(|c| c.content.joined_text())
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(TransportError::EmptyResponse);
        }

        info!("Received {} chars from model {}", reply.len(), model);

        Ok(reply)
    }
}
