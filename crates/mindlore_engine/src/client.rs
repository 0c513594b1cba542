use std::time::Duration;

use mindlore_logging::{mindlore_debug, mindlore_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::{FailureKind, GenerationError};

const SUGGESTIONS_PATH: &str = "/api/suggestions";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and optional path prefix of the backend.
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Requests content-angle suggestions for a topic title.
    async fn generate(&self, topic: &str) -> Result<Vec<String>, GenerationError>;
}

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    suggestions: Vec<String>,
}

/// `POST {api_base}/api/suggestions` with `{"topic": ...}`.
#[derive(Debug, Clone)]
pub struct HttpSuggestionClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpSuggestionClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, GenerationError> {
        let endpoint = suggestions_endpoint(&settings.api_base)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenerationError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

fn suggestions_endpoint(api_base: &str) -> Result<reqwest::Url, GenerationError> {
    let raw = format!("{}{}", api_base.trim().trim_end_matches('/'), SUGGESTIONS_PATH);
    reqwest::Url::parse(&raw)
        .map_err(|err| GenerationError::new(FailureKind::InvalidUrl, format!("{raw}: {err}")))
}

#[async_trait::async_trait]
impl SuggestionClient for HttpSuggestionClient {
    async fn generate(&self, topic: &str) -> Result<Vec<String>, GenerationError> {
        let body = serde_json::json!({ "topic": topic }).to_string();
        mindlore_debug!("POST {} topic_len={}", self.endpoint, topic.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            mindlore_warn!("Suggestion request rejected: {}", status);
            return Err(GenerationError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: SuggestionResponse = serde_json::from_slice(&bytes)
            .map_err(|err| GenerationError::new(FailureKind::InvalidResponse, err.to_string()))?;
        Ok(parsed.suggestions)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        return GenerationError::new(FailureKind::Timeout, err.to_string());
    }
    GenerationError::new(FailureKind::Network, err.to_string())
}
