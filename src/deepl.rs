use crate::config::DeeplConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

/// How much of an error response body gets logged
const ERROR_BODY_EXCERPT: usize = 1000;

#[derive(Debug, Error)]
pub enum DeeplError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to DeepL API at {endpoint}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("DeepL API error ({status}) at {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse DeepL response")]
    Parse(#[source] reqwest::Error),

    #[error("DeepL response contained no translations")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Minimal client for the DeepL `/v2/translate` endpoint
#[derive(Debug, Clone)]
pub struct DeeplClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl DeeplClient {
    pub fn new(config: &DeeplConfig) -> Result<Self, DeeplError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DeeplError::Client)?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Translate `text` into `target_lang` (a DeepL code such as `EN-US`).
    ///
    /// A single attempt: any transport failure or non-success status is
    /// returned to the caller.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, DeeplError> {
        debug!(
            "Sending {} chars to DeepL for {}",
            text.chars().count(),
            target_lang
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[("text", text), ("target_lang", target_lang)])
            .send()
            .await
            .map_err(|source| DeeplError::Request {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();

            error!("DeepL endpoint: {}", self.endpoint);
            error!("DeepL error: {}", status);
            error!("Response: {}", excerpt);

            return Err(DeeplError::Status {
                endpoint: self.endpoint.clone(),
                status,
                body: excerpt,
            });
        }

        let parsed: TranslateResponse = response.json().await.map_err(DeeplError::Parse)?;

        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or(DeeplError::Empty)
    }
}
