// ABOUTME: HTTP client for the natural-language completion backend
// ABOUTME: Handles API requests, timeouts, and response text extraction

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const COMPLETION_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TEMPERATURE: f32 = 0.7;

// The backend call must resolve in bounded time; request creation falls back
// to the heuristic synthesizer rather than hang
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type CompletionResult<T> = Result<T, CompletionError>;

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    content_type: String,
    text: String,
}

/// Client for single-shot document generation calls to the completion backend
pub struct CompletionClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl CompletionClient {
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new client instance
    /// API key is fetched from ANTHROPIC_API_KEY environment variable
    /// Model can be overridden with ANTHROPIC_MODEL environment variable
    pub fn new() -> Self {
        let api_key = env::var("ANTHROPIC_API_KEY").ok();
        if api_key.is_none() {
            info!("ANTHROPIC_API_KEY not set - documents will use heuristic synthesis");
        }

        let model = env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom completion model: {}", model);
        }

        Self {
            client: Self::create_client(),
            api_key,
            model,
            base_url: COMPLETION_API_URL.to_string(),
        }
    }

    /// Creates a new client instance with a specific API key
    pub fn with_api_key(api_key: String) -> Self {
        let model = env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            client: Self::create_client(),
            api_key: Some(api_key),
            model,
            base_url: COMPLETION_API_URL.to_string(),
        }
    }

    /// Creates a client with no API key regardless of environment; every
    /// completion call returns `NoApiKey` so callers stay on the heuristic path
    pub fn unconfigured() -> Self {
        Self {
            client: Self::create_client(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: COMPLETION_API_URL.to_string(),
        }
    }

    /// Override the backend URL, used by tests against a mock server
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Whether an API key is available; without one every generation call
    /// short-circuits to the heuristic path
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single completion call and returns the raw response text
    pub async fn complete(
        &self,
        prompt: String,
        system_prompt: Option<String>,
    ) -> CompletionResult<String> {
        let api_key = self.api_key.as_ref().ok_or(CompletionError::NoApiKey)?;

        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            system: system_prompt,
        };

        info!(
            "Making completion request: model={}, timeout={}s",
            request.model, REQUEST_TIMEOUT_SECS
        );

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(
                        "Completion request timed out after {} seconds",
                        REQUEST_TIMEOUT_SECS
                    );
                    CompletionError::ApiError(format!(
                        "Request timed out after {} seconds",
                        REQUEST_TIMEOUT_SECS
                    ))
                } else if e.is_connect() {
                    error!("Failed to connect to completion backend: {}", e);
                    CompletionError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Completion request failed: {}", e);
                    CompletionError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Completion backend error: {} - {}", status, error_text);
            return Err(CompletionError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::ParseError(e.to_string()))?;

        let text = completion
            .content
            .first()
            .ok_or(CompletionError::InvalidResponse)?
            .text
            .clone();

        Ok(text)
    }
}

impl Default for CompletionClient {
    fn default() -> Self {
        Self::new()
    }
}
