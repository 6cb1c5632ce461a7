// Generation Provider Service
// Gemini generateContent client behind the TextGenerator seam

use crate::models::FailureKind;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

pub const GEMINI_DEFAULT_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "TEXT_HUMANIZER_GEMINI_API_KEY"];
pub const API_URL_ENV_VAR: &str = "GEMINI_API_URL";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Missing content in response")]
    MissingContent,
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("Gemini API key not configured (set GEMINI_API_KEY or run `text-humanizer config set-key`)")]
    MissingApiKey,
    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

impl ProviderError {
    /// Configuration problems are fixed locally; service problems happened
    /// after the call was attempted.
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::MissingApiKey | ProviderError::InvalidConfig(_) => {
                FailureKind::Configuration
            }
            ProviderError::HttpError(_)
            | ProviderError::ApiError { .. }
            | ProviderError::MissingContent
            | ProviderError::JsonError(_) => FailureKind::Service,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
    pub content: String,
    pub latency_ms: i64,
}

/// External text generation: one prompt in, one text blob out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ChatResult, ProviderError>;

    fn model_name(&self) -> &str;
}

/// Everything the client needs, resolved up front by the caller
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub proxy: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_DEFAULT_MODEL.to_string(),
            base_url: GEMINI_DEFAULT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

impl ProviderSettings {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

pub struct ProviderClient {
    client: Client,
    settings: ProviderSettings,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .field("has_api_key", &self.settings.api_key.is_some())
            .finish()
    }
}

impl ProviderClient {
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(settings.timeout_secs));
        if let Some(proxy_url) = settings.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| ProviderError::InvalidConfig(format!("proxy '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    async fn call_gemini_api(&self, api_key: &str, prompt: &str) -> Result<ChatResult, ProviderError> {
        let request = serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}]
        });

        let url = self.endpoint();
        debug!("[PROVIDER] POST {} prompt_chars={}", url, prompt.chars().count());
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::JsonError(e.to_string()))?;

        let content = extract_gemini_text(&data)?;
        info!(
            "[PROVIDER] Gemini ok model={} latency_ms={} chars={}",
            self.settings.model,
            latency_ms,
            content.chars().count()
        );

        Ok(ChatResult { content, latency_ms })
    }
}

#[async_trait]
impl TextGenerator for ProviderClient {
    async fn generate(&self, prompt: &str) -> Result<ChatResult, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;
        self.call_gemini_api(api_key, prompt).await
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

/// Pull the generated text out of a generateContent response:
/// `{"candidates":[{"content":{"parts":[{"text":"..."}]}}]}`
pub fn extract_gemini_text(data: &serde_json::Value) -> Result<String, ProviderError> {
    let parts = data["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(ProviderError::MissingContent)?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

    if text.trim().is_empty() {
        return Err(ProviderError::MissingContent);
    }
    Ok(text)
}

/// API key from the environment, if set
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS.iter().find_map(|name| {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Base URL override from the environment, if set
pub fn api_url_from_env() -> Option<String> {
    env::var(API_URL_ENV_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
