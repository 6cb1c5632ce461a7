// Command layer
// Validates input, resolves configuration and drives the analysis pipeline

use crate::models::{AiPreferences, AnalysisMode, AnalysisResult, StyleInfo, WritingStyle};
use crate::services::config_store::{AppConfig, ConfigError, ConfigStore, PROVIDER_NAME};
use crate::services::file_loader::{load_text_file, LoadError};
use crate::services::pipeline::{local_scores, without_generator, AnalysisRequest, Analyzer};
use crate::services::providers::ProviderClient;
use crate::services::session::Session;
use crate::services::text_processor::{count_words, normalize_punctuation};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Text is empty")]
    Empty,
    #[error("Text has {words} words; the limit is {max}")]
    TooLong { words: usize, max: usize },
    #[error("No analysis mode selected")]
    NoModes,
    #[error("Unsupported file type '{0}'")]
    UnsupportedFile(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(LoadError),
}

impl From<LoadError> for ApiError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Unsupported(ext) => ApiError::Input(InputError::UnsupportedFile(ext)),
            other => ApiError::Load(other),
        }
    }
}

/// Per-call overrides; unset fields fall back to the config file
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub modes: Vec<AnalysisMode>,
    pub style: Option<WritingStyle>,
    pub preferences: Option<AiPreferences>,
}

/// Normalize and check text against the configured word limit
pub fn validate_text(text: &str, max_words: usize) -> Result<String, InputError> {
    let normalized = normalize_punctuation(text);
    if normalized.trim().is_empty() {
        return Err(InputError::Empty);
    }
    let words = count_words(&normalized);
    if words > max_words {
        return Err(InputError::TooLong { words, max: max_words });
    }
    Ok(normalized)
}

/// Run the requested modes and fold the outcome into `session`.
/// Per-mode failures are reported inside the returned result.
pub async fn analyze_text(
    store: &ConfigStore,
    session: &mut Session,
    text: &str,
    opts: AnalyzeOptions,
) -> Result<AnalysisResult, ApiError> {
    if opts.modes.is_empty() {
        return Err(InputError::NoModes.into());
    }

    let config = store.load()?;
    let text = validate_text(text, config.max_words)?;
    let style = opts.style.unwrap_or(config.default_style);
    let preferences = opts.preferences.unwrap_or_else(|| config.preferences.clone());

    let request = AnalysisRequest::new(text, &opts.modes)
        .with_style(style)
        .with_preferences(preferences);

    let result = if !request.wants_generation() {
        local_scores(&request)
    } else {
        match ProviderClient::new(config.provider_settings()) {
            Ok(client) => Analyzer::new(client).analyze(&request).await,
            Err(e) => without_generator(&request, &e),
        }
    };
    for failure in &result.errors {
        warn!("[API] {} did not complete: {}", failure.mode, failure.message);
    }

    Ok(session.record(result, style).clone())
}

pub fn list_styles() -> Vec<StyleInfo> {
    WritingStyle::ALL.iter().map(|s| s.info()).collect()
}

/// Current config with stored API keys masked
pub fn get_config(store: &ConfigStore) -> Result<AppConfig, ApiError> {
    let mut config = store.load()?;
    for key in config.api_keys.values_mut() {
        *key = mask_key(key);
    }
    Ok(config)
}

pub fn store_api_key(store: &ConfigStore, key: &str) -> Result<(), ApiError> {
    if key.trim().is_empty() {
        return Err(InputError::Empty.into());
    }
    store.set_api_key(PROVIDER_NAME, key)?;
    info!("[API] Stored {} API key", PROVIDER_NAME);
    Ok(())
}

pub fn delete_api_key(store: &ConfigStore) -> Result<(), ApiError> {
    store.delete_api_key(PROVIDER_NAME)?;
    info!("[API] Deleted {} API key", PROVIDER_NAME);
    Ok(())
}

pub fn set_provider_url(store: &ConfigStore, url: &str) -> Result<(), ApiError> {
    if url.trim().is_empty() {
        return Err(InputError::Empty.into());
    }
    store.set_provider_url(url)?;
    Ok(())
}

pub fn set_default_style(store: &ConfigStore, style: WritingStyle) -> Result<(), ApiError> {
    store.set_default_style(style)?;
    Ok(())
}

/// Load a document and return its normalized text
pub fn preprocess_file(path: &Path) -> Result<String, ApiError> {
    let text = load_text_file(path)?;
    Ok(normalize_punctuation(&text))
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
