// Configuration Storage Service
// Handles config file read/write, version backup and provider settings resolution

use crate::models::{AiPreferences, WritingStyle};
use crate::services::providers::{
    api_key_from_env, api_url_from_env, ProviderSettings, DEFAULT_TIMEOUT_SECS,
    GEMINI_DEFAULT_MODEL, GEMINI_DEFAULT_URL,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const PROVIDER_NAME: &str = "gemini";
const MAX_BACKUPS: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

fn io_err(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> ConfigError {
    let context = context.into();
    move |source| ConfigError::Io { context, source }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub default_style: WritingStyle,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub preferences: AiPreferences,
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_style: WritingStyle::default(),
            max_words: default_max_words(),
            provider: ProviderConfig::default(),
            proxy: ProxyConfig::default(),
            preferences: AiPreferences::default(),
            api_keys: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    pub enabled: bool,
    pub url: Option<String>,
}

fn default_version() -> String { "1".to_string() }
fn default_max_words() -> usize { 1000 }
fn default_model() -> String { GEMINI_DEFAULT_MODEL.to_string() }
fn default_timeout() -> u64 { DEFAULT_TIMEOUT_SECS }

impl AppConfig {
    /// Resolve provider settings: environment first, then this config
    pub fn provider_settings(&self) -> ProviderSettings {
        self.resolve_provider_settings(api_key_from_env(), api_url_from_env())
    }

    /// Resolve provider settings against explicit overrides
    pub fn resolve_provider_settings(
        &self,
        key_override: Option<String>,
        url_override: Option<String>,
    ) -> ProviderSettings {
        let api_key = key_override.or_else(|| {
            self.api_keys
                .get(PROVIDER_NAME)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        });
        let base_url = url_override
            .or_else(|| self.provider.base_url.clone())
            .unwrap_or_else(|| GEMINI_DEFAULT_URL.to_string());
        let proxy = if self.proxy.enabled {
            self.proxy.url.clone()
        } else {
            None
        };

        ProviderSettings {
            api_key,
            model: self.provider.model.clone(),
            base_url,
            timeout_secs: self.provider.timeout_secs,
            proxy,
        }
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("text-humanizer"))
    }

    /// Store in the default directory, or `./.text-humanizer` when the
    /// platform has no config dir
    pub fn open_default() -> Self {
        let dir = Self::default_config_dir().unwrap_or_else(|| PathBuf::from(".text-humanizer"));
        Self::new(dir)
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(io_err("Failed to create config dir"))
    }

    /// Load configuration from file; a missing file yields defaults
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            debug!("[CONFIG] No config at {}, using defaults", self.config_file.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(io_err("Failed to read config"))?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(&self.config_file, content).map_err(io_err("Failed to write config"))
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(io_err("Failed to create backup dir"))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(io_err("Failed to create backup"))?;

        self.cleanup_old_backups(&backup_dir, MAX_BACKUPS)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(io_err("Failed to read backup dir"))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Timestamped names sort oldest first
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            if let Err(e) = fs::remove_file(entry.path()) {
                warn!("[CONFIG] Failed to remove old backup {}: {}", entry.path().display(), e);
            }
        }

        Ok(())
    }

    /// Store provider API key in config file
    pub fn set_api_key(&self, provider: &str, key: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.api_keys.insert(provider.to_string(), key.trim().to_string());
        self.save(&config)
    }

    /// Delete provider API key from config file
    pub fn delete_api_key(&self, provider: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.api_keys.remove(provider);
        self.save(&config)
    }

    /// Set provider base URL in config file
    pub fn set_provider_url(&self, url: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.provider.base_url = Some(url.trim().to_string());
        self.save(&config)
    }

    /// Set the style used when none is given
    pub fn set_default_style(&self, style: WritingStyle) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.default_style = style;
        self.save(&config)
    }
}
