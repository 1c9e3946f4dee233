//! Prompt client configuration.
//!
//! Configuration can be loaded from:
//! - A TOML file (default: ~/.config/legal-lens/config.toml, `[lens]` table)
//! - Environment variables (LENS_* prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use lens_inference::config::LensConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = LensConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = LensConfig::from_file(std::path::Path::new("config.toml")).expect("Failed to load");
//!
//! // Or from environment variables
//! let config = LensConfig::from_env();
//! ```

use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use lens_core::defaults;

use crate::openai::OpenAIConfig;

/// `${VAR_NAME}` placeholders in config files.
static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for lens_core::Error {
    fn from(e: ConfigError) -> Self {
        lens_core::Error::Config(e.to_string())
    }
}

/// Endpoint, model and output ceilings for both prompt clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Bearer token (optional for local endpoints).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat model name.
    pub model: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Output-token ceiling for document analysis.
    pub analysis_max_tokens: u32,
    /// Output-token ceiling for Q&A.
    pub assistant_max_tokens: u32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            api_key: None,
            model: defaults::MODEL.to_string(),
            timeout_seconds: defaults::TIMEOUT_SECS,
            analysis_max_tokens: defaults::ANALYSIS_MAX_TOKENS,
            assistant_max_tokens: defaults::ASSISTANT_MAX_TOKENS,
        }
    }
}

impl LensConfig {
    /// Get the default config file path.
    ///
    /// Returns: ~/.config/legal-lens/config.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("legal-lens");
        path.push("config.toml");
        path
    }

    /// Load configuration from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading lens config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a TOML file with a `[lens]` table.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text, substituting `${VAR}` placeholders.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            lens: LensConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        let mut config = root.lens;

        // An unresolved placeholder is treated as no key at all.
        if config
            .api_key
            .as_deref()
            .is_some_and(|k| k.is_empty() || ENV_PLACEHOLDER.is_match(k))
        {
            config.api_key = None;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// `HF_TOKEN` is accepted as the API key when `LENS_API_KEY` is unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("LENS_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env::var("LENS_API_KEY")
                .or_else(|_| env::var("HF_TOKEN"))
                .ok()
                .filter(|k| !k.is_empty()),
            model: env::var("LENS_MODEL").unwrap_or(defaults.model),
            timeout_seconds: env::var("LENS_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            analysis_max_tokens: env::var("LENS_ANALYSIS_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.analysis_max_tokens),
            assistant_max_tokens: env::var("LENS_ASSISTANT_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.assistant_max_tokens),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.model.is_empty() {
            return Err(ConfigError::Validation("model cannot be empty".to_string()));
        }

        if self.analysis_max_tokens == 0 || self.assistant_max_tokens == 0 {
            return Err(ConfigError::Validation(
                "max_tokens ceilings must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Connection settings for the chat backend.
    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}
