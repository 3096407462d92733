//! Inference configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file (default: ~/.config/notewise/inference.toml)
//! - environment variables (`HUGGING_FACE_API_TOKEN`, `NOTEWISE_*`)
//!
//! The resulting structs are passed to the backend and annotator at
//! construction; nothing below the constructors reads the environment.
//!
//! # Example
//!
//! ```rust,no_run
//! use notewise_inference::config::InferenceConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = InferenceConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = InferenceConfig::from_file(std::path::Path::new("inference.toml")).expect("Failed to load");
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use notewise_core::defaults;

use crate::annotator::AnnotatorConfig;

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

/// Endpoints and credential for the hosted inference services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuggingFaceConfig {
    /// Sentiment classifier endpoint.
    pub sentiment_url: String,
    /// Summarizer endpoint.
    pub summarization_url: String,
    /// Zero-shot entailment classifier endpoint.
    pub classification_url: String,
    /// Bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            sentiment_url: defaults::SENTIMENT_URL.to_string(),
            summarization_url: defaults::SUMMARIZATION_URL.to_string(),
            classification_url: defaults::CLASSIFICATION_URL.to_string(),
            api_token: None,
        }
    }
}

impl HuggingFaceConfig {
    /// Load from environment variables, falling back to the public endpoints.
    pub fn from_env() -> Self {
        let fallback = Self::default();
        Self {
            sentiment_url: env::var("NOTEWISE_SENTIMENT_URL").unwrap_or(fallback.sentiment_url),
            summarization_url: env::var("NOTEWISE_SUMMARIZATION_URL")
                .unwrap_or(fallback.summarization_url),
            classification_url: env::var("NOTEWISE_CLASSIFICATION_URL")
                .unwrap_or(fallback.classification_url),
            api_token: env::var("HUGGING_FACE_API_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        }
    }

    /// Point all three services at one base URL (useful for local proxies).
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            sentiment_url: format!("{}/sentiment", base),
            summarization_url: format!("{}/summarization", base),
            classification_url: format!("{}/classification", base),
            api_token: None,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, url) in [
            ("sentiment_url", &self.sentiment_url),
            ("summarization_url", &self.summarization_url),
            ("classification_url", &self.classification_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{} must start with http:// or https://, got: {}",
                    name, url
                )));
            }
        }
        Ok(())
    }
}

/// Main inference configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Hosted service endpoints.
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    /// Annotation thresholds and timeouts.
    #[serde(default)]
    pub annotator: AnnotatorConfig,
}

impl InferenceConfig {
    /// Get the default config file path.
    ///
    /// Returns: ~/.config/notewise/inference.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("notewise");
        path.push("inference.toml");
        path
    }

    /// Load configuration from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading inference config from: {}", path.display());
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

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text, substituting `${VAR}` placeholders.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);
        let mut config: Self = toml::from_str(&content)?;

        if config
            .huggingface
            .api_token
            .as_deref()
            .is_some_and(|token| token.starts_with("${"))
        {
            warn!("api_token placeholder is unresolved, sending requests without a token");
            config.huggingface.api_token = None;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let call_timeout_ms = env::var("NOTEWISE_INFERENCE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        Self {
            huggingface: HuggingFaceConfig::from_env(),
            annotator: AnnotatorConfig {
                call_timeout_ms,
                ..AnnotatorConfig::default()
            },
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.huggingface.validate()?;
        self.annotator.validate()
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_hosted_models() {
        let config = HuggingFaceConfig::default();
        assert!(config.sentiment_url.ends_with("distilbert-base-uncased-finetuned-sst-2-english"));
        assert!(config.summarization_url.ends_with("facebook/bart-large-cnn"));
        assert!(config.classification_url.ends_with("facebook/bart-large-mnli"));
        assert!(config.api_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = HuggingFaceConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.sentiment_url, "http://127.0.0.1:9000/sentiment");
        assert_eq!(config.summarization_url, "http://127.0.0.1:9000/summarization");
        assert_eq!(config.classification_url, "http://127.0.0.1:9000/classification");
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = HuggingFaceConfig {
            summarization_url: "ftp://example.com".to_string(),
            ..HuggingFaceConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("summarization_url"));
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = HuggingFaceConfig {
            sentiment_url: String::new(),
            ..HuggingFaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution_with_value() {
        let content = "api_token = \"${NOTEWISE_TEST_SUBSTITUTION_VAR}\"";

        env::set_var("NOTEWISE_TEST_SUBSTITUTION_VAR", "hf_test");
        let result = InferenceConfig::substitute_env_vars(content);
        env::remove_var("NOTEWISE_TEST_SUBSTITUTION_VAR");

        assert_eq!(result, "api_token = \"hf_test\"");
    }

    #[test]
    fn test_env_var_substitution_missing() {
        let content = "api_token = \"${NONEXISTENT_NOTEWISE_VAR_12345}\"";
        let result = InferenceConfig::substitute_env_vars(content);
        assert_eq!(result, content);
    }

    #[test]
    fn test_from_toml_partial_file_uses_defaults() {
        let config = InferenceConfig::from_toml_str(
            r#"
            [huggingface]
            sentiment_url = "http://localhost:8080/sentiment"

            [annotator]
            call_timeout_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.huggingface.sentiment_url, "http://localhost:8080/sentiment");
        assert_eq!(
            config.huggingface.classification_url,
            defaults::CLASSIFICATION_URL
        );
        assert_eq!(config.annotator.call_timeout_ms, Some(5000));
        assert_eq!(config.annotator.min_analysis_chars, 10);
    }

    #[test]
    fn test_from_toml_drops_unresolved_token() {
        let config = InferenceConfig::from_toml_str(
            "[huggingface]\napi_token = \"${NONEXISTENT_NOTEWISE_TOKEN_98765}\"\n",
        )
        .unwrap();
        assert!(config.huggingface.api_token.is_none());
    }

    #[test]
    fn test_from_toml_rejects_invalid_url() {
        let result =
            InferenceConfig::from_toml_str("[huggingface]\nsentiment_url = \"localhost\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_from_toml_parse_error() {
        let result = InferenceConfig::from_toml_str("[huggingface\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_serialize_inference_config() {
        let serialized = toml::to_string(&InferenceConfig::default()).unwrap();
        assert!(serialized.contains("[huggingface]"));
        assert!(serialized.contains("[annotator]"));
    }
}
