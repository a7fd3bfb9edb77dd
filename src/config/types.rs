use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// The prediction service URL could not be parsed.
    #[error("Invalid prediction service URL {url:?}: {source}")]
    InvalidServiceUrl {
        /// Offending URL text.
        url: String,
        /// URL parse error.
        source: url::ParseError,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Aggregate application settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Where and how to reach the prediction service.
///
/// Config keys: `base_url`, `predict_path`, `request_timeout_secs`,
/// `max_response_bytes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Scheme and host of the service, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the prediction endpoint relative to `base_url`.
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    /// Whole-request timeout; absent means the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Largest response body accepted from the service.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            request_timeout_secs: None,
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ServiceSettings {
    /// Resolve the absolute prediction endpoint URL.
    pub fn predict_url(&self) -> Result<Url, ConfigError> {
        let invalid = |source| ConfigError::InvalidServiceUrl {
            url: self.base_url.clone(),
            source,
        };
        let mut base = Url::parse(self.base_url.trim()).map_err(invalid)?;
        if base.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.predict_path.trim_start_matches('/'))
            .map_err(invalid)
    }

    /// Whole-request timeout, when configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Window presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Heading shown above the upload form.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_predict_path() -> String {
    "/api/predict/".to_string()
}

fn default_max_response_bytes() -> usize {
    1024 * 1024
}

fn default_title() -> String {
    "Knee Osteoarthritis Detection".to_string()
}
