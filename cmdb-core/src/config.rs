use crate::category::ResourceCategory;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmdbConfig {
    pub api_base_url: String,
    /// Zero disables the timeout.
    pub request_timeout_secs: u64,
    pub default_category: ResourceCategory,
}

impl Default for CmdbConfig {
    fn default() -> Self {
        CmdbConfig {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            default_category: ResourceCategory::Vm,
        }
    }
}

impl CmdbConfig {
    pub const FILE_NAME: &'static str = "cmdb.toml";
    pub const ENV_API_URL: &'static str = "CMDB_API_URL";
    pub const ENV_TIMEOUT: &'static str = "CMDB_REQUEST_TIMEOUT_SECS";
    pub const ENV_DEFAULT_CATEGORY: &'static str = "CMDB_DEFAULT_CATEGORY";

    /// Load `cmdb.toml` from the working directory with environment variable
    /// overrides. Problems are logged and the affected settings keep their
    /// defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        let mut config = if path.exists() {
            Self::load_from_path(path).unwrap_or_else(|e| {
                log::warn!("⚠️ {}, using defaults", e);
                CmdbConfig::default()
            })
        } else {
            log::info!("No {} found, using defaults", Self::FILE_NAME);
            CmdbConfig::default()
        };

        if let Err(e) = config.apply_env_overrides() {
            log::warn!("⚠️ Ignoring environment override: {}", e);
        }

        config
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Every valid override is applied
    /// even when another one is rejected; the first rejection is returned.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut first_error = None;

        if let Some(url) = lookup(Self::ENV_API_URL) {
            if url.trim().is_empty() {
                first_error.get_or_insert(ConfigError::InvalidValue {
                    key: Self::ENV_API_URL,
                    value: url,
                });
            } else {
                self.api_base_url = url.trim().to_string();
            }
        }

        if let Some(timeout) = lookup(Self::ENV_TIMEOUT) {
            match timeout.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => {
                    first_error.get_or_insert(ConfigError::InvalidValue {
                        key: Self::ENV_TIMEOUT,
                        value: timeout,
                    });
                }
            }
        }

        if let Some(category) = lookup(Self::ENV_DEFAULT_CATEGORY) {
            self.default_category = ResourceCategory::parse(&category);
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
