use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.yaml";

/// Default embedding model (same family as the hosted bge-large checkpoint)
const DEFAULT_MODEL: &str = "bge-large-en-v1.5";
const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

const DEFAULT_JSEARCH_ENDPOINT: &str = "https://jsearch.p.rapidapi.com/search";
const DEFAULT_JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const DEFAULT_DATE_POSTED: &str = "week";
const DEFAULT_EMPLOYMENT_TYPES: &str = "intern,fulltime";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config is malformed: {0}")]
    Malformed(#[from] serde_yml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Job-search provider settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JSearchConfig {
    #[serde(default = "default_jsearch_endpoint")]
    pub endpoint: String,

    /// Value sent as `X-RapidAPI-Host`
    #[serde(default = "default_jsearch_host")]
    pub host: String,

    /// Recency window accepted by the provider ("today", "3days", "week", "month")
    #[serde(default = "default_date_posted")]
    pub date_posted: String,

    #[serde(default = "default_employment_types")]
    pub employment_types: String,

    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for JSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_jsearch_endpoint(),
            host: default_jsearch_host(),
            date_posted: default_date_posted(),
            employment_types: default_employment_types(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn default_jsearch_endpoint() -> String {
    DEFAULT_JSEARCH_ENDPOINT.to_string()
}

fn default_jsearch_host() -> String {
    DEFAULT_JSEARCH_HOST.to_string()
}

fn default_date_posted() -> String {
    DEFAULT_DATE_POSTED.to_string()
}

fn default_employment_types() -> String {
    DEFAULT_EMPLOYMENT_TYPES.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Every keyword is searched once per location
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    /// Model name for embeddings (e.g., "bge-large-en-v1.5")
    #[serde(default = "default_model")]
    pub model: String,

    /// Address the daemon binds to
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub jsearch: JSearchConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            model: default_model(),
            listen: default_listen(),
            jsearch: JSearchConfig::default(),
            base_path: PathBuf::new(),
        }
    }
}

fn default_locations() -> Vec<String> {
    vec!["United States".to_string(), "Remote United States".to_string()]
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

impl Config {
    fn validate(&mut self) -> Result<(), ConfigError> {
        self.locations = self
            .locations
            .iter()
            .map(|location| location.trim().to_string())
            .filter(|location| !location.is_empty())
            .collect();

        if self.locations.is_empty() {
            return Err(ConfigError::Invalid(
                "locations must contain at least one non-empty entry".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }

        if self.jsearch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "jsearch.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.jsearch.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "jsearch.endpoint must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Load `config.yaml` from `base_path`, creating it with defaults when missing.
    pub fn load_with(base_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base_path = base_path.as_ref();
        let config_path = base_path.join(CONFIG_FILE);

        std::fs::create_dir_all(base_path).map_err(|source| ConfigError::Io {
            path: base_path.to_path_buf(),
            source,
        })?;

        // create new if does not exist
        if !config_path.exists() {
            log::info!("Creating default config at {}", config_path.display());
            let mut config = Self::default();
            config.base_path = base_path.to_path_buf();
            config.save()?;
        }

        let config_str =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
                path: config_path.clone(),
                source,
            })?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path.to_path_buf();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = self.base_path.join(CONFIG_FILE);
        let temp_path = self
            .base_path
            .join(format!(".{}-{CONFIG_FILE}", std::process::id()));

        let config_str = serde_yml::to_string(&self)?;

        std::fs::write(&temp_path, config_str.as_bytes()).map_err(|source| ConfigError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &config_path).map_err(|source| ConfigError::Io {
            path: config_path,
            source,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding downloaded embedding models
    pub fn models_dir(&self) -> PathBuf {
        self.base_path.join("models")
    }
}
