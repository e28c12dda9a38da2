//! evently configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventlyError, EventlyResult};
use crate::query::{DEFAULT_UNKNOWN_CATEGORY_LABEL, EventQueryEngine, UnknownCategory};

static DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_unknown_category_label() -> String {
    DEFAULT_UNKNOWN_CATEGORY_LABEL.to_string()
}

/// How category ids without a matching category are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryMode {
    #[default]
    Drop,
    Placeholder,
}

/// Configuration at ~/.config/evently/config.toml
///
/// Every key can be overridden with an `EVENTLY_`-prefixed environment
/// variable, e.g. `EVENTLY_BASE_URL`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventlyConfig {
    /// Root URL of the backend serving `events`, `categories` and `users`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub unknown_category: UnknownCategoryMode,

    #[serde(default = "default_unknown_category_label")]
    pub unknown_category_label: String,
}

impl Default for EventlyConfig {
    fn default() -> Self {
        EventlyConfig {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            unknown_category: UnknownCategoryMode::default(),
            unknown_category_label: default_unknown_category_label(),
        }
    }
}

impl EventlyConfig {
    pub fn config_path() -> EventlyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventlyError::Config("Could not determine config directory".into()))?
            .join("evently");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first run.
    pub fn load() -> EventlyResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus `EVENTLY_*` overrides.
    pub fn load_from(path: &Path) -> EventlyResult<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: &Path, env: Environment) -> EventlyResult<Self> {
        let config: EventlyConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| EventlyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventlyError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), base_url = %config.base_url, "Loaded configuration");

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventlyResult<()> {
        let contents = format!(
            "\
# evently configuration

# Backend serving /events, /categories and /users:
# base_url = \"{}\"

# Seconds before a backend request is abandoned:
# request_timeout_secs = {}

# Category ids with no matching category are dropped (\"drop\")
# or shown with a label (\"placeholder\"):
# unknown_category = \"drop\"
# unknown_category_label = \"{}\"
",
            DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_UNKNOWN_CATEGORY_LABEL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        tracing::info!(path = %path.display(), "Wrote default configuration");

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn unknown_category_policy(&self) -> UnknownCategory {
        match self.unknown_category {
            UnknownCategoryMode::Drop => UnknownCategory::Drop,
            UnknownCategoryMode::Placeholder => {
                UnknownCategory::Placeholder(self.unknown_category_label.clone())
            }
        }
    }

    pub fn engine(&self) -> EventQueryEngine {
        EventQueryEngine::new(self.unknown_category_policy())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("EVENTLY").try_parsing(true)
}
