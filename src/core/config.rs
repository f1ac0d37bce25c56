use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use super::currency::{Currency, CurrencyCatalog, default_currencies};

pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org";
pub const APP_ID_ENV: &str = "OER_APPID";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<Currency>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            currencies: default_currencies(),
        }
    }
}

impl AppConfig {
    /// Loads the config file from the default location, falling back to the
    /// built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()
            .inspect_err(|e| debug!("{e}, using defaults"))
            .ok();
        Self::load_optional(config_path.as_deref())
    }

    /// Reads `path` when it names an existing file, otherwise returns defaults.
    pub fn load_optional(path: Option<&std::path::Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from_path(path),
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "cashconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn catalog(&self) -> Result<CurrencyCatalog> {
        CurrencyCatalog::new(self.currencies.clone()).context("Invalid currency configuration")
    }

    /// API key for the rates endpoint. An unset variable yields an empty key;
    /// the API rejects it and its error is reported.
    pub fn app_id() -> String {
        std::env::var(APP_ID_ENV).unwrap_or_default()
    }
}
