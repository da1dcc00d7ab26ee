use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::store::StoreConfig;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path = env::var("ARTICLED_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ARTICLED")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolve the store backend configuration.
    pub fn store_runtime(&self) -> Result<StoreConfig> {
        self.store.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub backend: StoreBackendKind,
    pub local: Option<LocalStoreSection>,
}

impl StoreSection {
    pub fn to_runtime(&self) -> Result<StoreConfig> {
        match self.backend {
            StoreBackendKind::Local => {
                let local = self.local.clone().unwrap_or_default();

                if local.data_dir.trim().is_empty() {
                    bail!("store.local.data_dir must be specified");
                }

                Ok(StoreConfig::Local {
                    data_dir: local.data_dir,
                })
            }
            StoreBackendKind::Memory => Ok(StoreConfig::Memory),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackendKind::Local,
            local: Some(LocalStoreSection::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackendKind {
    #[default]
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalStoreSection {
    pub data_dir: String,
}

impl Default for LocalStoreSection {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}
