use crate::pokebase::session;

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub batch_size: usize,
    pub max_id: u32,
}

impl Config {
    pub const API_URL_VAR: &'static str = "POKECARDS_API_URL";

    pub async fn load() -> Result<Self, anywho::Error> {
        let config = match config_path(dirs::config_dir()) {
            Some(path) if fs::try_exists(&path).await? => {
                log::info!("Loading configuration from {}", path.display());

                Self::parse(&fs::read_to_string(&path).await?)?
            }
            Some(_) => Self::default(),
            None => {
                log::warn!("No configuration directory available, using defaults");

                Self::default()
            }
        };

        Ok(config.with_env())
    }

    pub fn parse(config: &str) -> Result<Self, anywho::Error> {
        let config: Self = ron::from_str(config)?;

        if config.batch_size == 0 {
            return Err(Invalid::BatchSize.into());
        }

        if config.max_id == 0 {
            return Err(Invalid::MaxId.into());
        }

        Ok(config)
    }

    pub fn with_env(self) -> Self {
        self.with_api_url(env::var(Self::API_URL_VAR).ok())
    }

    /// Overrides the API URL unless the value is missing or blank.
    fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|api_url| !api_url.trim().is_empty()) {
            log::info!("Using {} from environment: {api_url}", Self::API_URL_VAR);
            self.api_url = api_url;
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: session::API_URL.to_owned(),
            batch_size: 10,
            max_id: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum Invalid {
    #[error("batch_size must be at least 1")]
    BatchSize,
    #[error("max_id must be at least 1")]
    MaxId,
}

fn config_path(config_dir: Option<PathBuf>) -> Option<PathBuf> {
    Some(config_dir?.join(env!("CARGO_PKG_NAME")).join("config.ron"))
}
