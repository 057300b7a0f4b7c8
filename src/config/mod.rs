use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::compare::BarConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub dataset: DatasetConfig,
    pub cache: CacheConfig,
    pub sources: SourcesConfig,
    #[serde(default)]
    pub bars: BarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub season: u16,
}

/// TTL is static configuration: short while developing against a local
/// snapshot, long in production where the scrape runs daily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
    pub warm_on_start: bool,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    File,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub mode: SourceMode,
    pub offense_path: PathBuf,
    pub defense_path: PathBuf,
    pub offense_url: Option<String>,
    pub defense_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            dataset: DatasetConfig { season: 2025 },
            cache: CacheConfig {
                ttl_seconds: 3600,
                warm_on_start: true,
            },
            sources: SourcesConfig::default(),
            bars: BarConfig::default(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::File,
            offense_path: PathBuf::from("./data/stats/offense.json"),
            defense_path: PathBuf::from("./data/stats/defense.json"),
            offense_url: None,
            defense_url: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::create_dir_all("./data/stats")?;
            std::fs::write(&config_file, contents)?;
            Ok(default_config)
        }
    }
}
