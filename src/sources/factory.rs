//! Source factory
//!
//! Builds the configured snapshot source. New source kinds plug in here
//! without touching the cache or web layers.

use std::sync::Arc;

use crate::config::{SourceMode, SourcesConfig};
use crate::errors::{AppResult, SourceError};
use crate::sources::file::FileSource;
use crate::sources::http::HttpSource;
use crate::sources::traits::StatSource;

pub struct SourceFactory;

impl SourceFactory {
    /// Create the source selected by configuration
    pub fn create(config: &SourcesConfig) -> AppResult<Arc<dyn StatSource>> {
        match config.mode {
            SourceMode::File => Ok(Arc::new(FileSource::new(
                config.offense_path.clone(),
                config.defense_path.clone(),
            ))),
            SourceMode::Http => {
                let offense_url = config.offense_url.clone().ok_or_else(|| {
                    SourceError::invalid_config("offense_url", "required when mode is 'http'")
                })?;
                let defense_url = config.defense_url.clone().ok_or_else(|| {
                    SourceError::invalid_config("defense_url", "required when mode is 'http'")
                })?;
                Ok(Arc::new(HttpSource::new(offense_url, defense_url)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;

    #[test]
    fn file_mode_builds_from_paths() {
        let config = SourcesConfig::default();
        let source = SourceFactory::create(&config).unwrap();
        assert_eq!(source.name(), "file");
    }

    #[test]
    fn http_mode_requires_both_urls() {
        let config = SourcesConfig {
            mode: SourceMode::Http,
            offense_url: Some("http://localhost:9000/offense.json".to_string()),
            defense_url: None,
            ..SourcesConfig::default()
        };
        assert!(SourceFactory::create(&config).is_err());
    }

    #[test]
    fn http_mode_builds_from_urls() {
        let config = SourcesConfig {
            mode: SourceMode::Http,
            offense_url: Some("http://localhost:9000/offense.json".to_string()),
            defense_url: Some("http://localhost:9000/defense.json".to_string()),
            ..SourcesConfig::default()
        };
        let source = SourceFactory::create(&config).unwrap();
        assert_eq!(source.name(), "http");
    }
}
