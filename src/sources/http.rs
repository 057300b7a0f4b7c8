//! HTTP snapshot source
//!
//! Fetches snapshots from an upstream JSON endpoint, one URL per table. The
//! upstream is expected to serve the same `{updatedAt, rows}` document the
//! file source reads.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{AppResult, SourceError};
use crate::models::{StatKind, StatSnapshot};
use crate::sources::traits::StatSource;

pub struct HttpSource {
    client: reqwest::Client,
    offense_url: String,
    defense_url: String,
}

impl HttpSource {
    pub fn new<S: Into<String>>(offense_url: S, defense_url: S) -> Self {
        Self {
            client: reqwest::Client::new(),
            offense_url: offense_url.into(),
            defense_url: defense_url.into(),
        }
    }

    fn url_for(&self, kind: StatKind) -> &str {
        match kind {
            StatKind::Offense => &self.offense_url,
            StatKind::Defense => &self.defense_url,
        }
    }
}

#[async_trait]
impl StatSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, kind: StatKind) -> AppResult<StatSnapshot> {
        let url = self.url_for(kind);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SourceError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: format!("{} returned {}", url, status),
            }
            .into());
        }

        let snapshot: StatSnapshot = response
            .json()
            .await
            .map_err(|e| SourceError::parse(kind.as_str(), e.to_string()))?;
        debug!(
            "fetched {} snapshot from {} ({} rows)",
            kind,
            url,
            snapshot.rows.len()
        );
        Ok(snapshot)
    }
}
