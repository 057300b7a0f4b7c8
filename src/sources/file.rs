//! JSON snapshot file source
//!
//! Reads already-normalized snapshot files produced by the scrape pipeline,
//! one per table. The file is re-read on every fetch; freshness is the cache
//! policy's concern, not this source's.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{AppResult, SourceError};
use crate::models::{StatKind, StatSnapshot};
use crate::sources::traits::StatSource;

pub struct FileSource {
    offense_path: PathBuf,
    defense_path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(offense_path: P, defense_path: P) -> Self {
        Self {
            offense_path: offense_path.into(),
            defense_path: defense_path.into(),
        }
    }

    fn path_for(&self, kind: StatKind) -> &Path {
        match kind {
            StatKind::Offense => &self.offense_path,
            StatKind::Defense => &self.defense_path,
        }
    }
}

#[async_trait]
impl StatSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, kind: StatKind) -> AppResult<StatSnapshot> {
        let path = self.path_for(kind);
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::read(path.display().to_string(), e.to_string()))?;
        let snapshot: StatSnapshot = serde_json::from_str(&contents)
            .map_err(|e| SourceError::parse(kind.as_str(), e.to_string()))?;
        debug!(
            "loaded {} snapshot from {} ({} rows)",
            kind,
            path.display(),
            snapshot.rows.len()
        );
        Ok(snapshot)
    }
}
