//! Source trait definition
//!
//! A source resolves one table kind to a dated snapshot. Implementations do
//! whatever reading and parsing their medium needs; the cache and web layers
//! only ever see the trait.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{StatKind, StatSnapshot};

/// Provider of team-statistics snapshots
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &str;

    /// Retrieve the current snapshot for one table
    async fn fetch(&self, kind: StatKind) -> AppResult<StatSnapshot>;
}
