//! Core data model for team statistics
//!
//! Team records are string-valued field maps as delivered by the upstream
//! scraper: every statistic is decimal text keyed by a short metric key,
//! alongside the mandatory `team` identity field. Records are immutable once
//! loaded; a new snapshot replaces the previous one wholesale.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synthetic aggregate rows appended by the upstream table scrape. They are
/// not real teams and are excluded from ranking populations on request.
pub const SPECIAL_ROWS: [&str; 3] = ["avg team", "league total", "avg tm/g"];

/// Which of the two upstream tables a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Offense,
    Defense,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Offense => "offense",
            StatKind::Defense => "defense",
        }
    }

    /// Parse a query-string `side` value
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "offense" => Some(StatKind::Offense),
            "defense" => Some(StatKind::Defense),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One team's row in a stats table
///
/// All statistic fields are kept as the decimal text the upstream delivered;
/// numeric interpretation happens at the point of use so that unparseable
/// values can simply drop out of comparisons instead of failing a load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Team identity, unique within one snapshot
    pub team: String,
    /// Metric key to decimal-text value
    #[serde(flatten)]
    pub stats: BTreeMap<String, String>,
}

impl TeamRecord {
    /// Raw text value for a metric key
    pub fn stat(&self, key: &str) -> Option<&str> {
        self.stats.get(key).map(String::as_str)
    }

    /// Numeric value for a metric key, if it parses
    pub fn value(&self, key: &str) -> Option<f64> {
        let parsed: f64 = self.stat(key)?.trim().parse().ok()?;
        parsed.is_finite().then_some(parsed)
    }

    /// Games played, from the mandatory `g` field
    pub fn games(&self) -> Option<f64> {
        self.value("g")
    }

    /// Per-game derivation of a season-total metric
    pub fn per_game(&self, key: &str) -> Option<f64> {
        let games = self.games().filter(|g| *g > 0.0)?;
        Some(self.value(key)? / games)
    }

    /// Whether this is a synthetic aggregate row rather than a real team
    pub fn is_special_row(&self) -> bool {
        let name = self.team.trim().to_ascii_lowercase();
        SPECIAL_ROWS.contains(&name.as_str())
    }
}

/// One upstream table load: when it was produced and every team row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSnapshot {
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub rows: Vec<TeamRecord>,
}

impl StatSnapshot {
    /// Find a team row by its identity field
    pub fn team(&self, name: &str) -> Option<&TeamRecord> {
        self.rows.iter().find(|r| r.team == name)
    }

    /// Names of the real teams in row order, aggregate rows excluded
    pub fn team_names(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| !r.is_special_row())
            .map(|r| r.team.as_str())
            .collect()
    }
}

/// A team's standing for one metric within one snapshot
///
/// Derived on demand, never stored. Ties share the same rank number with no
/// skipping; `tied_count` is the size of the equal-value group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    /// 1-based rank: strictly better values + 1
    pub rank: u32,
    /// Teams sharing the exact value, target included
    pub tied_count: u32,
    /// Size of the parseable comparison population
    pub total_participants: u32,
}

impl RankingResult {
    /// Whether the rank is shared with at least one other team
    pub fn is_tied(&self) -> bool {
        self.tied_count > 1
    }
}
