//! Static metric registry
//!
//! Every statistic the service understands is described here once: display
//! label, category, polarity, display format and which table it applies to.
//! Polarity is stored from the offense perspective and reinterpreted per
//! table: a defense panel inverts it for shared keys, since allowing fewer
//! yards is better even though the raw field carries the same key.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::StatKind;

/// How a metric value is rendered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricFormat {
    Integer,
    OneDecimal,
    Percent,
    Clock,
}

/// Broad grouping used by the selection dropdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Scoring,
    Total,
    Passing,
    Rushing,
    Downs,
    Turnovers,
    Discipline,
    Possession,
}

/// Registry entry for one metric key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub category: MetricCategory,
    /// Polarity from the offense perspective
    pub higher_is_better: bool,
    pub format: MetricFormat,
    pub offense: bool,
    pub defense: bool,
}

impl MetricDescriptor {
    /// Whether the metric appears in the given table
    pub fn applies_to(&self, kind: StatKind) -> bool {
        match kind {
            StatKind::Offense => self.offense,
            StatKind::Defense => self.defense,
        }
    }
}

const fn metric(
    key: &'static str,
    label: &'static str,
    category: MetricCategory,
    higher_is_better: bool,
    format: MetricFormat,
    offense: bool,
    defense: bool,
) -> MetricDescriptor {
    MetricDescriptor {
        key,
        label,
        category,
        higher_is_better,
        format,
        offense,
        defense,
    }
}

/// Every metric the service understands, in display order
pub static METRICS: &[MetricDescriptor] = &[
    metric("pts", "Points", MetricCategory::Scoring, true, MetricFormat::Integer, true, true),
    metric("yds", "Total Yards", MetricCategory::Total, true, MetricFormat::Integer, true, true),
    metric("ply", "Offensive Plays", MetricCategory::Total, true, MetricFormat::Integer, true, true),
    metric("y_p", "Yards per Play", MetricCategory::Total, true, MetricFormat::OneDecimal, true, true),
    metric("first_downs", "First Downs", MetricCategory::Downs, true, MetricFormat::Integer, true, true),
    metric("pass_cmp", "Completions", MetricCategory::Passing, true, MetricFormat::Integer, true, true),
    metric("pass_att", "Pass Attempts", MetricCategory::Passing, true, MetricFormat::Integer, true, true),
    metric("pass_yds", "Passing Yards", MetricCategory::Passing, true, MetricFormat::Integer, true, true),
    metric("pass_td", "Passing TD", MetricCategory::Passing, true, MetricFormat::Integer, true, true),
    metric("pass_int", "Interceptions Thrown", MetricCategory::Passing, false, MetricFormat::Integer, true, true),
    metric("pass_ny_a", "Net Yards per Attempt", MetricCategory::Passing, true, MetricFormat::OneDecimal, true, true),
    metric("rush_att", "Rush Attempts", MetricCategory::Rushing, true, MetricFormat::Integer, true, true),
    metric("rush_yds", "Rushing Yards", MetricCategory::Rushing, true, MetricFormat::Integer, true, true),
    metric("rush_td", "Rushing TD", MetricCategory::Rushing, true, MetricFormat::Integer, true, true),
    metric("rush_y_a", "Yards per Carry", MetricCategory::Rushing, true, MetricFormat::OneDecimal, true, true),
    metric("to", "Turnovers", MetricCategory::Turnovers, false, MetricFormat::Integer, true, true),
    metric("fl", "Fumbles Lost", MetricCategory::Turnovers, false, MetricFormat::Integer, true, true),
    metric("score_pct", "Scoring Drive %", MetricCategory::Scoring, true, MetricFormat::Percent, true, true),
    metric("to_pct", "Turnover Drive %", MetricCategory::Turnovers, false, MetricFormat::Percent, true, true),
    metric("penalties", "Penalties", MetricCategory::Discipline, false, MetricFormat::Integer, true, true),
    metric("pen_yds", "Penalty Yards", MetricCategory::Discipline, false, MetricFormat::Integer, true, true),
    metric("third_down_pct", "3rd Down Conversion %", MetricCategory::Downs, true, MetricFormat::Percent, true, true),
    metric("top", "Time of Possession", MetricCategory::Possession, true, MetricFormat::Clock, true, false),
];

static BY_KEY: Lazy<HashMap<&'static str, &'static MetricDescriptor>> =
    Lazy::new(|| METRICS.iter().map(|m| (m.key, m)).collect());

/// Look up a metric descriptor by key
pub fn descriptor(key: &str) -> Option<&'static MetricDescriptor> {
    BY_KEY.get(key).copied()
}

/// Contextual polarity of a metric within one table
///
/// Returns `None` when the key is unknown or does not appear in the table.
/// The registry stores polarity from the offense perspective; the defense
/// table negates it (fewer yards allowed is better, more takeaways is
/// better).
pub fn polarity_for(key: &str, kind: StatKind) -> Option<bool> {
    let descriptor = descriptor(key).filter(|m| m.applies_to(kind))?;
    match kind {
        StatKind::Offense => Some(descriptor.higher_is_better),
        StatKind::Defense => Some(!descriptor.higher_is_better),
    }
}

/// Metrics applicable to one table, in display order
pub fn applicable(kind: StatKind) -> Vec<&'static MetricDescriptor> {
    METRICS.iter().filter(|m| m.applies_to(kind)).collect()
}
