//! Matchup comparison bars
//!
//! Turns two teams' raw values for one metric into the pair of bar widths a
//! comparison panel renders. The widths exaggerate the gap between the teams
//! in proportion to how far apart their league ranks are, not just their raw
//! values: naive value shares are raised to an exponent picked from discrete
//! rank-gap buckets, then renormalized to the available width.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the bar allocation
///
/// The elite/struggling cutoffs assume a 32-team league; a different league
/// size needs them re-cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Width reserved for the visual divider between the two bars
    pub gap_pct: f64,
    /// Substitute rank for a team with no rank; worse than any real team
    pub unranked_rank: u32,
    /// "Elite" is a rank at or inside this cutoff
    pub elite_cutoff: u32,
    /// "Struggling" is a rank at or beyond this cutoff (bottom third of 32)
    pub struggling_cutoff: u32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            gap_pct: 2.0,
            unranked_rank: 999,
            elite_cutoff: 5,
            struggling_cutoff: 23,
        }
    }
}

/// Allocated widths, summing to `100 - gap_pct`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarWidths {
    pub team_a_percent: f64,
    pub team_b_percent: f64,
}

/// Exponent step function over the absolute rank gap
fn gap_exponent(rank_a: u32, rank_b: u32, config: &BarConfig) -> f64 {
    let gap = rank_a.abs_diff(rank_b);
    let mut exponent = match gap {
        g if g >= 20 => 2.5,
        g if g >= 15 => 2.2,
        g if g >= 10 => 1.8,
        g if g >= 5 => 1.5,
        _ => 1.2,
    };
    // Elite-vs-struggling matchups get dramatized beyond the gap step.
    let (best, worst) = (rank_a.min(rank_b), rank_a.max(rank_b));
    if best <= config.elite_cutoff && worst >= config.struggling_cutoff {
        exponent += 0.5;
    }
    exponent
}

/// Allocate the two bar widths for a matchup
///
/// `invert` swaps the raw values before any other computation, so that for
/// metrics where the lower raw number is the better one the winning side
/// still receives the larger share. Missing ranks fall back to
/// [`BarConfig::unranked_rank`]. Degenerate inputs (non-finite values,
/// non-positive totals) split the available width evenly.
///
/// Pure: no I/O, no side effects, re-evaluated from its inputs alone.
pub fn allocate_bar_widths(
    team_a_value: f64,
    team_b_value: f64,
    team_a_rank: Option<u32>,
    team_b_rank: Option<u32>,
    invert: bool,
    config: &BarConfig,
) -> BarWidths {
    let available = 100.0 - config.gap_pct;
    let even = BarWidths {
        team_a_percent: available / 2.0,
        team_b_percent: available / 2.0,
    };

    let (a, b) = if invert {
        (team_b_value, team_a_value)
    } else {
        (team_a_value, team_b_value)
    };

    let total = a + b;
    if !total.is_finite() || total <= 0.0 || a < 0.0 || b < 0.0 {
        return even;
    }

    let exponent = gap_exponent(
        team_a_rank.unwrap_or(config.unranked_rank),
        team_b_rank.unwrap_or(config.unranked_rank),
        config,
    );

    let weight_a = (a / total).powf(exponent);
    let weight_b = (b / total).powf(exponent);
    let weight_sum = weight_a + weight_b;
    if !weight_sum.is_finite() || weight_sum <= 0.0 {
        return even;
    }

    BarWidths {
        team_a_percent: weight_a / weight_sum * available,
        team_b_percent: weight_b / weight_sum * available,
    }
}
