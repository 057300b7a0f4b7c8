//! League ranking engine
//!
//! Ranks a team's value for one metric against every other team in a
//! snapshot. The engine is a pure function of its inputs: no state survives
//! between calls and a bulk variant over a shared population must agree
//! exactly with repeated single-team calls.
//!
//! Ranks do not skip on ties. A rank is "strictly better values + 1", so an
//! equal-value group reports one shared rank number and its size travels in
//! `tied_count` for display.

use crate::models::{RankingResult, TeamRecord};

/// Parseable comparison population for one (snapshot, metric) pair
fn population<'a>(
    all_teams: &'a [TeamRecord],
    metric_key: &str,
    exclude_special_rows: bool,
) -> Vec<(&'a str, f64)> {
    all_teams
        .iter()
        .filter(|record| !(exclude_special_rows && record.is_special_row()))
        .filter_map(|record| Some((record.team.as_str(), record.value(metric_key)?)))
        .collect()
}

fn rank_in_population(
    population: &[(&str, f64)],
    target_team: &str,
    higher_is_better: bool,
) -> Option<RankingResult> {
    let (_, target_value) = population
        .iter()
        .find(|(team, _)| *team == target_team)?;

    let mut better = 0u32;
    let mut tied = 0u32;
    for (_, value) in population {
        let strictly_better = if higher_is_better {
            value > target_value
        } else {
            value < target_value
        };
        if strictly_better {
            better += 1;
        } else if value == target_value {
            tied += 1;
        }
    }

    Some(RankingResult {
        rank: better + 1,
        tied_count: tied,
        total_participants: population.len() as u32,
    })
}

/// Rank one team's metric value against the rest of the snapshot
///
/// Returns `None` when the team is absent, its value does not parse, or the
/// team is a synthetic aggregate row while those are excluded. Unparseable
/// values elsewhere in the table drop out of the population entirely; they
/// are neither better nor worse, simply absent.
pub fn rank(
    all_teams: &[TeamRecord],
    metric_key: &str,
    target_team: &str,
    higher_is_better: bool,
    exclude_special_rows: bool,
) -> Option<RankingResult> {
    let target = all_teams.iter().find(|r| r.team == target_team)?;
    if exclude_special_rows && target.is_special_row() {
        return None;
    }
    let population = population(all_teams, metric_key, exclude_special_rows);
    rank_in_population(&population, target_team, higher_is_better)
}

/// Rank every name in `targets` against one fixed population
///
/// Builds the filtered population once and reuses it per target. Produces
/// per-team results identical to calling [`rank`] repeatedly.
pub fn rank_many<'a, I>(
    all_teams: &[TeamRecord],
    metric_key: &str,
    targets: I,
    higher_is_better: bool,
    exclude_special_rows: bool,
) -> Vec<(String, Option<RankingResult>)>
where
    I: IntoIterator<Item = &'a str>,
{
    let population = population(all_teams, metric_key, exclude_special_rows);
    targets
        .into_iter()
        .map(|team| {
            (
                team.to_string(),
                rank_in_population(&population, team, higher_is_better),
            )
        })
        .collect()
}
