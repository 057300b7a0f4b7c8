//! Ranking and matchup comparison endpoints
//!
//! Derived views over a cached table: bulk per-metric rankings, the two-team
//! comparison with its allocated bar widths, and the metric registry.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::debug;

use crate::compare::allocate_bar_widths;
use crate::errors::{AppError, AppResult, WebError};
use crate::metrics::{self, MetricDescriptor};
use crate::models::{StatKind, TeamRecord};
use crate::ranking;
use crate::web::responses::{
    error_response, ok_with_cache_status, ComparisonSide, CompareResponse, MetricsResponse,
    RankingEntry, RankingsResponse,
};
use crate::web::{AppState, RequestContext};

#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    pub metric: String,
    pub side: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub home: String,
    pub away: String,
    pub metric: String,
    pub side: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub side: Option<String>,
}

/// Resolve the optional `side` query parameter, defaulting to offense
fn resolve_side(side: Option<&str>) -> AppResult<StatKind> {
    match side {
        None => Ok(StatKind::Offense),
        Some(value) => StatKind::from_param(value).ok_or_else(|| {
            WebError::invalid_request("side", format!("'{value}' is not offense or defense")).into()
        }),
    }
}

/// Resolve a metric against the registry for one table
fn resolve_metric(key: &str, kind: StatKind) -> AppResult<(&'static MetricDescriptor, bool)> {
    let descriptor =
        metrics::descriptor(key).ok_or_else(|| AppError::not_found("metric", key))?;
    let higher_is_better = metrics::polarity_for(key, kind).ok_or_else(|| {
        AppError::validation(format!("metric '{key}' does not apply to the {kind} table"))
    })?;
    Ok((descriptor, higher_is_better))
}

pub async fn metric_rankings(
    State(state): State<AppState>,
    context: RequestContext,
    Query(query): Query<RankingsQuery>,
) -> Response {
    match build_rankings(&state, &query).await {
        Ok((body, cache_status)) => {
            debug!(
                request_id = %context.request_id,
                "ranked {} teams for {} ({})",
                body.rankings.len(),
                body.metric,
                body.kind
            );
            ok_with_cache_status(body, cache_status)
        }
        Err(error) => error_response(&error, context.request_id).into_response(),
    }
}

async fn build_rankings(
    state: &AppState,
    query: &RankingsQuery,
) -> AppResult<(RankingsResponse, &'static str)> {
    let kind = resolve_side(query.side.as_deref())?;
    let (descriptor, higher_is_better) = resolve_metric(&query.metric, kind)?;

    let table = state.cache.get(kind, state.source.as_ref()).await?;
    let names = table.snapshot.team_names();
    let rankings = ranking::rank_many(
        &table.snapshot.rows,
        descriptor.key,
        names.into_iter(),
        higher_is_better,
        true,
    )
    .into_iter()
    .map(|(team, ranking)| RankingEntry { team, ranking })
    .collect();

    let body = RankingsResponse {
        season: state.config.dataset.season,
        kind,
        metric: descriptor.key.to_string(),
        higher_is_better,
        updated_at: table.snapshot.updated_at,
        stale: table.is_stale().then_some(true),
        rankings,
    };
    Ok((body, table.status.as_str()))
}

pub async fn compare_teams(
    State(state): State<AppState>,
    context: RequestContext,
    Query(query): Query<CompareQuery>,
) -> Response {
    match build_comparison(&state, &query).await {
        Ok((body, cache_status)) => {
            debug!(
                request_id = %context.request_id,
                "compared {} vs {} on {} ({})",
                body.home.team,
                body.away.team,
                body.metric,
                body.kind
            );
            ok_with_cache_status(body, cache_status)
        }
        Err(error) => error_response(&error, context.request_id).into_response(),
    }
}

async fn build_comparison(
    state: &AppState,
    query: &CompareQuery,
) -> AppResult<(CompareResponse, &'static str)> {
    let kind = resolve_side(query.side.as_deref())?;
    let (descriptor, higher_is_better) = resolve_metric(&query.metric, kind)?;

    let table = state.cache.get(kind, state.source.as_ref()).await?;
    let snapshot = &table.snapshot;
    let home = snapshot
        .team(&query.home)
        .ok_or_else(|| AppError::not_found("team", &query.home))?;
    let away = snapshot
        .team(&query.away)
        .ok_or_else(|| AppError::not_found("team", &query.away))?;

    let home_ranking = ranking::rank(&snapshot.rows, descriptor.key, &home.team, higher_is_better, true);
    let away_ranking = ranking::rank(&snapshot.rows, descriptor.key, &away.team, higher_is_better, true);

    // When the lower raw number is the better one in this table, the
    // allocator swaps values so the winning side keeps the larger bar.
    let bars = allocate_bar_widths(
        home.value(descriptor.key).unwrap_or(f64::NAN),
        away.value(descriptor.key).unwrap_or(f64::NAN),
        home_ranking.map(|r| r.rank),
        away_ranking.map(|r| r.rank),
        !higher_is_better,
        &state.config.bars,
    );

    let side = |record: &TeamRecord, ranking| ComparisonSide {
        team: record.team.clone(),
        value: record.stat(descriptor.key).map(str::to_string),
        per_game: record.per_game(descriptor.key),
        ranking,
    };

    let body = CompareResponse {
        season: state.config.dataset.season,
        kind,
        metric: descriptor.key.to_string(),
        label: descriptor.label,
        format: descriptor.format,
        higher_is_better,
        updated_at: snapshot.updated_at,
        stale: table.is_stale().then_some(true),
        home: side(home, home_ranking),
        away: side(away, away_ranking),
        bars: bars.into(),
    };
    Ok((body, table.status.as_str()))
}

pub async fn list_metrics(
    context: RequestContext,
    Query(query): Query<MetricsQuery>,
) -> Response {
    let metrics = match query.side.as_deref() {
        None => metrics::METRICS.iter().collect(),
        Some(value) => match resolve_side(Some(value)) {
            Ok(kind) => metrics::applicable(kind),
            Err(error) => return error_response(&error, context.request_id).into_response(),
        },
    };
    axum::Json(MetricsResponse { metrics }).into_response()
}
