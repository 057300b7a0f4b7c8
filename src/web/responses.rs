//! HTTP response types and utilities
//!
//! Response bodies for the stats API plus the error envelope. Staleness is
//! signaled in-band (the `stale` field) and out-of-band (the
//! `x-cache-status` header); both fresh and stale service return 200. Only
//! a total failure with an empty cache surfaces as an error status.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cache::CachedTable;
use crate::compare::BarWidths;
use crate::errors::AppError;
use crate::metrics::{MetricDescriptor, MetricFormat};
use crate::models::{RankingResult, StatKind, TeamRecord};

/// Response header carrying how the cache satisfied the request
pub const CACHE_STATUS_HEADER: &str = "x-cache-status";

/// Envelope for the two table endpoints
#[derive(Debug, Clone, Serialize)]
pub struct StatTableResponse {
    pub season: u16,
    #[serde(rename = "type")]
    pub kind: StatKind,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub rows: Vec<TeamRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatTableResponse {
    pub fn from_table(season: u16, kind: StatKind, table: CachedTable) -> Self {
        let stale = table.is_stale().then_some(true);
        Self {
            season,
            kind,
            updated_at: table.snapshot.updated_at,
            rows: table.snapshot.rows,
            stale,
            error: table.error,
        }
    }
}

/// One team's entry in a bulk ranking response
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub team: String,
    #[serde(flatten)]
    pub ranking: Option<RankingResult>,
}

/// Envelope for the bulk ranking endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsResponse {
    pub season: u16,
    #[serde(rename = "type")]
    pub kind: StatKind,
    pub metric: String,
    pub higher_is_better: bool,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
    pub rankings: Vec<RankingEntry>,
}

/// One side of a matchup comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSide {
    pub team: String,
    /// Raw decimal text as delivered by the upstream
    pub value: Option<String>,
    pub per_game: Option<f64>,
    pub ranking: Option<RankingResult>,
}

/// Allocated bar widths keyed by matchup side
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonBars {
    pub home_percent: f64,
    pub away_percent: f64,
}

impl From<BarWidths> for ComparisonBars {
    fn from(widths: BarWidths) -> Self {
        Self {
            home_percent: widths.team_a_percent,
            away_percent: widths.team_b_percent,
        }
    }
}

/// Envelope for the matchup comparison endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub season: u16,
    #[serde(rename = "type")]
    pub kind: StatKind,
    pub metric: String,
    pub label: &'static str,
    pub format: MetricFormat,
    pub higher_is_better: bool,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
    pub home: ComparisonSide,
    pub away: ComparisonSide,
    pub bars: ComparisonBars,
}

/// Envelope for the metric registry endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    pub metrics: Vec<&'static MetricDescriptor>,
}

/// Error envelope for failed requests
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error: &'static str,
    pub message: String,
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Map an application error to its HTTP response
pub fn error_response(error: &AppError, request_id: Uuid) -> Response {
    let (status, code) = match error {
        AppError::Validation { .. } | AppError::Web(_) => {
            (StatusCode::BAD_REQUEST, "invalid_request")
        }
        AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        AppError::Source(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_unavailable"),
        AppError::Configuration { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    let envelope = ErrorEnvelope {
        error: code,
        message: error.to_string(),
        request_id,
        timestamp: Utc::now(),
    };
    (status, Json(envelope)).into_response()
}

/// 200 response with the cache-status header attached
pub fn ok_with_cache_status<T: Serialize>(body: T, status: &'static str) -> Response {
    let mut response = (StatusCode::OK, Json(body)).into_response();
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(status));
    response
}
