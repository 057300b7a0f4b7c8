use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use gridiron_stats::cache::SnapshotCache;
use gridiron_stats::config::Config;
use gridiron_stats::errors::AppResult;
use gridiron_stats::models::{StatKind, StatSnapshot, TeamRecord};
use gridiron_stats::sources::StatSource;
use gridiron_stats::web::{create_router, AppState, CACHE_STATUS_HEADER};

// Helper function to send requests to the app
async fn send_request(app: &Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, headers, json)
}

fn updated_at() -> DateTime<Utc> {
    "2025-11-02T14:30:00Z".parse().unwrap()
}

fn offense_rows() -> Vec<TeamRecord> {
    serde_json::from_value(json!([
        {"team": "Baltimore Ravens", "g": "17", "pts": "483", "pass_yds": "3644", "to": "21"},
        {"team": "Detroit Lions", "g": "17", "pts": "461", "pass_yds": "4280", "to": "24"},
        {"team": "San Francisco 49ers", "g": "17", "pts": "461", "pass_yds": "4162", "to": "18"},
        {"team": "Kansas City Chiefs", "g": "17", "pts": "371", "pass_yds": "4189", "to": "17"},
        {"team": "Washington Commanders", "g": "17", "pts": "329", "pass_yds": "3746", "to": "30"},
        {"team": "New York Jets", "g": "17", "pts": "268", "pass_yds": "2959", "to": "25"},
        {"team": "Carolina Panthers", "g": "17", "pts": "236", "pass_yds": "3145", "to": "26"},
        {"team": "Avg Team", "g": "17", "pts": "370", "pass_yds": "3799", "to": "23"}
    ]))
    .unwrap()
}

fn defense_rows() -> Vec<TeamRecord> {
    serde_json::from_value(json!([
        {"team": "Cleveland Browns", "g": "17", "pts": "270", "pass_yds": "2837"},
        {"team": "Baltimore Ravens", "g": "17", "pts": "280", "pass_yds": "3398"},
        {"team": "Kansas City Chiefs", "g": "17", "pts": "294", "pass_yds": "3594"},
        {"team": "New York Giants", "g": "17", "pts": "407", "pass_yds": "3990"},
        {"team": "Washington Commanders", "g": "17", "pts": "518", "pass_yds": "4306"},
        {"team": "Avg Team", "g": "17", "pts": "370", "pass_yds": "3662"}
    ]))
    .unwrap()
}

struct FixtureSource {
    fetches: AtomicUsize,
}

impl FixtureSource {
    fn new() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StatSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch(&self, kind: StatKind) -> AppResult<StatSnapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let rows = match kind {
            StatKind::Offense => offense_rows(),
            StatKind::Defense => defense_rows(),
        };
        Ok(StatSnapshot {
            updated_at: updated_at(),
            rows,
        })
    }
}

fn test_app() -> (Router, Arc<FixtureSource>) {
    let source = Arc::new(FixtureSource::new());
    let state = AppState {
        config: Config::default(),
        cache: SnapshotCache::new(Duration::from_secs(300)),
        source: source.clone(),
    };
    (create_router(state), source)
}

#[tokio::test]
async fn offense_table_envelope() {
    let (app, _) = test_app();

    let (status, headers, body) =
        send_request(&app, Method::GET, "/api/v1/stats/offense").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[CACHE_STATUS_HEADER], "miss-then-fill");
    assert_eq!(body["season"], 2025);
    assert_eq!(body["type"], "offense");
    assert_eq!(body["updatedAt"], "2025-11-02T14:30:00Z");
    assert_eq!(body["rows"].as_array().unwrap().len(), 8);
    assert_eq!(body["rows"][0]["team"], "Baltimore Ravens");
    assert!(body.get("stale").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn second_read_is_a_fresh_hit() {
    let (app, source) = test_app();

    send_request(&app, Method::GET, "/api/v1/stats/offense").await;
    let (status, headers, body) =
        send_request(&app, Method::GET, "/api/v1/stats/offense").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[CACHE_STATUS_HEADER], "fresh-hit");
    assert_eq!(body["rows"].as_array().unwrap().len(), 8);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn defense_table_is_cached_separately() {
    let (app, source) = test_app();

    let (status, _, body) = send_request(&app, Method::GET, "/api/v1/stats/defense").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "defense");
    assert_eq!(body["rows"][0]["team"], "Cleveland Browns");

    send_request(&app, Method::GET, "/api/v1/stats/offense").await;
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rankings_for_points_scored() {
    let (app, _) = test_app();

    let (status, _, body) =
        send_request(&app, Method::GET, "/api/v1/rankings?metric=pts&side=offense").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metric"], "pts");
    assert_eq!(body["higherIsBetter"], true);

    let rankings = body["rankings"].as_array().unwrap();
    // Aggregate row excluded from both the list and the population.
    assert_eq!(rankings.len(), 7);
    assert!(rankings.iter().all(|entry| entry["team"] != "Avg Team"));

    let by_team = |name: &str| {
        rankings
            .iter()
            .find(|entry| entry["team"] == name)
            .unwrap()
            .clone()
    };
    let ravens = by_team("Baltimore Ravens");
    assert_eq!(ravens["rank"], 1);
    assert_eq!(ravens["tiedCount"], 1);
    assert_eq!(ravens["totalParticipants"], 7);

    // The 461-point pair shares rank 2; the next team counts both as
    // strictly better.
    let lions = by_team("Detroit Lions");
    let niners = by_team("San Francisco 49ers");
    assert_eq!(lions["rank"], 2);
    assert_eq!(niners["rank"], 2);
    assert_eq!(lions["tiedCount"], 2);

    let chiefs = by_team("Kansas City Chiefs");
    assert_eq!(chiefs["rank"], 4);

    let panthers = by_team("Carolina Panthers");
    assert_eq!(panthers["rank"], 7);
}

#[tokio::test]
async fn defense_rankings_invert_polarity() {
    let (app, _) = test_app();

    let (status, _, body) =
        send_request(&app, Method::GET, "/api/v1/rankings?metric=pts&side=defense").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["higherIsBetter"], false);

    let rankings = body["rankings"].as_array().unwrap();
    let browns = rankings
        .iter()
        .find(|entry| entry["team"] == "Cleveland Browns")
        .unwrap();
    // Fewest points allowed is the best defense.
    assert_eq!(browns["rank"], 1);
}

#[tokio::test]
async fn unknown_metric_is_not_found() {
    let (app, _) = test_app();

    let (status, _, body) =
        send_request(&app, Method::GET, "/api/v1/rankings?metric=sacks_allowed").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert!(body.get("message").is_some());
    assert!(body.get("requestId").is_some());
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
async fn invalid_side_is_a_bad_request() {
    let (app, _) = test_app();

    let (status, _, body) =
        send_request(&app, Method::GET, "/api/v1/rankings?metric=pts&side=specialteams").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn comparison_allocates_bars_summing_to_available_width() {
    let (app, _) = test_app();

    let uri = "/api/v1/compare?home=Baltimore%20Ravens&away=Carolina%20Panthers&metric=pts";
    let (status, headers, body) = send_request(&app, Method::GET, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[CACHE_STATUS_HEADER], "miss-then-fill");
    assert_eq!(body["home"]["team"], "Baltimore Ravens");
    assert_eq!(body["home"]["ranking"]["rank"], 1);
    assert_eq!(body["away"]["ranking"]["rank"], 7);
    assert_eq!(body["label"], "Points");

    let home_pct = body["bars"]["homePercent"].as_f64().unwrap();
    let away_pct = body["bars"]["awayPercent"].as_f64().unwrap();
    assert!((home_pct + away_pct - 98.0).abs() < 0.01);
    assert!(home_pct > away_pct);

    // Per-game derivation rides along: 483 points over 17 games.
    let per_game = body["home"]["perGame"].as_f64().unwrap();
    assert!((per_game - 28.41).abs() < 0.01);
}

#[tokio::test]
async fn defense_comparison_keeps_the_larger_bar_on_the_winner() {
    let (app, _) = test_app();

    let uri =
        "/api/v1/compare?home=Cleveland%20Browns&away=Washington%20Commanders&metric=pts&side=defense";
    let (status, _, body) = send_request(&app, Method::GET, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["higherIsBetter"], false);

    // The Browns allow far fewer points; despite the smaller raw value the
    // winning side gets the larger share.
    let home_pct = body["bars"]["homePercent"].as_f64().unwrap();
    let away_pct = body["bars"]["awayPercent"].as_f64().unwrap();
    assert!(home_pct > away_pct);
    assert!((home_pct + away_pct - 98.0).abs() < 0.01);
}

#[tokio::test]
async fn unknown_team_is_not_found() {
    let (app, _) = test_app();

    let uri = "/api/v1/compare?home=Canton%20Bulldogs&away=Carolina%20Panthers&metric=pts";
    let (status, _, body) = send_request(&app, Method::GET, uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("Canton Bulldogs"));
}

#[tokio::test]
async fn metric_registry_endpoint() {
    let (app, _) = test_app();

    let (status, _, body) = send_request(&app, Method::GET, "/api/v1/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let metrics = body["metrics"].as_array().unwrap();
    let pass_yds = metrics
        .iter()
        .find(|m| m["key"] == "pass_yds")
        .unwrap();
    assert_eq!(pass_yds["label"], "Passing Yards");
    assert_eq!(pass_yds["higherIsBetter"], true);
    assert_eq!(pass_yds["format"], "integer");

    // Possession time only applies to the offense table.
    let (_, _, defense_body) =
        send_request(&app, Method::GET, "/api/v1/metrics?side=defense").await;
    let defense_metrics = defense_body["metrics"].as_array().unwrap();
    assert!(defense_metrics.iter().all(|m| m["key"] != "top"));
    assert!(defense_metrics.len() < metrics.len());
}

#[tokio::test]
async fn health_and_liveness() {
    let (app, _) = test_app();

    let (status, _, body) = send_request(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["source"], "fixture");
    assert_eq!(body["cache"]["ttlSeconds"], 300);

    let (status, _, body) = send_request(&app, Method::GET, "/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}
