//! Web layer module
//!
//! HTTP interface for the stats service: thin handlers over the cache,
//! ranking engine and bar allocator, with standardized envelopes in
//! `responses` and a request-id extractor in `extractors`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::sources::StatSource;

pub mod extractors;
pub mod handlers;
pub mod responses;

pub use extractors::RequestContext;
pub use responses::{ErrorEnvelope, StatTableResponse, CACHE_STATUS_HEADER};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: SnapshotCache,
    pub source: Arc<dyn StatSource>,
}

/// Build the full router for the given state
///
/// Exposed separately from [`WebServer`] so tests can drive the router with
/// an injected source and cache.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .nest("/api/v1", api_v1_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // The two cached table endpoints
        .route("/stats/offense", get(handlers::stats::offense_table))
        .route("/stats/defense", get(handlers::stats::defense_table))
        // Derived views
        .route("/rankings", get(handlers::compare::metric_rankings))
        .route("/compare", get(handlers::compare::compare_teams))
        // Static metric registry
        .route("/metrics", get(handlers::compare::list_metrics))
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, cache: SnapshotCache, source: Arc<dyn StatSource>) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = create_router(AppState {
            config,
            cache,
            source,
        });
        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}
