//! Table endpoints
//!
//! The two cached read endpoints, one per upstream table. Both fresh and
//! stale-fallback service return 200 with the cache status in the
//! `x-cache-status` header; an upstream failure with an empty cache is the
//! only path to an error status.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::models::StatKind;
use crate::web::responses::{error_response, ok_with_cache_status, StatTableResponse};
use crate::web::{AppState, RequestContext};

pub async fn offense_table(State(state): State<AppState>, context: RequestContext) -> Response {
    stat_table(state, context, StatKind::Offense).await
}

pub async fn defense_table(State(state): State<AppState>, context: RequestContext) -> Response {
    stat_table(state, context, StatKind::Defense).await
}

async fn stat_table(state: AppState, context: RequestContext, kind: StatKind) -> Response {
    match state.cache.get(kind, state.source.as_ref()).await {
        Ok(table) => {
            let status = table.status;
            debug!(
                request_id = %context.request_id,
                "serving {} table ({})",
                kind,
                status.as_str()
            );
            let body = StatTableResponse::from_table(state.config.dataset.season, kind, table);
            ok_with_cache_status(body, status.as_str())
        }
        Err(error) => {
            warn!(
                request_id = %context.request_id,
                "{} table unavailable: {}",
                kind,
                error
            );
            error_response(&error, context.request_id).into_response()
        }
    }
}
