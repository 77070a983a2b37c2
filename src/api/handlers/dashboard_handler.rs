//! Dashboard handlers: stats, activity feed, realtime events.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    response::Json,
    routing::get,
    Router,
};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;

use crate::api::AppState;
use crate::domain::TalentActivity;
use crate::errors::AppResult;
use crate::services::{DashboardStats, StatsPeriod};
use crate::types::ApiResponse;

/// Stats window selection
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct StatsQuery {
    #[serde(default)]
    pub period: StatsPeriod,
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/activity", get(activity))
        .route("/events", get(events))
}

/// Headline catalog numbers
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "Dashboard",
    params(StatsQuery),
    responses(
        (status = 200, description = "Catalog stats", body = DashboardStats)
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let stats = state.dashboard_service.stats(query.period).await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// Recent registrations feed snapshot
#[utoipa::path(
    get,
    path = "/dashboard/activity",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Most recent registrations, newest first")
    )
)]
pub async fn activity(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<TalentActivity>>>> {
    Ok(Json(ApiResponse::success(state.feed.snapshot().await)))
}

/// Realtime registration events as server-sent events.
///
/// Each event is one JSON-encoded `TalentEvent`. Lagged subscribers
/// silently skip the dropped messages.
#[utoipa::path(
    get,
    path = "/dashboard/events",
    tag = "Dashboard",
    responses(
        (status = 200, description = "SSE stream of talent events")
    )
)]
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.bus.subscribe()).filter_map(|msg| async move {
        match msg {
            Ok(event) => match Event::default().json_data(&event) {
                Ok(sse_event) => Some(Ok(sse_event)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to encode talent event");
                    None
                }
            },
            // RecvError::Lagged, drop and continue
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
