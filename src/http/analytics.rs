//! Analytics event ingestion.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::http::server::AppState;

/// Event name length cap; anything longer is garbage or abuse.
const MAX_EVENT_NAME_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
}

pub async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<AnalyticsEvent>,
) -> Response {
    let name = event.name.trim();
    if name.is_empty() || name.len() > MAX_EVENT_NAME_LEN {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "event name is required" })),
        )
            .into_response();
    }

    tracing::debug!(
        event = %name,
        path = event.path.as_deref().unwrap_or(""),
        referrer = event.referrer.as_deref().unwrap_or(""),
        "Analytics event"
    );

    state.analytics.record(name);
    state.sink.forward_event(name);

    StatusCode::ACCEPTED.into_response()
}
