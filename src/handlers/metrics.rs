use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::info;

use crate::{error::AppResult, AppState};

// ── GET /metrics ──────────────────────────────────────────────────────────────

pub async fn get_metrics(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let metrics = state.metrics.read().await;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "entries": metrics.len(),
            "max_entries": metrics.max_entries(),
            "evicted": metrics.evicted(),
            "aggregated": metrics.aggregated(),
        })),
    ))
}

// ── GET /metrics/export/csv ───────────────────────────────────────────────────

pub async fn export_csv(State(state): State<AppState>) -> AppResult<Response> {
    let csv = state.metrics.read().await.to_csv()?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"inventory_metrics.csv\"",
        )
        .body(Body::from(csv))
        .map_err(anyhow::Error::from)?;

    Ok(response)
}

// ── DELETE /metrics ───────────────────────────────────────────────────────────

pub async fn clear_metrics(State(state): State<AppState>) -> StatusCode {
    let mut metrics = state.metrics.write().await;
    let dropped = metrics.len();
    metrics.clear();

    info!(dropped, "Cleared metrics");
    StatusCode::NO_CONTENT
}
