use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    handlers::{parse_item_id, JsonObject},
    models::Item,
    seed,
    validation::{validate_new, validate_patch},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_items(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Vec<Item>>)> {
    let start = Instant::now();
    let items = state.store.read().await.list();
    let elapsed = start.elapsed();

    debug!(count = items.len(), "Listed items");
    state
        .metrics
        .write()
        .await
        .record_store("list", elapsed, items.len(), true);

    Ok((StatusCode::OK, Json(items)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let id = parse_item_id(&raw_id)?;

    let start = Instant::now();
    let result = state.store.read().await.get(id);
    state
        .metrics
        .write()
        .await
        .record_store("get", start.elapsed(), result.is_ok() as usize, result.is_ok());

    let item = result?;
    debug!(id, "Fetched item");
    Ok((StatusCode::OK, Json(item)))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_item(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<Item>)> {
    let new = validate_new(&body).map_err(AppError::Validation)?;

    let start = Instant::now();
    let item = state.store.write().await.create(new);
    state
        .metrics
        .write()
        .await
        .record_store("create", start.elapsed(), 1, true);

    info!(id = item.id, name = %item.name, "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

// ── Partial update ────────────────────────────────────────────────────────────

pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<JsonObject, AppError>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let id = parse_item_id(&raw_id)?;

    let start = Instant::now();
    let result = apply_patch(&state, id, body).await;
    state
        .metrics
        .write()
        .await
        .record_store("update", start.elapsed(), result.is_ok() as usize, result.is_ok());

    let item = result?;
    info!(id, "Updated item");
    Ok((StatusCode::OK, Json(item)))
}

/// A missing item is reported before anything about the body.
async fn apply_patch(
    state: &AppState,
    id: u64,
    body: Result<JsonObject, AppError>,
) -> AppResult<Item> {
    let mut store = state.store.write().await;
    store.get(id)?;

    let JsonObject(body) = body?;
    let patch = validate_patch(&body).map_err(AppError::Validation)?;
    if patch.is_empty() {
        debug!(id, "Empty patch, item unchanged");
    }
    store.update(id, patch)
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_item_id(&raw_id)?;

    let start = Instant::now();
    let result = state.store.write().await.delete(id);
    state
        .metrics
        .write()
        .await
        .record_store("delete", start.elapsed(), result.is_ok() as usize, result.is_ok());

    result?;
    info!(id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /seed ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SeedParams {
    /// Number of items to generate (default: 10, max: 1 000)
    pub count: Option<usize>,
}

pub async fn seed_items(
    State(state): State<AppState>,
    Query(params): Query<SeedParams>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let count = params.count.unwrap_or(10).min(1_000);
    let items = seed::random_items(&mut StdRng::from_entropy(), count);

    let start = Instant::now();
    let mut store = state.store.write().await;
    for item in items {
        store.create(item);
    }
    let total = store.len();
    drop(store);
    let elapsed = start.elapsed();

    state
        .metrics
        .write()
        .await
        .record_store("seed", elapsed, count, true);

    info!(seeded = count, total, seed_ms = elapsed.as_millis(), "Seeding complete");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "seeded": count,
            "total": total,
        })),
    ))
}
