use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{ExternalProduct, NewItem},
    AppState,
};

pub const UNKNOWN_BRAND: &str = "Unknown";

// ── GET /external/barcode/:barcode ───────────────────────────────────────────

pub async fn lookup_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<(StatusCode, Json<ExternalProduct>)> {
    let product = fetch_product(&state, &barcode).await?;
    info!(%barcode, name = %product.name, "Looked up upstream product");
    Ok((StatusCode::OK, Json(product)))
}

// ── GET /external/search?q= ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<(StatusCode, Json<Vec<ExternalProduct>>)> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("query parameter 'q' is required".to_string()))?;

    let start = Instant::now();
    let result = state.upstream.search(query).await;
    let count = result.as_ref().map(Vec::len).unwrap_or(0);
    state
        .metrics
        .write()
        .await
        .record_upstream("search", start.elapsed(), count, result.is_ok());

    let products = result?;
    info!(
        query,
        count,
        limit = state.upstream.search_limit(),
        "Searched upstream products"
    );
    Ok((StatusCode::OK, Json(products)))
}

// ── POST /inventory/enrich/:barcode ──────────────────────────────────────────

pub async fn enrich_item(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<(StatusCode, Json<crate::models::Item>)> {
    let product = fetch_product(&state, &barcode).await?;
    let new = enriched_item(product);

    let start = Instant::now();
    let item = state.store.write().await.create(new);
    state
        .metrics
        .write()
        .await
        .record_store("create", start.elapsed(), 1, true);

    info!(id = item.id, %barcode, name = %item.name, "Created item from upstream product");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Local item for an upstream product: no price and no stock yet, blank
/// upstream names replaced so the item still has a name and brand.
pub fn enriched_item(product: ExternalProduct) -> NewItem {
    let name = match product.name.trim() {
        "" => format!("Product {}", product.barcode),
        name => name.to_string(),
    };
    let brand = match product.brand.trim() {
        "" => UNKNOWN_BRAND.to_string(),
        brand => brand.to_string(),
    };

    NewItem {
        sku: String::new(),
        name,
        brand,
        price: 0.0,
        stock: 0,
        barcode: product.barcode,
        ingredients_text: product.ingredients_text,
    }
}

// ── Shared upstream lookup ────────────────────────────────────────────────────

async fn fetch_product(state: &AppState, barcode: &str) -> AppResult<ExternalProduct> {
    if barcode.is_empty() || !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest("barcode must be numeric".to_string()));
    }

    let start = Instant::now();
    let result = state.upstream.fetch_product(barcode).await;
    let found = matches!(result, Ok(Some(_)));
    state
        .metrics
        .write()
        .await
        .record_upstream("barcode", start.elapsed(), found as usize, result.is_ok());

    result?.ok_or_else(|| AppError::NotFound(format!("product {} not found", barcode)))
}
