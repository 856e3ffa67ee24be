use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod seed;
pub mod store;
pub mod upstream;
pub mod validation;

use crate::config::Config;
use crate::metrics::MetricsStore;
use crate::store::InventoryStore;
use crate::upstream::UpstreamClient;

/// Shared application state — cheap to clone (all heap behind Arc).
///
/// The inventory is the only mutable shared data; every write goes through
/// the `RwLock` so concurrent creates and deletes are serialized.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InventoryStore>>,
    pub upstream: Arc<UpstreamClient>,
    pub metrics: Arc<RwLock<MetricsStore>>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = if config.seed_sample_items {
            InventoryStore::with_sample_items()
        } else {
            InventoryStore::new()
        };
        let upstream = UpstreamClient::new(
            config.upstream_base_url.as_str(),
            config.upstream_timeout,
            config.search_limit,
        )?;

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            upstream: Arc::new(upstream),
            metrics: Arc::new(RwLock::new(MetricsStore::with_max_entries(
                config.metrics_max_entries,
            ))),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Inventory CRUD ──────────────────────────────────────────────────
        .route(
            "/inventory",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route(
            "/inventory/:id",
            get(handlers::inventory::get_item)
                .patch(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        )

        // ── Seed ────────────────────────────────────────────────────────────
        .route("/seed", post(handlers::inventory::seed_items))

        // ── Upstream product database ───────────────────────────────────────
        .route(
            "/inventory/enrich/:barcode",
            post(handlers::external::enrich_item),
        )
        .route(
            "/external/barcode/:barcode",
            get(handlers::external::lookup_barcode),
        )
        .route("/external/search", get(handlers::external::search_products))

        // ── Metrics ─────────────────────────────────────────────────────────
        .route(
            "/metrics",
            get(handlers::metrics::get_metrics).delete(handlers::metrics::clear_metrics),
        )
        .route("/metrics/export/csv", get(handlers::metrics::export_csv))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
