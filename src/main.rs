use tracing::info;

use food_inventory_service::{build_router, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,food_inventory_service=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!(
        upstream = %config.upstream_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        search_limit = config.search_limit,
        "Food inventory service starting"
    );

    let state = AppState::new(&config)?;
    info!(items = state.store.read().await.len(), "Inventory ready (in-memory)");

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
