use std::net::SocketAddr;
use std::sync::Arc;

use orderflow_api::{app, AppState};
use orderflow_core::{CartRepository, OrderRepository};
use orderflow_store::{build_shop, Config, JsonCartRepository, MemoryCartRepository, MemoryOrderRepository};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderflow_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    info!("Starting Orderflow API on port {}", config.server.port);

    let mut shop = build_shop(&config.catalog)?;

    let carts: Arc<dyn CartRepository> = match &config.storage.cart_path {
        Some(path) => {
            info!(path = %path, "persisting cart to file");
            Arc::new(JsonCartRepository::new(path))
        }
        None => Arc::new(MemoryCartRepository::new()),
    };
    let orders: Arc<dyn OrderRepository> = Arc::new(MemoryOrderRepository::new());

    // Pick up the cart from the last run. A cart that no longer fits the
    // catalog is discarded rather than half-restored.
    match carts.load().await {
        Ok(records) if !records.is_empty() => {
            if let Err(e) = shop.restore_cart(&records) {
                warn!(error = %e, "discarding stored cart");
                if let Err(e) = carts.clear().await {
                    warn!(error = %e, "failed to clear stored cart");
                }
            } else {
                info!(lines = records.len(), "cart restored");
            }
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "failed to load stored cart"),
    }

    let app = app(AppState::new(shop, carts, orders));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
