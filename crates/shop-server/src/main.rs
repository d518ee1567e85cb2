//! Ignite Shop HTTP Server
//!
//! Axum-based server that renders Stripe catalog products as static pages,
//! regenerates them hourly, and starts hosted checkout sessions.

mod config;
mod handlers;
mod pages;
mod render;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_payments::{Catalog, CheckoutProvider, MockCatalog, StripeClient};

use crate::config::ServerConfig;
use crate::pages::ProductPages;
use crate::render::PageRenderer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize Stripe
    let (catalog, checkout): (Arc<dyn Catalog>, Option<Arc<dyn CheckoutProvider>>) =
        match StripeClient::from_env() {
            Ok(stripe) => {
                tracing::info!("✓ Stripe configured");
                let stripe = Arc::new(stripe);
                let catalog: Arc<dyn Catalog> = stripe.clone();
                let checkout: Arc<dyn CheckoutProvider> = stripe;
                (catalog, Some(checkout))
            }
            Err(e) => {
                tracing::warn!("⚠ Stripe not configured - product pages and checkout disabled");
                tracing::warn!("  {}", e);
                tracing::warn!("  Set STRIPE_SECRET_KEY and APP_URL in .env");
                let offline = MockCatalog::new();
                offline.set_unavailable(true);
                let catalog: Arc<dyn Catalog> = Arc::new(offline);
                (catalog, None)
            }
        };

    let pages = Arc::new(ProductPages::new(
        catalog,
        PageRenderer::new(config.shop_name.clone()),
    ));

    if !config.prerender.is_empty() {
        let generated = pages.prerender(&config.prerender).await;
        tracing::info!(
            "Prerendered {}/{} product pages",
            generated,
            config.prerender.len()
        );
    }

    // Build application state
    let state = AppState { pages, checkout };
    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 {} running on http://{}", config.shop_name, config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health        - Health check");
    tracing::info!("  GET  /product/{{id}}  - Product page");
    tracing::info!("  POST /api/checkout  - Create Stripe checkout");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
