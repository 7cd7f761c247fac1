use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use config::DashboardConfig;
use services::{dashboard_service, table_service};
use state::AppState;
use utils::ColorMap;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crypto_chart=debug,tower_http=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📊 Starting {}", dashboard_service::APP_TITLE);

    let config = DashboardConfig::from_env();

    // The table is loaded once and shared read-only for the process lifetime
    info!("Loading price table from {}...", config.csv_path.display());
    let table = match table_service::load_price_table(&config.csv_path, &table_service::COIN_COLUMNS) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load price table: {}", e);
            return;
        }
    };

    match table.date_bounds(table_service::DATE_COLUMN) {
        Some((first, last)) => info!("Price history covers {} to {}", first, last),
        None => info!("Price file holds no rows"),
    }

    let addr: SocketAddr = match config.address().parse() {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid bind address {}: {}", config.address(), e);
            return;
        }
    };

    let state = AppState::new(config, table, ColorMap::coin_defaults());

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return;
        }
    };

    info!("Dashboard listening on http://{}/", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping dashboard");
}
