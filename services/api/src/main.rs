use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod catalog;
mod config;
mod error;
mod middleware;
mod models;
mod remote;
mod repositories;
mod routes;
mod state;

use crate::{config::GatewayConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("api=info,auth=info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting storefront gateway");

    let config = GatewayConfig::from_env()?;
    info!(
        "Catalog at {}, posts at {}, timeout {}s",
        config.catalog_url, config.posts_url, config.request_timeout_secs
    );

    let app_state = AppState::from_config(&config)?;
    let app = routes::create_router(app_state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
