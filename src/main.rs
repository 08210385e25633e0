//! Server binary: loads config, connects the store, serves the API until Ctrl-C.

use starwars_api::{app, AppState, MemoryStore, PgStore, ServerConfig, StoreBackend};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("starwars_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.bind_addr(), backend = ?config.backend, "loaded configuration");

    let state = match config.backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database_url, config.max_connections)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "error connecting to database"))?;
            tracing::info!("connected to database");
            AppState::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            AppState::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
