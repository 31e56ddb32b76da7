//! recall-server - REST API server binary.
//!
//! Wires the engine over the in-memory reference backend. Deployments with
//! real index/store implementations build their own binary against
//! recall-core and reuse `create_server`.

use std::net::SocketAddr;
use std::sync::Arc;

use recall_core::stores::{HashingEmbedder, InMemoryStore};
use recall_core::{SearchConfig, SearchOrchestrator};
use recall_server::{create_server, AppState};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("recall_server=debug".parse()?),
        )
        .init();

    // Get configuration from environment
    let host = std::env::var("RECALL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("RECALL_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    // Engine over the in-memory reference backend
    let embedder = Arc::new(HashingEmbedder::default());
    let store = Arc::new(InMemoryStore::new(embedder.clone()));
    let engine = SearchOrchestrator::new(
        SearchConfig::default(),
        store.clone(),
        embedder,
        store.clone(),
        store,
    )?;

    let state = AppState::new(Arc::new(engine));
    let app = create_server(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting recall-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
