//! Server crate for the macro-picks suggestion engine.
//!
//! Contains the engine that coordinates catalog lookup, goal filtering and
//! ranking, the client projection, and the axum HTTP API in front of them.

use anyhow::{Context, Result};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tracing::info;

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod projection;
pub mod state;

pub use config::ServerConfig;
pub use engine::{Explanation, ScoredItem, SuggestError, SuggestionEngine};
pub use error::ApiError;
pub use http::{SuggestionRequest, router};
pub use projection::{Projection, SuggestionResult};
pub use state::AppState;

/// Bind, serve and wait for Ctrl+C or SIGTERM.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::from_config(&config)?;

    let app = router(state);

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
