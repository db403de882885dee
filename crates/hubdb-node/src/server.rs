//! Startup sequence: open the store, then serve.

use hubdb_storage::{Database, StorageError};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::config::{Backend, ServerConfig};

/// Opens the configured backend and verifies it answers.
///
/// Called once before the listener is bound; an error here means the
/// server must not start.
pub async fn open_database(config: &ServerConfig) -> Result<Database, StorageError> {
    let db = match config.backend {
        Backend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            Database::in_memory()
        }
        Backend::Mongodb => {
            let store =
                hubdb_storage::MongoStore::connect(&config.mongodb_uri, &config.database).await?;
            Database::new(Arc::new(store))
        }
    };

    db.ping().await?;
    tracing::info!(
        backend = ?config.backend,
        database = %config.database,
        "Connected to document store"
    );
    Ok(db)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, db: Database, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(AppState::new(db));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
