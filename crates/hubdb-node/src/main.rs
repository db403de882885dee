//! hubdb Node - document-backed code hosting API.

use anyhow::Context;
use clap::Parser;
use hubdb_node::config::{Backend, ServerConfig};
use hubdb_node::observability::{init_logging, LogFormat};
use hubdb_node::server::{open_database, serve, shutdown_signal};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

/// hubdb Node - REST API over a document store
#[derive(Parser, Debug)]
#[command(name = "hubdb-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "hubdb.yaml")]
    config: PathBuf,

    /// API listen address
    #[arg(long)]
    api_addr: Option<SocketAddr>,

    /// Document store backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// MongoDB connection string
    #[arg(long)]
    mongodb_uri: Option<String>,

    /// Database name
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(addr) = self.api_addr {
            config.api_addr = addr;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(uri) = self.mongodb_uri {
            config.mongodb_uri = uri;
        }
        if let Some(database) = self.database {
            config.database = database;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(Some(&args.config))
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    args.apply(&mut config);

    init_logging(&config.log_level, config.log_format);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting hubdb node");

    let db = match open_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(
                error = %e,
                backend = ?config.backend,
                "Error connecting to document store"
            );
            std::process::exit(1);
        }
    };

    let listener = TcpListener::bind(config.api_addr)
        .await
        .with_context(|| format!("binding {}", config.api_addr))?;
    tracing::info!(addr = %config.api_addr, "Server running");

    serve(listener, db, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}
