//! Server configuration.
//!
//! Values are layered, later sources winning: built-in defaults, an
//! optional config file, then `HUBDB_*` environment variables. Command line
//! flags are applied on top by the binary.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::observability::LogFormat;

/// Document store backend selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A MongoDB server reached through `mongodb_uri`.
    #[default]
    Mongodb,
    /// A process-local store, lost on exit.
    Memory,
}

/// Configuration for the hubdb server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP listen address.
    pub api_addr: SocketAddr,
    /// Store backend.
    pub backend: Backend,
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Database holding every collection.
    pub database: String,
    /// Log level.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            backend: Backend::Mongodb,
            mongodb_uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "GitHub".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Environment variable prefix.
    pub const ENV_PREFIX: &'static str = "HUBDB";

    /// Loads defaults, then `path` if it exists, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(Self::ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}
