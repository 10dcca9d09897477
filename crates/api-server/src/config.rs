//! Environment-driven configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_DATA_DIR: &str = ".todo-data";
const ITEMS_FILE_NAME: &str = "todo_items.json";

/// Which store backs the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    File,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid TODO_BIND_ADDR '{0}'")]
    BindAddr(String),
    #[error("unsupported TODO_STORE '{0}', expected 'memory' or 'file'")]
    Store(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let bind_raw = var("TODO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_raw.clone()))?;

        let store = match var("TODO_STORE") {
            None => StoreKind::File,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "memory" | "in-memory" | "inmemory" => StoreKind::Memory,
                "file" | "json" => StoreKind::File,
                _ => return Err(ConfigError::Store(raw)),
            },
        };

        let data_dir = var("TODO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            bind_addr,
            store,
            data_dir,
        })
    }

    /// Where the file store keeps its items
    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(ITEMS_FILE_NAME)
    }
}
