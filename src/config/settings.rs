//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STORAGE_PUBLIC_URL,
    DEFAULT_STORAGE_ROOT,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Filesystem root of the photo object store
    pub storage_root: String,
    /// Base URL under which stored photos are publicly reachable
    pub storage_public_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_root", &self.storage_root)
            .field("storage_public_url", &self.storage_public_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            storage_root: env::var("STORAGE_ROOT")
                .unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string()),
            storage_public_url: env::var("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|_| DEFAULT_STORAGE_PUBLIC_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
