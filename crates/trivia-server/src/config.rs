//! Server configuration, read from the environment:
//! - `TRIVIA_DB_PATH`: SQLite database file (default: trivia.db)
//! - `TRIVIA_HOST`, `TRIVIA_PORT`: bind address (default: 0.0.0.0:5000)
//! - `TRIVIA_SEED`: load the default categories and questions into an empty store

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match var("TRIVIA_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("TRIVIA_PORT is not a valid port: {:?}", raw))?,
            None => 5000,
        };

        Ok(Self {
            db_path: var("TRIVIA_DB_PATH")
                .unwrap_or_else(|| "trivia.db".into())
                .into(),
            host: var("TRIVIA_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            seed: var("TRIVIA_SEED").is_some_and(|v| {
                matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
            }),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
