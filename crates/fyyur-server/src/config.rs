use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Settings for the Fyyur site, from `FYYUR_DB_PATH`, `FYYUR_HOST` and
/// `FYYUR_PORT`.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("FYYUR_PORT")
            .map(|raw| {
                raw.parse::<u16>()
                    .with_context(|| format!("FYYUR_PORT is not a valid port: {:?}", raw))
            })
            .transpose()?
            .unwrap_or(5000);

        Ok(Self {
            db_path: var("FYYUR_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("fyyur.db")),
            host: var("FYYUR_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
