//! Server configuration, read from the environment (and `.env`, loaded by
//! `main` before this runs).

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Runtime settings for the Primer server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longest message, in characters, the encrypt/decrypt routes accept.
    pub max_message_chars: usize,
}

impl ServerConfig {
    /// Load configuration from `PRIMER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("PRIMER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("PRIMER_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("PRIMER_PORT must be a port number")?;
        let max_message_chars: usize = lookup("PRIMER_MAX_MESSAGE_CHARS")
            .unwrap_or_else(|| "1024".into())
            .parse()
            .context("PRIMER_MAX_MESSAGE_CHARS must be a non-negative integer")?;

        Ok(Self {
            host,
            port,
            max_message_chars,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
