//! Command-line and environment configuration
//!
//! Flags take precedence over environment variables (`PORT`, `BIND`), which
//! take precedence over the defaults.

use std::net::SocketAddr;

use clap::Parser;
use thiserror::Error;

/// Default listening port when neither `--port` nor `PORT` is set
const DEFAULT_PORT: u16 = 3000;

/// Default bind address
const DEFAULT_BIND: &str = "0.0.0.0";

/// Error types for configuration resolution
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The PORT environment variable is not a valid port number
    #[error("Invalid port value: '{0}'")]
    InvalidPort(String),

    /// The resolved bind address cannot be parsed
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddr(String, String),
}

/// Country aggregation API server
#[derive(Parser, Debug)]
#[command(name = "countrylens")]
#[command(about = "Serves merged country metadata and population statistics")]
#[command(version)]
pub struct Cli {
    /// Port to listen on (overrides the PORT environment variable; default 3000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind (overrides the BIND environment variable; default 0.0.0.0)
    #[arg(long)]
    pub bind: Option<String>,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub bind: String,
    /// Listening port
    pub port: u16,
}

impl ServerConfig {
    /// Resolves configuration from parsed CLI arguments and the environment
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve(
            cli.port,
            std::env::var("PORT").ok(),
            cli.bind.clone(),
            std::env::var("BIND").ok(),
        )
    }

    /// Pure resolution over explicit flag and environment values
    fn resolve(
        port_flag: Option<u16>,
        port_env: Option<String>,
        bind_flag: Option<String>,
        bind_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match (port_flag, port_env) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            (None, None) => DEFAULT_PORT,
        };

        let bind = bind_flag
            .or(bind_env)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Ok(Self { bind, port })
    }

    /// The socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|err: std::net::AddrParseError| {
                ConfigError::InvalidBindAddr(self.bind.clone(), err.to_string())
            })
    }
}
