//! Connection configuration and establishment.

#![allow(clippy::missing_errors_doc)]

use std::time::Duration;

use tokio::time::timeout;

use super::stream::{ImapStream, connect_plain, connect_tls};
use crate::{Error, Result};

/// Default time allowed for TCP connect plus TLS handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport security for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    /// TLS from the first byte (implicit TLS, typically port 993).
    Tls,
    /// No encryption. Only sensible against local test servers.
    Plain,
}

/// Connection parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Transport security.
    pub security: Security,
    /// Time allowed for connection establishment.
    pub connect_timeout: Duration,
}

impl Config {
    /// Creates a configuration with the default connect timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, security: Security) -> Self {
        Self {
            host: host.into(),
            port,
            security,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Establishes a connection according to the configuration.
///
/// The whole establishment (TCP connect and, for TLS, the handshake) is
/// bounded by `config.connect_timeout`.
pub async fn connect(config: &Config) -> Result<ImapStream> {
    let attempt = async {
        match config.security {
            Security::Tls => connect_tls(&config.host, config.port).await,
            Security::Plain => connect_plain(&config.host, config.port).await,
        }
    };

    timeout(config.connect_timeout, attempt)
        .await
        .map_err(|_| Error::Timeout(config.connect_timeout))?
}
