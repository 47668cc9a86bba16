//! Environment-driven configuration for service binaries.
//!
//! All knobs arrive through environment variables read once at startup; no
//! config files, no dynamic reload.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind (default: 0.0.0.0).
    pub host: IpAddr,
    /// Port to bind (default: 8080).
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// - `SERVICE_HOST`: bind address (default: "0.0.0.0")
    /// - `SERVICE_PORT`: bind port (default: 8080)
    ///
    /// Unparseable values fall back to the defaults rather than aborting
    /// startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("SERVICE_HOST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.host);

        let port = std::env::var("SERVICE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
