pub mod serializers;
pub mod urls;
pub mod views;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

#[derive(Clone, Debug)]
pub struct ServerCfg {
    /// Bind address (default 0.0.0.0). Override with HOST.
    pub host: IpAddr,
    /// Listen port (default 8900). Override with PORT.
    pub port: u16,
    /// Request body cap; data URLs of canvas snapshots get large (default 25 MiB).
    pub body_limit_bytes: usize,
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8900,
            body_limit_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ServerCfg {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "HOST is not an IP address, using default");
                defaults.host
            }),
            None => defaults.host,
        };
        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.body_limit_bytes);

        Self {
            host,
            port,
            body_limit_bytes,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
