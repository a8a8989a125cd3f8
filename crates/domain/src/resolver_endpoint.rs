use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use crate::DomainError;

/// Port used when an upstream entry names only a host.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// An upstream entry as written in configuration, before hostname resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl FromStr for UpstreamAddr {
    type Err = DomainError;

    /// Accepts `IP:PORT`, `[IPv6]:PORT`, a bare IP (port 53) or `HOSTNAME:PORT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidUpstreamAddress(
                "empty upstream address".into(),
            ));
        }

        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(UpstreamAddr::Resolved(addr));
        }

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port_str)) => {
                let port = port_str.parse::<u16>().map_err(|e| {
                    DomainError::InvalidUpstreamAddress(format!(
                        "invalid port in '{}': {}",
                        s, e
                    ))
                })?;
                (host, port)
            }
            None => (s, DEFAULT_DNS_PORT),
        };

        if host.is_empty() || host.contains(':') || host.contains('/') {
            return Err(DomainError::InvalidUpstreamAddress(format!(
                "'{}'. Expected IP:PORT, [IPv6]:PORT, IP or HOSTNAME:PORT",
                s
            )));
        }

        Ok(UpstreamAddr::Unresolved {
            hostname: host.into(),
            port,
        })
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

/// Network address of one upstream resolver. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverEndpoint {
    addr: SocketAddr,
}

impl ResolverEndpoint {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl From<SocketAddr> for ResolverEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

impl FromStr for ResolverEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<UpstreamAddr>()? {
            UpstreamAddr::Resolved(addr) => Ok(Self::new(addr)),
            UpstreamAddr::Unresolved { hostname, port } => {
                Err(DomainError::InvalidUpstreamAddress(format!(
                    "'{}:{}' must be resolved before use",
                    hostname, port
                )))
            }
        }
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
