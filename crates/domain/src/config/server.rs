use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// IP literal to listen on (`0.0.0.0`, `::`, `127.0.0.1`); hostnames are rejected.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl ServerConfig {
    /// Socket address to bind. IPv6 literals may be written with or without brackets.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self
            .bind_address
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']');

        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.dns_port))
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "Bind address '{}' must be an IP address",
                    self.bind_address
                ))
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
