//! Ferrous Relay Domain Layer
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod record_type;
pub mod resolver_endpoint;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use resolver_endpoint::{ResolverEndpoint, UpstreamAddr, DEFAULT_DNS_PORT};
