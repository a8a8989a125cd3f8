mod upstream_exchanger;
mod upstream_selector;

pub use upstream_exchanger::{UpstreamAnswer, UpstreamExchanger};
pub use upstream_selector::UpstreamSelector;

// Re-export for convenience
pub use ferrous_relay_domain::{DnsQuery, ResolverEndpoint};
