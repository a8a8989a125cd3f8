use ferrous_relay_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::{DnsServerHandler, RoundRobinPool, UdpForwarder};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const HOSTNAME_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let upstreams = config.upstream_addrs()?;
        let pool = Arc::new(RoundRobinPool::from_upstreams(&upstreams, HOSTNAME_RESOLVE_TIMEOUT).await?);

        let timeout = Duration::from_millis(config.upstream.query_timeout_ms);
        let forwarder = Arc::new(UdpForwarder::new(timeout));

        let upstream_list: Vec<String> = pool.endpoints().iter().map(|e| e.to_string()).collect();
        info!(
            servers = pool.len(),
            upstreams = %upstream_list.join(", "),
            timeout_ms = config.upstream.query_timeout_ms,
            "Upstream pool ready"
        );

        let use_case = Arc::new(ForwardDnsQueryUseCase::new(pool, forwarder));
        let handler = Arc::new(DnsServerHandler::new(use_case));

        Ok(Self { handler })
    }
}
