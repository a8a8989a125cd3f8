use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::udp::UdpTransport;
use async_trait::async_trait;
use ferrous_relay_application::ports::{UpstreamAnswer, UpstreamExchanger};
use ferrous_relay_domain::{DnsQuery, DomainError, ResolverEndpoint};
use std::time::{Duration, Instant};
use tracing::debug;

/// Single-shot UDP exchange with an upstream resolver.
pub struct UdpForwarder {
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn query(
        &self,
        query: &DnsQuery,
        endpoint: &ResolverEndpoint,
    ) -> Result<UpstreamAnswer, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query_with_id(&query.domain, &query.record_type)?;

        let transport = UdpTransport::new(endpoint.socket_addr());
        let response_bytes = transport.send(&request_bytes, self.timeout).await?;

        ResponseParser::parse(&response_bytes, id)
    }
}

#[async_trait]
impl UpstreamExchanger for UdpForwarder {
    async fn exchange(
        &self,
        query: &DnsQuery,
        endpoint: &ResolverEndpoint,
    ) -> Result<UpstreamAnswer, DomainError> {
        let start = Instant::now();

        let answer = self
            .query(query, endpoint)
            .await
            .map_err(|e| DomainError::exchange_failed(endpoint, &e))?;

        debug!(
            domain = %query.domain,
            server = %endpoint,
            status = ResponseParser::rcode_to_status(answer.response_code),
            latency_ms = start.elapsed().as_millis() as u64,
            "Upstream exchange completed"
        );

        Ok(answer)
    }
}
