use async_trait::async_trait;
use ferrous_relay_domain::{DnsQuery, DomainError, ResolverEndpoint};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;

/// Sections and status of a successful upstream reply, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamAnswer {
    pub answers: Vec<Record>,
    /// Records from the AUTHORITY section (e.g. SOA for NXDOMAIN / NODATA).
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
    pub response_code: ResponseCode,
    /// TC bit of the upstream reply; the client decides whether to retry over TCP.
    pub truncated: bool,
}

impl UpstreamAnswer {
    pub fn new(response_code: ResponseCode) -> Self {
        Self {
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
            response_code,
            truncated: false,
        }
    }

    pub fn with_answers(mut self, answers: Vec<Record>) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_authorities(mut self, authorities: Vec<Record>) -> Self {
        self.authorities = authorities;
        self
    }

    pub fn with_additionals(mut self, additionals: Vec<Record>) -> Self {
        self.additionals = additionals;
        self
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn record_count(&self) -> usize {
        self.answers.len() + self.authorities.len() + self.additionals.len()
    }
}

#[async_trait]
pub trait UpstreamExchanger: Send + Sync {
    /// One request/response exchange with `endpoint`. No retry.
    ///
    /// Network failures, timeouts and malformed replies are all reported as
    /// [`DomainError::UpstreamExchangeFailed`].
    async fn exchange(
        &self,
        query: &DnsQuery,
        endpoint: &ResolverEndpoint,
    ) -> Result<UpstreamAnswer, DomainError>;
}
