use crate::dns::transport::resolver;
use ferrous_relay_application::ports::UpstreamSelector;
use ferrous_relay_domain::{DomainError, ResolverEndpoint, UpstreamAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Ordered, non-empty set of upstream resolvers with a shared round-robin cursor.
///
/// The cursor always stays in `[0, len)`; each `next()` returns the slot under
/// the cursor and moves it one position, wrapping at the end.
pub struct RoundRobinPool {
    endpoints: Vec<ResolverEndpoint>,
    cursor: AtomicUsize,
}

impl RoundRobinPool {
    pub fn new(endpoints: Vec<ResolverEndpoint>) -> Result<Self, DomainError> {
        if endpoints.is_empty() {
            return Err(DomainError::NoUpstreamServers);
        }

        Ok(Self {
            endpoints,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Builds the pool from configured entries, resolving hostnames once.
    ///
    /// A hostname contributes the first address the system resolver returns,
    /// so every configured entry is exactly one slot. Resolution failure is an
    /// error; there is no runtime re-resolution.
    pub async fn from_upstreams(
        upstreams: &[UpstreamAddr],
        resolve_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let mut endpoints = Vec::with_capacity(upstreams.len());

        for upstream in upstreams {
            let addr = match upstream {
                UpstreamAddr::Resolved(addr) => *addr,
                UpstreamAddr::Unresolved { hostname, port } => {
                    let addrs = resolver::resolve_all(hostname, *port, resolve_timeout).await?;
                    let first = addrs[0];
                    info!(hostname = %hostname, resolved = %first, "Upstream hostname resolved");
                    first
                }
            };
            endpoints.push(ResolverEndpoint::new(addr));
        }

        Self::new(endpoints)
    }

    fn next_index(&self) -> usize {
        let len = self.endpoints.len();
        match self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some((current + 1) % len)
            }) {
            Ok(previous) | Err(previous) => previous,
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[ResolverEndpoint] {
        &self.endpoints
    }

    /// Current cursor position; the slot the next call will return.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }
}

impl UpstreamSelector for RoundRobinPool {
    fn next(&self) -> ResolverEndpoint {
        let index = self.next_index();
        let endpoint = self.endpoints[index];
        debug!(strategy = "round_robin", servers = self.endpoints.len(), index, server = %endpoint, "Round-robin");
        endpoint
    }
}
