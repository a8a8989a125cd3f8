use ferrous_relay_domain::ResolverEndpoint;

/// Picks the upstream resolver for the next forwarded query.
pub trait UpstreamSelector: Send + Sync {
    /// Returns the endpoint to use and advances the selection state.
    ///
    /// Must be atomic with respect to concurrent callers.
    fn next(&self) -> ResolverEndpoint;
}
