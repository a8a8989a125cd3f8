use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstreamAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Upstream exchange with {server} failed: {reason}")]
    UpstreamExchangeFailed { server: String, reason: String },

    #[error("Diagnostic record could not be built: {0}")]
    DiagnosticRecord(String),

    #[error("No upstream servers configured")]
    NoUpstreamServers,
}

impl DomainError {
    /// Collapses any lower-level failure into the single exchange failure kind,
    /// keeping the original cause as text.
    pub fn exchange_failed(server: impl ToString, cause: &DomainError) -> Self {
        match cause {
            DomainError::UpstreamExchangeFailed { .. } => cause.clone(),
            other => DomainError::UpstreamExchangeFailed {
                server: server.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
