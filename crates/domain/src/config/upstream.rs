use serde::{Deserialize, Serialize};

/// Upstream resolvers, contacted in round-robin order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Per-exchange timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec![
        "8.8.8.8:53".to_string(),
        "8.8.4.4:53".to_string(),
        "208.67.222.222:53".to_string(),
        "208.67.220.220:53".to_string(),
    ]
}

fn default_query_timeout_ms() -> u64 {
    2000
}
