//! Configuration
//!
//! Environment-driven settings for the agent backend connection.

use std::time::Duration;

/// Connection settings for the agent backend.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Endpoint receiving the talk POSTs
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/api/".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl AgentConfig {
    /// Build from environment, falling back to defaults:
    /// - `ADAPTA_ENDPOINT`: backend URL
    /// - `ADAPTA_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let endpoint = std::env::var("ADAPTA_ENDPOINT").unwrap_or(defaults.endpoint);
        let timeout = std::env::var("ADAPTA_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        Self { endpoint, timeout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000/api/");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
