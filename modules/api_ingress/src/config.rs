use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP host configuration (`modules.api_ingress`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// `host:port` to listen on; empty means "use server.host/server.port".
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default)]
    pub cors_enabled: bool,
    /// Hard ceiling for any request, independent of per-handler deadlines.
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            cors_enabled: false,
            request_timeout: default_request_timeout(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}
