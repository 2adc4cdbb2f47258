use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the users_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersInfoConfig {
    /// Deadline for list/get before the handler gives up with 504.
    #[serde(default = "default_read_timeout", with = "humantime_serde")]
    pub read_timeout: Duration,
}

impl Default for UsersInfoConfig {
    fn default() -> Self {
        Self {
            read_timeout: default_read_timeout(),
        }
    }
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(2)
}
