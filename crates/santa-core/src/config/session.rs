//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in hours from issuance.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Interval for expired session cleanup in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    72
}

fn default_sweep_interval() -> u64 {
    3600
}
