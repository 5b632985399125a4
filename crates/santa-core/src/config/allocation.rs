//! Link allocation configuration.

use serde::{Deserialize, Serialize};

/// Link allocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Number of links handed out on a user's first allocation request.
    #[serde(default = "default_initial_batch")]
    pub initial_batch: usize,
    /// Number of links handed out per "additional" allocation request.
    #[serde(default = "default_additional_batch")]
    pub additional_batch: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            initial_batch: default_initial_batch(),
            additional_batch: default_additional_batch(),
        }
    }
}

fn default_initial_batch() -> usize {
    3
}

fn default_additional_batch() -> usize {
    1
}
