//! Configuration for the routing pipeline.

use serde::{Deserialize, Serialize};

/// Configuration consumed by the routing driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Initial placement strategy: `random`, `majority` or `max_pairs`.
    /// Unknown names fall back to the identity placement.
    pub strategy: String,
    /// Number of upcoming interactions the router inspects when deciding
    /// which endpoint of a non-adjacent gate to move
    pub lookahead: usize,
    /// Seed for the placement/routing RNG; `None` draws from entropy
    pub rng_seed: Option<u64>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategy: "max_pairs".to_string(),
            lookahead: 10,
            rng_seed: None,
        }
    }
}

impl RoutingConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serializes configuration to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
