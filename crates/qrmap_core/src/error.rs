//! Error types for qrmap.

use thiserror::Error;

/// Unified error type for routing compilation.
#[derive(Error, Debug)]
pub enum MapError {
    /// The device graph cannot host every logical qubit
    #[error("topology too small: {logical} logical qubits but only {physical} physical nodes")]
    TopologyTooSmall { logical: usize, physical: usize },

    /// Routing requested a path between nodes in disconnected components
    #[error("no path between nodes {0} and {1}")]
    NoPath(usize, usize),

    /// A placement strategy finished with unassigned slots
    #[error("placement left {unplaced} qubit(s) without a node")]
    Unplaceable { unplaced: usize },

    /// Invalid qubit index
    #[error("invalid qubit index {0}, circuit has {1} qubits")]
    InvalidQubit(usize, usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for qrmap operations.
pub type Result<T> = std::result::Result<T, MapError>;
