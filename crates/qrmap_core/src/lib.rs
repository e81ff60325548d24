//! # qrmap Core
//!
//! Core types for qrmap, a connectivity-aware circuit routing compiler.
//!
//! This crate provides:
//! - `Gate`: quantum gate enumeration with wire accessors and remapping
//! - `Circuit`: ordered gate stream with validated construction
//! - `Topology`: undirected device graph with all-pairs shortest paths
//! - `RoutingConfig`: pipeline configuration
//! - `MapError`: unified error types
//!
//! ## Example
//!
//! ```rust
//! use qrmap_core::prelude::*;
//!
//! let mut circuit = Circuit::new(3);
//! circuit.add_gate(Gate::H(0)).unwrap();
//! circuit.add_gate(Gate::CNOT(0, 2)).unwrap();
//!
//! let device = Topology::linear(3);
//! assert!(!device.are_adjacent(0, 2));
//! assert_eq!(device.shortest_path(0, 2), vec![0, 1, 2]);
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod topology;
pub mod types;

pub use config::RoutingConfig;
pub use error::{MapError, Result};
pub use topology::{Layout, Topology};
pub use types::{Circuit, Gate};
