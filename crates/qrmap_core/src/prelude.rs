//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use qrmap_core::prelude::*;
//! ```

pub use crate::config::RoutingConfig;
pub use crate::error::{MapError, Result};
pub use crate::topology::{Layout, Topology};
pub use crate::types::{Circuit, Gate};
