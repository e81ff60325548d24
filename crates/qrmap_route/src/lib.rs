//! Routing engine for qrmap.
//!
//! Compiles a circuit against a device topology in two phases: an initial
//! logical-to-physical placement (random / majority / max-interacting-pairs)
//! and lookahead SWAP insertion along all-pairs shortest paths. A refinement
//! wrapper re-seeds the router with its own post-routing placement and keeps
//! whichever start yields the shorter route.

pub mod free_nodes;
pub mod interactions;
pub mod placement;
pub mod refine;
pub mod router;
pub mod transform;

pub use free_nodes::FreeNodeIndex;
pub use interactions::{Interaction, InteractionIndex};
pub use placement::{Placement, PlacementStrategy};
pub use refine::refine_placement;
pub use router::{GateSwaps, Router, RoutingOutcome};
pub use transform::{apply_routing, interaction_list, RoutedCircuit};
