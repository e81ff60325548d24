//! Max-interacting-pairs placement.
//!
//! Grows mapped regions outward: seed the best-connected free node with the
//! qubit whose near-term interaction mass is largest, then repeatedly hand
//! the seed's neighborhood to the qubits that interact most with the seed,
//! queueing each placed pair for its own expansion.

use super::{Placement, PlacementBuilder};
use crate::free_nodes::FreeNodeIndex;
use crate::interactions::{Interaction, InteractionIndex};
use qrmap_core::{Result, Topology};
use std::collections::VecDeque;
use tracing::debug;

pub(super) fn compute(
    topology: &Topology,
    interactions: &[Interaction],
    num_qubits: usize,
) -> Result<Placement> {
    let mut qubits = InteractionIndex::new(interactions, num_qubits);
    let mut nodes = FreeNodeIndex::new(topology);
    let mut builder = PlacementBuilder::new(num_qubits);

    // pairs whose neighborhoods still need to be expanded
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    let mut remaining = num_qubits;

    while remaining > 0 {
        let (node, qubit, mut node_nbrs, mut qubit_nbrs) =
            if let Some((queued_node, queued_qubit)) = queue.pop_front() {
                debug!(
                    "max_pairs: expanding queued pair qubit {} / node {}",
                    queued_qubit, queued_node
                );
                let node_nbrs = nodes.free_neighbors(queued_node).clone();
                let qubit_nbrs = qubits.d_interactions(queued_qubit, node_nbrs.len());
                (queued_node, queued_qubit, node_nbrs, qubit_nbrs)
            } else {
                // fresh seed; on disconnected devices the queue drains with
                // work left and a new component is seeded here
                let Some((seed_node, seed_nbrs)) = nodes.free_node_with_most_free_neighbors()
                else {
                    break;
                };
                let Some((seed_qubit, seed_qubit_nbrs)) =
                    qubits.qubit_with_most_d_interactions(seed_nbrs.len())
                else {
                    break;
                };

                debug!(
                    "max_pairs: seeding qubit {} onto node {} ({} free neighbors)",
                    seed_qubit,
                    seed_node,
                    seed_nbrs.len()
                );
                builder.assign(seed_qubit, seed_node);
                remaining -= 1;
                // occupying the seed only strips it from neighbor sets, so
                // the snapshot taken above stays accurate
                nodes.occupy(seed_node);
                qubits.mark_placed(seed_qubit);

                (seed_node, seed_qubit, seed_nbrs, seed_qubit_nbrs)
            };

        // one placement per round; both working sets shrink by exactly one,
        // so every pick below finds a candidate
        let rounds = qubit_nbrs.len().min(node_nbrs.len());
        for _ in 0..rounds {
            let Some((nbr, nbr_free)) = nodes.node_with_most_free_neighbors(&node_nbrs) else {
                break;
            };
            let Some((nbr_qubit, _)) =
                qubits.qubit_with_most_d_interactions_from_set(nbr_free.len(), &qubit_nbrs)
            else {
                break;
            };

            debug!(
                "max_pairs: qubit {} (partner of {}) onto node {} (neighbor of {})",
                nbr_qubit, qubit, nbr, node
            );
            builder.assign(nbr_qubit, nbr);
            nodes.occupy(nbr);
            qubits.mark_placed(nbr_qubit);
            remaining -= 1;

            node_nbrs.remove(&nbr);
            qubit_nbrs.remove(&nbr_qubit);
            queue.push_back((nbr, nbr_qubit));
        }
    }

    builder.finish()
}
