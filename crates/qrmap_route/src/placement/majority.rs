//! Majority placement: busiest qubits onto best-connected nodes.

use super::Placement;
use crate::interactions::Interaction;
use qrmap_core::Topology;
use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};
use tracing::debug;

/// Max-heap key ordered by score, then by lowest index on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Keyed {
    score: usize,
    index: usize,
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(other.index.cmp(&self.index))
    }
}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pairs the logical qubit with the most distinct interaction partners with
/// the physical node of highest degree, repeatedly. Never looks past raw
/// degree into the connectivity structure; `O(Q log Q)`.
pub(super) fn compute(
    topology: &Topology,
    interactions: &[Interaction],
    num_qubits: usize,
) -> Placement {
    let mut partners: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); num_qubits];
    for it in interactions {
        partners[it.control].insert(it.target);
        partners[it.target].insert(it.control);
    }

    let mut qubit_heap: BinaryHeap<Keyed> = (0..num_qubits)
        .map(|q| Keyed {
            score: partners[q].len(),
            index: q,
        })
        .collect();
    let mut node_heap: BinaryHeap<Keyed> = (0..topology.num_nodes())
        .map(|u| Keyed {
            score: topology.degree(u),
            index: u,
        })
        .collect();

    let mut l2p: Vec<usize> = (0..num_qubits).collect();
    while let (Some(qubit), Some(node)) = (qubit_heap.pop(), node_heap.pop()) {
        debug!(
            "majority: qubit {} ({} partners) onto node {} (degree {})",
            qubit.index, qubit.score, node.index, node.score
        );
        l2p[qubit.index] = node.index;
    }

    Placement::from_l2p(l2p)
}
