//! Free-node bookkeeping over the device topology.

use qrmap_core::Topology;
use std::collections::BTreeSet;

/// Tracks which physical nodes are still unoccupied and, for each node, its
/// set of still-free neighbors.
///
/// Invariant: `v ∈ free_neighbors[u]` iff `u`-`v` is a topology edge and `v`
/// is still free.
#[derive(Debug, Clone)]
pub struct FreeNodeIndex {
    free: BTreeSet<usize>,
    free_neighbors: Vec<BTreeSet<usize>>,
}

impl FreeNodeIndex {
    pub fn new(topology: &Topology) -> Self {
        let n = topology.num_nodes();
        let free_neighbors = (0..n)
            .map(|u| topology.neighbors(u).into_iter().collect())
            .collect();

        Self {
            free: (0..n).collect(),
            free_neighbors,
        }
    }

    /// True while `u` is unoccupied.
    pub fn is_free(&self, u: usize) -> bool {
        self.free.contains(&u)
    }

    /// Number of still-free nodes.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// The still-free neighbors of `u`.
    pub fn free_neighbors(&self, u: usize) -> &BTreeSet<usize> {
        &self.free_neighbors[u]
    }

    /// Over the given candidates, returns the node with the most free
    /// neighbors and a snapshot of that neighbor set. Candidates are
    /// scanned in ascending order with a strict comparison, so ties fall to
    /// the lowest index. `None` on an empty candidate set.
    pub fn node_with_most_free_neighbors(
        &self,
        candidates: &BTreeSet<usize>,
    ) -> Option<(usize, BTreeSet<usize>)> {
        let mut best: Option<(usize, usize)> = None;
        for &u in candidates {
            let count = self.free_neighbors[u].len();
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((u, count));
            }
        }

        best.map(|(u, _)| (u, self.free_neighbors[u].clone()))
    }

    /// As [`Self::node_with_most_free_neighbors`] over every free node.
    pub fn free_node_with_most_free_neighbors(&self) -> Option<(usize, BTreeSet<usize>)> {
        self.node_with_most_free_neighbors(&self.free)
    }

    /// Marks `u` occupied: removes it from the free set and from every
    /// node's free-neighbor set.
    pub fn occupy(&mut self, u: usize) {
        self.free.remove(&u);
        for neighbors in &mut self.free_neighbors {
            neighbors.remove(&u);
        }
    }
}
