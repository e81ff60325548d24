//! Logical-to-physical placement and the strategies that compute it.

mod majority;
mod max_pairs;
mod random;

use crate::interactions::Interaction;
use qrmap_core::{MapError, Result, Topology};
use rand::rngs::StdRng;
use tracing::{debug, warn};

/// A bijection between logical qubits and physical nodes.
///
/// Holds the mutually inverse arrays `l2p` (qubit → node) and `p2l`
/// (node → qubit). Placements move by value: each router copies the one it
/// is given, so refinement can hold two independent placements without
/// aliasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    l2p: Vec<usize>,
    p2l: Vec<usize>,
}

impl Placement {
    /// Identity placement: qubit `q` sits on node `q`.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            l2p: (0..num_qubits).collect(),
            p2l: (0..num_qubits).collect(),
        }
    }

    /// Builds a placement from a logical-to-physical permutation, deriving
    /// the inverse array.
    pub fn from_l2p(l2p: Vec<usize>) -> Self {
        let mut p2l = vec![0; l2p.len()];
        for (q, &u) in l2p.iter().enumerate() {
            p2l[u] = q;
        }
        Self { l2p, p2l }
    }

    /// Number of qubit/node slots.
    pub fn len(&self) -> usize {
        self.l2p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l2p.is_empty()
    }

    /// Physical node hosting logical qubit `q`.
    pub fn node_of(&self, q: usize) -> usize {
        self.l2p[q]
    }

    /// Logical qubit hosted by physical node `u`.
    pub fn qubit_at(&self, u: usize) -> usize {
        self.p2l[u]
    }

    pub fn l2p(&self) -> &[usize] {
        self.l2p.as_slice()
    }

    pub fn p2l(&self) -> &[usize] {
        self.p2l.as_slice()
    }

    /// Checks the permutation invariant: `p2l ∘ l2p = id` and `l2p` covers
    /// `[0, len)`.
    pub fn is_consistent(&self) -> bool {
        self.l2p.len() == self.p2l.len()
            && self
                .l2p
                .iter()
                .enumerate()
                .all(|(q, &u)| u < self.p2l.len() && self.p2l[u] == q)
    }

    /// Moves `qubit` onto `node`, displacing whichever qubit currently sits
    /// there onto `qubit`'s old node. Returns the displaced qubit. This is
    /// the placement effect of one SWAP.
    pub(crate) fn swap_with_node(&mut self, qubit: usize, node: usize) -> usize {
        let from = self.l2p[qubit];
        let displaced = self.p2l[node];

        self.p2l[node] = qubit;
        self.p2l[from] = displaced;
        self.l2p[qubit] = node;
        self.l2p[displaced] = from;

        displaced
    }
}

/// Incremental placement under construction; every slot starts unassigned
/// and must be filled before `finish` succeeds.
#[derive(Debug)]
pub(crate) struct PlacementBuilder {
    l2p: Vec<Option<usize>>,
    p2l: Vec<Option<usize>>,
}

impl PlacementBuilder {
    pub(crate) fn new(num_qubits: usize) -> Self {
        Self {
            l2p: vec![None; num_qubits],
            p2l: vec![None; num_qubits],
        }
    }

    pub(crate) fn assign(&mut self, qubit: usize, node: usize) {
        self.l2p[qubit] = Some(node);
        self.p2l[node] = Some(qubit);
    }

    pub(crate) fn finish(self) -> Result<Placement> {
        let unplaced = self.l2p.iter().filter(|slot| slot.is_none()).count();
        let unfilled = self.p2l.iter().filter(|slot| slot.is_none()).count();
        if unplaced > 0 || unfilled > 0 {
            return Err(MapError::Unplaceable {
                unplaced: unplaced.max(unfilled),
            });
        }

        Ok(Placement {
            l2p: self.l2p.into_iter().flatten().collect(),
            p2l: self.p2l.into_iter().flatten().collect(),
        })
    }
}

/// Initial placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementStrategy {
    /// Identity placement (also the unknown-name fallback)
    Basic,
    /// Uniform random permutation
    Random,
    /// Busiest qubits onto highest-degree nodes, by paired max-heaps
    Majority,
    /// Max-interacting-pairs region growing
    #[default]
    MaxPairs,
}

impl PlacementStrategy {
    /// Parses a strategy name, case-insensitively. Unknown names downgrade
    /// to the identity placement with a log record.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "random" => Self::Random,
            "majority" => Self::Majority,
            "max_pairs" => Self::MaxPairs,
            "basic" => Self::Basic,
            other => {
                warn!("unknown placement strategy '{}', using identity placement", other);
                Self::Basic
            }
        }
    }

    /// Computes the initial placement for `num_qubits` padded qubits over
    /// the given topology and interaction list.
    pub fn compute(
        &self,
        topology: &Topology,
        interactions: &[Interaction],
        num_qubits: usize,
        rng: &mut StdRng,
    ) -> Result<Placement> {
        debug_assert_eq!(topology.num_nodes(), num_qubits);

        let placement = match self {
            Self::Basic => Placement::identity(num_qubits),
            Self::Random => random::compute(num_qubits, rng),
            Self::Majority => majority::compute(topology, interactions, num_qubits),
            Self::MaxPairs => max_pairs::compute(topology, interactions, num_qubits)?,
        };

        debug!(
            "initial {} placement, logical to physical: {:?}",
            self, placement.l2p()
        );
        Ok(placement)
    }
}

impl std::fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Basic => "basic",
            Self::Random => "random",
            Self::Majority => "majority",
            Self::MaxPairs => "max_pairs",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_identity() {
        let p = Placement::identity(4);
        assert!(p.is_consistent());
        assert_eq!(p.l2p(), &[0, 1, 2, 3]);
        assert_eq!(p.node_of(2), 2);
        assert_eq!(p.qubit_at(3), 3);
    }

    #[test]
    fn test_from_l2p_inverse() {
        let p = Placement::from_l2p(vec![2, 0, 3, 1]);
        assert!(p.is_consistent());
        assert_eq!(p.qubit_at(2), 0);
        assert_eq!(p.qubit_at(0), 1);
    }

    #[test]
    fn test_swap_with_node() {
        let mut p = Placement::identity(4);
        let displaced = p.swap_with_node(0, 1);
        assert_eq!(displaced, 1);
        assert_eq!(p.l2p(), &[1, 0, 2, 3]);
        assert!(p.is_consistent());

        // moving further displaces the next host
        let displaced = p.swap_with_node(0, 2);
        assert_eq!(displaced, 2);
        assert_eq!(p.l2p(), &[2, 0, 1, 3]);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_builder_unplaceable() {
        let mut builder = PlacementBuilder::new(3);
        builder.assign(0, 1);
        match builder.finish() {
            Err(MapError::Unplaceable { unplaced }) => assert_eq!(unplaced, 2),
            other => panic!("expected Unplaceable, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_complete() {
        let mut builder = PlacementBuilder::new(3);
        builder.assign(0, 2);
        builder.assign(1, 0);
        builder.assign(2, 1);
        let p = builder.finish().unwrap();
        assert!(p.is_consistent());
        assert_eq!(p.l2p(), &[2, 0, 1]);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(PlacementStrategy::from_name("RANDOM"), PlacementStrategy::Random);
        assert_eq!(PlacementStrategy::from_name("Majority"), PlacementStrategy::Majority);
        assert_eq!(PlacementStrategy::from_name("max_pairs"), PlacementStrategy::MaxPairs);
        assert_eq!(PlacementStrategy::from_name("basic"), PlacementStrategy::Basic);
        // unknown names downgrade to identity
        assert_eq!(PlacementStrategy::from_name("sabre"), PlacementStrategy::Basic);
    }

    #[test]
    fn test_all_strategies_produce_permutations() {
        let topo = Topology::grid(2, 3);
        let interactions = vec![
            Interaction::new(0, 1, 0),
            Interaction::new(1, 2, 1),
            Interaction::new(0, 2, 2),
            Interaction::new(3, 4, 3),
        ];
        for strategy in [
            PlacementStrategy::Basic,
            PlacementStrategy::Random,
            PlacementStrategy::Majority,
            PlacementStrategy::MaxPairs,
        ] {
            let mut rng = StdRng::seed_from_u64(11);
            let p = strategy
                .compute(&topo, &interactions, 6, &mut rng)
                .unwrap();
            assert!(p.is_consistent(), "{} placement not a permutation", strategy);
        }
    }

    #[test]
    fn test_strategies_idempotent_under_seed() {
        let topo = Topology::grid(2, 3);
        let interactions = vec![Interaction::new(0, 4, 0), Interaction::new(2, 5, 1)];
        for strategy in [PlacementStrategy::Random, PlacementStrategy::MaxPairs] {
            let mut rng_a = StdRng::seed_from_u64(99);
            let mut rng_b = StdRng::seed_from_u64(99);
            let a = strategy.compute(&topo, &interactions, 6, &mut rng_a).unwrap();
            let b = strategy.compute(&topo, &interactions, 6, &mut rng_b).unwrap();
            assert_eq!(a, b);
        }
    }
}
