//! Uniform random placement.

use super::Placement;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Draws a uniform random permutation of `[0, num_qubits)` as the
/// logical-to-physical map. The rng comes in from the caller so seeded runs
/// reproduce exactly.
pub(super) fn compute(num_qubits: usize, rng: &mut StdRng) -> Placement {
    let mut l2p: Vec<usize> = (0..num_qubits).collect();
    l2p.shuffle(rng);
    Placement::from_l2p(l2p)
}
