//! Qubit interaction statistics extracted from the gate stream.

use std::collections::BTreeSet;

/// One two-qubit interaction from the gate stream.
///
/// `gate_index` identifies the originating gate position in program order;
/// every pair extracted from the same gate shares it, so lookahead counting
/// sees genuine gate occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub control: usize,
    pub target: usize,
    pub gate_index: usize,
}

impl Interaction {
    pub fn new(control: usize, target: usize, gate_index: usize) -> Self {
        Self {
            control,
            target,
            gate_index,
        }
    }

    /// True when either endpoint is `qubit`.
    pub fn touches(&self, qubit: usize) -> bool {
        self.control == qubit || self.target == qubit
    }
}

/// Pairwise interaction counts plus the set of still-unplaced qubits.
///
/// The count matrix is symmetric with a zero diagonal and never changes
/// after construction; only the free set shrinks as qubits are placed.
#[derive(Debug, Clone)]
pub struct InteractionIndex {
    num_qubits: usize,
    counts: Vec<Vec<u32>>,
    free: BTreeSet<usize>,
}

impl InteractionIndex {
    pub fn new(interactions: &[Interaction], num_qubits: usize) -> Self {
        let mut counts = vec![vec![0u32; num_qubits]; num_qubits];
        for it in interactions {
            counts[it.control][it.target] += 1;
            counts[it.target][it.control] += 1;
        }

        Self {
            num_qubits,
            counts,
            free: (0..num_qubits).collect(),
        }
    }

    /// Number of gates touching both `i` and `j`.
    pub fn interaction_count(&self, i: usize, j: usize) -> u32 {
        self.counts[i][j]
    }

    /// True while `q` has not been placed.
    pub fn is_free(&self, q: usize) -> bool {
        self.free.contains(&q)
    }

    /// The qubit's interaction row sorted by count descending; the sort is
    /// stable so equal counts stay in ascending qubit order.
    fn sorted_row(&self, qubit: usize) -> Vec<(usize, u32)> {
        let mut row: Vec<(usize, u32)> = self.counts[qubit]
            .iter()
            .copied()
            .enumerate()
            .collect();
        row.sort_by(|a, b| b.1.cmp(&a.1));
        row
    }

    /// Up to `d` still-free qubits interacting with `qubit`, picked in
    /// decreasing order of interaction count, skipping zero-count partners.
    pub fn d_interactions(&self, qubit: usize, d: usize) -> BTreeSet<usize> {
        let mut result = BTreeSet::new();
        for (partner, count) in self.sorted_row(qubit) {
            if count == 0 || result.len() == d {
                break;
            }
            if self.free.contains(&partner) {
                result.insert(partner);
            }
        }
        result
    }

    /// Sum of interaction counts over the qubit's top-`d` still-free partners.
    fn d_score(&self, qubit: usize, d: usize) -> u32 {
        self.sorted_row(qubit)
            .into_iter()
            .filter(|(partner, _)| self.free.contains(partner))
            .take(d)
            .map(|(_, count)| count)
            .sum()
    }

    /// Over `candidates ∩ free`, returns the qubit maximising its d-score
    /// together with its top-`d` free partners. Ties fall to the lowest
    /// index; `None` when no candidate is free.
    pub fn qubit_with_most_d_interactions_from_set(
        &self,
        d: usize,
        candidates: &BTreeSet<usize>,
    ) -> Option<(usize, BTreeSet<usize>)> {
        let mut best: Option<(usize, u32)> = None;
        for &q in candidates {
            if !self.free.contains(&q) {
                continue;
            }
            let score = self.d_score(q, d);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((q, score));
            }
        }

        best.map(|(q, _)| (q, self.d_interactions(q, d)))
    }

    /// As [`Self::qubit_with_most_d_interactions_from_set`] with every free
    /// qubit as candidate.
    pub fn qubit_with_most_d_interactions(&self, d: usize) -> Option<(usize, BTreeSet<usize>)> {
        self.qubit_with_most_d_interactions_from_set(d, &self.free)
    }

    /// Removes `q` from the free set. Idempotent, tolerates out-of-range
    /// input, never alters the count matrix.
    pub fn mark_placed(&mut self, q: usize) {
        if q >= self.num_qubits {
            return;
        }
        self.free.remove(&q);
    }
}
