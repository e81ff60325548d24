//! Lookahead swap-insertion routing.
//!
//! The router walks the interaction list in program order. A gate whose
//! endpoints already sit on adjacent nodes costs nothing; otherwise the
//! endpoints travel along a shortest path, and a window over the upcoming
//! interactions decides which endpoint moves how far.

use crate::interactions::Interaction;
use crate::placement::Placement;
use qrmap_core::{MapError, Result, Topology};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// SWAPs recorded for one routed gate, split by which endpoint moved.
/// Each entry is a logical qubit pair, in the order the SWAPs must apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateSwaps {
    pub control: Vec<(usize, usize)>,
    pub target: Vec<(usize, usize)>,
}

impl GateSwaps {
    pub fn len(&self) -> usize {
        self.control.len() + self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control.is_empty() && self.target.is_empty()
    }
}

/// Result of a routing pass.
#[derive(Debug, Clone)]
pub struct RoutingOutcome {
    /// Total number of SWAPs emitted
    pub swap_count: usize,
    /// Per-gate SWAP record, one entry per routed interaction
    pub gate_swaps: Vec<GateSwaps>,
}

/// Which endpoint covers the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveChoice {
    /// Control walks the whole interior
    Control,
    /// Target walks the whole interior
    Target,
    /// Both endpoints meet in the middle
    Split,
}

/// Swap-insertion engine. Owns a copy of the placement for the duration of
/// routing; the caller's placement is never mutated.
pub struct Router<'a> {
    topology: &'a Topology,
    interactions: &'a [Interaction],
    lookahead: usize,
    placement: Placement,
    rng: StdRng,
}

impl<'a> Router<'a> {
    pub fn new(
        topology: &'a Topology,
        interactions: &'a [Interaction],
        initial: &Placement,
        lookahead: usize,
        rng: StdRng,
    ) -> Self {
        debug!(
            "creating router over {} interactions, lookahead {}, logical to physical: {:?}",
            interactions.len(),
            lookahead,
            initial.l2p()
        );
        Self {
            topology,
            interactions,
            lookahead,
            placement: initial.clone(),
            rng,
        }
    }

    /// The placement in its current (post-routing) state.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Routes the entire interaction list.
    pub fn route_all(&mut self) -> Result<RoutingOutcome> {
        self.route_prefix(self.interactions.len())
    }

    /// Routes the first `m` interactions, clamped to the list length. The
    /// lookahead window still reads past `m` into the full list.
    pub fn route_prefix(&mut self, m: usize) -> Result<RoutingOutcome> {
        let m = m.min(self.interactions.len());
        let mut gate_swaps = Vec::with_capacity(m);
        let mut swap_count = 0;

        for i in 0..m {
            let swaps = self.route_gate(i)?;
            swap_count += swaps.len();
            gate_swaps.push(swaps);
        }

        debug!("routed {} interactions with {} swaps", m, swap_count);
        Ok(RoutingOutcome {
            swap_count,
            gate_swaps,
        })
    }

    fn route_gate(&mut self, i: usize) -> Result<GateSwaps> {
        let Interaction {
            control, target, ..
        } = self.interactions[i];

        let control_node = self.placement.node_of(control);
        let target_node = self.placement.node_of(target);

        if self.topology.are_adjacent(control_node, target_node) {
            debug!(
                "qubits {} and {} already adjacent on nodes {} and {}",
                control, target, control_node, target_node
            );
            return Ok(GateSwaps::default());
        }

        let path = self.topology.shortest_path(control_node, target_node);
        if path.is_empty() {
            return Err(MapError::NoPath(control_node, target_node));
        }
        if path.len() < 2 {
            // degenerate gate with both wires on one node; nothing to move
            return Ok(GateSwaps::default());
        }

        let interior = &path[1..path.len() - 1];
        let (control_path, target_path): (Vec<usize>, Vec<usize>) =
            match self.choice_by_lookahead(i, control, target) {
                MoveChoice::Control => (interior.to_vec(), Vec::new()),
                MoveChoice::Target => (Vec::new(), interior.iter().rev().copied().collect()),
                MoveChoice::Split => {
                    // the control covers the first half of the node list
                    // (rounded up when odd); each endpoint walks its share of
                    // the interior from its own side and both stay in place
                    // at the ends
                    let head = path.len().div_ceil(2);
                    (
                        path[1..head].to_vec(),
                        path[head..path.len() - 1].iter().rev().copied().collect(),
                    )
                }
            };

        debug!("control qubit {} walks nodes {:?}", control, control_path);
        debug!("target qubit {} walks nodes {:?}", target, target_path);

        let swaps = GateSwaps {
            control: self.move_through_path(control, &control_path),
            target: self.move_through_path(target, &target_path),
        };
        Ok(swaps)
    }

    /// Counts how often each endpoint shows up in the next `lookahead`
    /// interactions and decides who moves. An endpoint that is busy soon
    /// stays put; with no information the choice is uniformly random.
    fn choice_by_lookahead(&mut self, begin: usize, control: usize, target: usize) -> MoveChoice {
        let end = (begin + self.lookahead).min(self.interactions.len());
        let window = &self.interactions[begin..end];

        let control_count = window.iter().filter(|it| it.touches(control)).count();
        let target_count = window.iter().filter(|it| it.touches(target)).count();
        debug!(
            "lookahead over {} interactions: control touched {}, target touched {}",
            window.len(),
            control_count,
            target_count
        );

        if control_count == 0 && target_count == 0 {
            match self.rng.gen_range(0..3) {
                0 => MoveChoice::Control,
                1 => MoveChoice::Target,
                _ => MoveChoice::Split,
            }
        } else if control_count == 0 || control_count >= 2 * target_count {
            MoveChoice::Target
        } else if target_count == 0 || target_count >= 2 * control_count {
            MoveChoice::Control
        } else {
            MoveChoice::Split
        }
    }

    /// Walks `qubit` along `path`, swapping it with the occupant of each
    /// successive node. Records one logical pair per SWAP.
    fn move_through_path(&mut self, qubit: usize, path: &[usize]) -> Vec<(usize, usize)> {
        let mut swaps = Vec::with_capacity(path.len());
        for &node in path {
            let displaced = self.placement.swap_with_node(qubit, node);
            swaps.push((qubit, displaced));
        }
        swaps
    }
}
