//! Front-end driver: interaction extraction, padding, routing and gate
//! stream rewriting.

use crate::interactions::Interaction;
use crate::placement::{Placement, PlacementStrategy};
use crate::refine::refine_placement;
use crate::router::{GateSwaps, Router};
use qrmap_core::{Circuit, Gate, MapError, Result, RoutingConfig, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// A circuit compiled onto a device topology.
#[derive(Debug, Clone)]
pub struct RoutedCircuit {
    /// The rewritten gate stream over physical node indices
    pub circuit: Circuit,
    /// Padded qubit count (the device size); the back-end allocates this many
    pub num_qubits: usize,
    /// Total number of SWAP gates inserted
    pub swap_count: usize,
    /// Placement the routing started from
    pub initial_placement: Placement,
    /// Placement after all SWAPs; undoing this permutation relates device
    /// wires back to logical qubits
    pub final_placement: Placement,
}

/// Extracts the ordered interaction list from the gate stream: one triple
/// per unordered wire pair of every gate with at least two wires. All pairs
/// of one gate share its position as `gate_index`.
pub fn interaction_list(circuit: &Circuit) -> Vec<Interaction> {
    let mut list = Vec::new();
    for (gate_index, gate) in circuit.gates.iter().enumerate() {
        let wires = gate.qubits();
        if wires.len() < 2 {
            continue;
        }
        for a in 0..wires.len() {
            for b in (a + 1)..wires.len() {
                list.push(Interaction::new(wires[a], wires[b], gate_index));
            }
        }
    }
    list
}

/// Prefix length used for placement refinement: `floor(log2(len))`, at
/// least one interaction, never past the end of the list.
fn refinement_prefix(len: usize) -> usize {
    (len.ilog2() as usize).max(1).min(len)
}

/// Compiles `circuit` onto `topology`: chooses an initial placement with the
/// configured strategy, refines it over a short prefix, routes every
/// interaction, and rewrites the gate stream with the recorded SWAPs.
pub fn apply_routing(
    circuit: &Circuit,
    topology: &Topology,
    config: &RoutingConfig,
) -> Result<RoutedCircuit> {
    let logical = circuit.num_qubits;
    let physical = topology.num_nodes();
    if logical > physical {
        return Err(MapError::TopologyTooSmall { logical, physical });
    }
    // ancilla padding: logical qubits beyond the circuit's own appear in no
    // gate and exist only to make the placement a bijection
    let num_qubits = physical;

    let interactions = interaction_list(circuit);
    info!(
        "routing {} gates ({} interactions) onto {} nodes",
        circuit.gate_count(),
        interactions.len(),
        physical
    );

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let strategy = PlacementStrategy::from_name(&config.strategy);
    let mut placement = strategy.compute(topology, &interactions, num_qubits, &mut rng)?;

    if !interactions.is_empty() {
        let prefix = refinement_prefix(interactions.len());
        info!("refining initial placement over {} interaction(s)", prefix);
        placement = refine_placement(
            topology,
            placement,
            &interactions[..prefix],
            config.lookahead,
            &mut rng,
        )?;
    }

    let initial_placement = placement.clone();
    let mut router = Router::new(
        topology,
        &interactions,
        &initial_placement,
        config.lookahead,
        StdRng::seed_from_u64(rng.gen()),
    );
    let outcome = router.route_all()?;
    let final_placement = router.placement().clone();
    info!("routing complete, {} swaps required", outcome.swap_count);

    let circuit = rewrite_stream(
        circuit,
        &initial_placement,
        &outcome.gate_swaps,
        num_qubits,
        outcome.swap_count,
    )?;

    Ok(RoutedCircuit {
        circuit,
        num_qubits,
        swap_count: outcome.swap_count,
        initial_placement,
        final_placement,
    })
}

/// Rewrites the gate stream over physical wires. A live qubit→node map
/// starts at the initial placement and tracks every emitted SWAP, so each
/// gate lands on the nodes its logical wires occupy at that moment.
fn rewrite_stream(
    circuit: &Circuit,
    initial: &Placement,
    gate_swaps: &[GateSwaps],
    num_qubits: usize,
    swap_count: usize,
) -> Result<Circuit> {
    let mut live: Vec<usize> = initial.l2p().to_vec();
    let mut rewritten = Circuit::with_capacity(num_qubits, circuit.gate_count() + swap_count);
    let mut swaps_iter = gate_swaps.iter();

    for gate in &circuit.gates {
        if gate.qubits().len() == 2 {
            if let Some(swaps) = swaps_iter.next() {
                for &(a, b) in swaps.control.iter().chain(swaps.target.iter()) {
                    rewritten.add_gate(Gate::SWAP(live[a], live[b]))?;
                    live.swap(a, b);
                }
            }
        }
        rewritten.add_gate(gate.map_qubits(&live))?;
    }

    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: &str) -> RoutingConfig {
        RoutingConfig {
            strategy: strategy.to_string(),
            lookahead: 10,
            rng_seed: Some(1),
        }
    }

    #[test]
    fn test_interaction_list_order_and_index() {
        let mut circuit = Circuit::new(3);
        circuit.add_gate(Gate::H(0)).unwrap();
        circuit.add_gate(Gate::CNOT(0, 1)).unwrap();
        circuit.add_gate(Gate::X(2)).unwrap();
        circuit.add_gate(Gate::CZ(1, 2)).unwrap();

        let list = interaction_list(&circuit);
        assert_eq!(
            list,
            vec![Interaction::new(0, 1, 1), Interaction::new(1, 2, 3)]
        );
    }

    #[test]
    fn test_refinement_prefix() {
        assert_eq!(refinement_prefix(1), 1);
        assert_eq!(refinement_prefix(2), 1);
        assert_eq!(refinement_prefix(8), 3);
        assert_eq!(refinement_prefix(9), 3);
        assert_eq!(refinement_prefix(1024), 10);
    }

    #[test]
    fn test_topology_too_small() {
        let circuit = Circuit::new(5);
        let topo = Topology::linear(3);
        match apply_routing(&circuit, &topo, &config("basic")) {
            Err(MapError::TopologyTooSmall { logical, physical }) => {
                assert_eq!(logical, 5);
                assert_eq!(physical, 3);
            }
            other => panic!("expected TopologyTooSmall, got {:?}", other),
        }
    }

    #[test]
    fn test_adjacent_gate_passes_through() {
        // identity placement, adjacent wires: the rewritten stream equals
        // the input
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Gate::H(0)).unwrap();
        circuit.add_gate(Gate::CNOT(0, 1)).unwrap();

        let topo = Topology::from_edges(2, &[(0, 1)]);
        let routed = apply_routing(&circuit, &topo, &config("basic")).unwrap();

        assert_eq!(routed.swap_count, 0);
        assert_eq!(routed.circuit.gates, circuit.gates);
        assert_eq!(routed.num_qubits, 2);
    }

    #[test]
    fn test_single_qubit_only_circuit() {
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Gate::H(0)).unwrap();
        circuit.add_gate(Gate::Measure(1)).unwrap();

        let topo = Topology::linear(3);
        let routed = apply_routing(&circuit, &topo, &config("basic")).unwrap();

        assert_eq!(routed.swap_count, 0);
        // identity placement: wires unchanged, padded to the device size
        assert_eq!(routed.circuit.gates, circuit.gates);
        assert_eq!(routed.num_qubits, 3);
    }

    #[test]
    fn test_distant_gate_is_routed_onto_edge() {
        let mut circuit = Circuit::new(4);
        circuit.add_gate(Gate::CNOT(0, 3)).unwrap();

        let topo = Topology::linear(4);
        let routed = apply_routing(&circuit, &topo, &config("basic")).unwrap();

        // refinement already parks the endpoints next to each other, so the
        // full pass needs no swaps and the gate lands on the middle edge
        assert_eq!(routed.swap_count, 0);
        assert_eq!(routed.circuit.gates, vec![Gate::CNOT(1, 2)]);
        assert_eq!(routed.initial_placement.l2p(), &[1, 0, 3, 2]);
        assert_eq!(routed.final_placement, routed.initial_placement);
    }

    #[test]
    fn test_every_two_qubit_gate_on_an_edge() {
        let mut circuit = Circuit::new(6);
        circuit.add_gate(Gate::H(0)).unwrap();
        circuit.add_gate(Gate::CNOT(0, 5)).unwrap();
        circuit.add_gate(Gate::CZ(1, 4)).unwrap();
        circuit.add_gate(Gate::CNOT(2, 3)).unwrap();
        circuit.add_gate(Gate::CNOT(0, 3)).unwrap();

        let topo = Topology::grid(2, 3);
        for strategy in ["basic", "random", "majority", "max_pairs"] {
            let routed = apply_routing(&circuit, &topo, &config(strategy)).unwrap();
            for gate in &routed.circuit.gates {
                let wires = gate.qubits();
                if wires.len() == 2 {
                    assert!(
                        topo.are_adjacent(wires[0], wires[1]),
                        "{} gate {} on non-adjacent nodes",
                        strategy,
                        gate
                    );
                }
            }
        }
    }

    #[test]
    fn test_round_trip_wire_tracking() {
        // Undo the SWAP bookkeeping while scanning the rewritten stream:
        // every non-SWAP gate must recover the original logical wires.
        let mut circuit = Circuit::new(5);
        circuit.add_gate(Gate::H(2)).unwrap();
        circuit.add_gate(Gate::CNOT(0, 4)).unwrap();
        circuit.add_gate(Gate::Rz(4, 0.5)).unwrap();
        circuit.add_gate(Gate::CZ(1, 3)).unwrap();
        circuit.add_gate(Gate::CNOT(2, 4)).unwrap();
        circuit.add_gate(Gate::Measure(0)).unwrap();

        let topo = Topology::linear(5);
        let routed = apply_routing(&circuit, &topo, &config("max_pairs")).unwrap();

        // node → logical qubit, evolving with every SWAP in the stream
        let mut p2l = routed.initial_placement.p2l().to_vec();
        let mut originals = circuit.gates.iter();
        let mut swaps_seen = 0;

        for gate in &routed.circuit.gates {
            if let Gate::SWAP(u, v) = gate {
                p2l.swap(*u, *v);
                swaps_seen += 1;
                continue;
            }
            let original = originals.next().expect("more gates than the input had");
            let recovered: Vec<usize> =
                gate.qubits().iter().map(|&wire| p2l[wire]).collect();
            assert_eq!(recovered, original.qubits());
        }
        assert!(originals.next().is_none());
        assert_eq!(swaps_seen, routed.swap_count);
    }

    #[test]
    fn test_unknown_strategy_falls_back_to_identity() {
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Gate::CNOT(0, 1)).unwrap();

        let topo = Topology::linear(2);
        let routed = apply_routing(&circuit, &topo, &config("annealing")).unwrap();
        assert_eq!(routed.swap_count, 0);
        assert_eq!(routed.circuit.gates, circuit.gates);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let mut circuit = Circuit::new(6);
        for i in 0..5 {
            circuit.add_gate(Gate::CNOT(i, (i + 3) % 6)).unwrap();
        }
        let topo = Topology::grid(2, 3);

        let mut cfg = config("random");
        cfg.rng_seed = Some(23);
        let a = apply_routing(&circuit, &topo, &cfg).unwrap();
        let b = apply_routing(&circuit, &topo, &cfg).unwrap();

        assert_eq!(a.circuit, b.circuit);
        assert_eq!(a.swap_count, b.swap_count);
        assert_eq!(a.initial_placement, b.initial_placement);
        assert_eq!(a.final_placement, b.final_placement);
    }
}
