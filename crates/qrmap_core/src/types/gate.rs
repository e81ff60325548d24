//! Quantum gate definitions.
//!
//! The routing compiler never simulates gates; it only needs to know which
//! wires a gate touches and how to relabel them. Matrix semantics live in
//! whatever backend consumes the rewritten stream.

use serde::{Deserialize, Serialize};

/// Quantum gate enumeration.
///
/// Supports the usual NISQ set:
/// - Single-qubit: H, X, Y, Z, S, T, Rx, Ry, Rz
/// - Two-qubit: CNOT, CZ, SWAP
/// - Measurement: Measure
///
/// # Example
///
/// ```
/// use qrmap_core::prelude::*;
///
/// let cnot = Gate::CNOT(0, 1);
/// assert_eq!(cnot.qubits(), vec![0, 1]);
/// assert!(cnot.is_two_qubit());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate
    H(usize),
    /// Pauli-X (NOT) gate
    X(usize),
    /// Pauli-Y gate
    Y(usize),
    /// Pauli-Z gate
    Z(usize),
    /// S gate (√Z, phase gate)
    S(usize),
    /// T gate (π/8 gate)
    T(usize),

    /// Rotation around X-axis by angle θ
    Rx(usize, f64),
    /// Rotation around Y-axis by angle θ
    Ry(usize, f64),
    /// Rotation around Z-axis by angle θ
    Rz(usize, f64),

    /// Controlled-NOT gate (control, target)
    CNOT(usize, usize),
    /// Controlled-Z gate
    CZ(usize, usize),
    /// SWAP gate
    SWAP(usize, usize),

    /// Measurement in computational basis
    Measure(usize),
}

impl Gate {
    /// Returns the wire indices this gate operates on.
    ///
    /// For single-qubit gates, returns a single-element vector.
    /// For two-qubit gates, returns [control, target] or [qubit1, qubit2].
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::S(q)
            | Gate::T(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _)
            | Gate::Measure(q) => vec![*q],
            Gate::CNOT(c, t) | Gate::CZ(c, t) | Gate::SWAP(c, t) => vec![*c, *t],
        }
    }

    /// Returns true if this is a single-qubit unitary gate.
    pub fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            Gate::H(_)
                | Gate::X(_)
                | Gate::Y(_)
                | Gate::Z(_)
                | Gate::S(_)
                | Gate::T(_)
                | Gate::Rx(_, _)
                | Gate::Ry(_, _)
                | Gate::Rz(_, _)
        )
    }

    /// Returns true if this is a two-qubit gate.
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::CNOT(_, _) | Gate::CZ(_, _) | Gate::SWAP(_, _))
    }

    /// Returns true if this is a measurement operation.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_))
    }

    /// Remaps the qubits of the gate using the provided mapping.
    /// mapping[old_qubit_index] = new_qubit_index
    pub fn map_qubits(&self, mapping: &[usize]) -> Gate {
        match self {
            Gate::H(q) => Gate::H(mapping[*q]),
            Gate::X(q) => Gate::X(mapping[*q]),
            Gate::Y(q) => Gate::Y(mapping[*q]),
            Gate::Z(q) => Gate::Z(mapping[*q]),
            Gate::S(q) => Gate::S(mapping[*q]),
            Gate::T(q) => Gate::T(mapping[*q]),
            Gate::Rx(q, theta) => Gate::Rx(mapping[*q], *theta),
            Gate::Ry(q, theta) => Gate::Ry(mapping[*q], *theta),
            Gate::Rz(q, theta) => Gate::Rz(mapping[*q], *theta),
            Gate::CNOT(c, t) => Gate::CNOT(mapping[*c], mapping[*t]),
            Gate::CZ(c, t) => Gate::CZ(mapping[*c], mapping[*t]),
            Gate::SWAP(a, b) => Gate::SWAP(mapping[*a], mapping[*b]),
            Gate::Measure(q) => Gate::Measure(mapping[*q]),
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::H(q) => write!(f, "H({})", q),
            Gate::X(q) => write!(f, "X({})", q),
            Gate::Y(q) => write!(f, "Y({})", q),
            Gate::Z(q) => write!(f, "Z({})", q),
            Gate::S(q) => write!(f, "S({})", q),
            Gate::T(q) => write!(f, "T({})", q),
            Gate::Rx(q, theta) => write!(f, "Rx({}, {:.4})", q, theta),
            Gate::Ry(q, theta) => write!(f, "Ry({}, {:.4})", q, theta),
            Gate::Rz(q, theta) => write!(f, "Rz({}, {:.4})", q, theta),
            Gate::CNOT(c, t) => write!(f, "CNOT({}, {})", c, t),
            Gate::CZ(c, t) => write!(f, "CZ({}, {})", c, t),
            Gate::SWAP(a, b) => write!(f, "SWAP({}, {})", a, b),
            Gate::Measure(q) => write!(f, "Measure({})", q),
        }
    }
}
