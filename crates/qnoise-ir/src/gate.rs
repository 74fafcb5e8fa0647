//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Gate names follow the OpenQASM 3 naming convention (lowercase). Rotation
/// angles are concrete `f64` radians — this IR carries no symbolic
/// parameters. [`StandardGate::Mcz`] is the variable-arity phase flip used
/// by the Grover diffusion operator; with zero controls it is plain `Z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate.
    CP(f64),
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,

    // Variable-arity gates
    /// Multi-controlled Z: flips the phase of the all-ones state over
    /// `controls + 1` qubits. `controls == 0` degenerates to `Z`,
    /// `controls == 1` to `CZ`.
    Mcz {
        /// Number of control qubits.
        controls: u32,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
            StandardGate::Mcz { .. } => "mcz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::SX
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) | StandardGate::Swap => 2,

            StandardGate::CCX => 3,

            StandardGate::Mcz { controls } => controls + 1,
        }
    }

    /// Get the rotation angle, for gates that carry one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CP(t) => Some(*t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::CP(PI).name(), "cp");
    }

    #[test]
    fn test_mcz_arity() {
        assert_eq!(StandardGate::Mcz { controls: 0 }.num_qubits(), 1);
        assert_eq!(StandardGate::Mcz { controls: 1 }.num_qubits(), 2);
        assert_eq!(StandardGate::Mcz { controls: 4 }.num_qubits(), 5);
        assert_eq!(StandardGate::Mcz { controls: 2 }.name(), "mcz");
    }

    #[test]
    fn test_angle() {
        assert_eq!(StandardGate::Rx(PI / 2.0).angle(), Some(PI / 2.0));
        assert_eq!(StandardGate::H.angle(), None);
    }
}
