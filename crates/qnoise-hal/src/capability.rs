//! Backend capability introspection.
//!
//! This module defines the types that describe what a backend can do:
//! qubit count, supported gates, connectivity topology, and an optional
//! noise model characterizing the device. Runners use these to size
//! circuits and decide what the backend will accept.
//!
//! All edges in [`Topology`] are bidirectional: if `(a, b)` is present,
//! both `a → b` and `b → a` are valid two-qubit interactions.

use qnoise_ir::NoiseModel;
use serde::{Deserialize, Serialize};

/// Hardware capabilities of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM 3 naming convention).
    pub gate_set: GateSet,
    /// Qubit connectivity topology. All edges are bidirectional.
    pub topology: Topology,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`,
    /// `"trajectory_noise"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Device noise characterization, if one is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_profile: Option<NoiseModel>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            topology: Topology::full(num_qubits),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "trajectory_noise".into()],
            noise_profile: None,
        }
    }

    /// Override the topology with device connectivity.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Attach a noise characterization to these capabilities.
    pub fn with_noise_profile(mut self, profile: NoiseModel) -> Self {
        self.noise_profile = Some(profile);
        self
    }
}

/// Gate set supported by a backend.
///
/// Gate names follow the OpenQASM 3 naming convention (lowercase):
/// `h`, `cx`, `rz`, etc.
///
/// The `native` list identifies gates that execute without decomposition.
/// If `native` is empty, all supported gates are considered native
/// (typical for simulators).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Gates on three or more qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multi_qubit: Vec<String>,
    /// Native gates (execute without decomposition on this backend).
    pub native: Vec<String>,
}

impl GateSet {
    /// Create the full gate set the statevector simulator executes directly.
    pub fn universal() -> Self {
        Self {
            single_qubit: vec![
                "id".into(),
                "x".into(),
                "y".into(),
                "z".into(),
                "h".into(),
                "s".into(),
                "sdg".into(),
                "sx".into(),
                "rx".into(),
                "ry".into(),
                "rz".into(),
                "p".into(),
            ],
            two_qubit: vec![
                "cx".into(),
                "cz".into(),
                "cp".into(),
                "swap".into(),
            ],
            multi_qubit: vec!["ccx".into(), "mcz".into()],
            native: vec![],
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
            || self.two_qubit.iter().any(|g| g == gate)
            || self.multi_qubit.iter().any(|g| g == gate)
    }

    /// Check if a gate is native (executes without decomposition).
    ///
    /// If the `native` list is empty, all supported gates are considered
    /// native — this is the typical case for simulators.
    pub fn is_native(&self, gate: &str) -> bool {
        if self.native.is_empty() {
            self.contains(gate)
        } else {
            self.native.iter().any(|g| g == gate)
        }
    }
}

/// Qubit connectivity topology.
///
/// All edges are bidirectional: if `(a, b)` is listed, both `a → b`
/// and `b → a` are valid two-qubit interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// Kind of topology.
    pub kind: TopologyKind,
    /// Coupling edges (pairs of connected qubits). Bidirectional.
    pub edges: Vec<(u32, u32)>,
}

impl Topology {
    /// Create a linear topology.
    pub fn linear(n: u32) -> Self {
        let edges: Vec<_> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        Self {
            kind: TopologyKind::Linear,
            edges,
        }
    }

    /// Create a fully connected topology.
    pub fn full(n: u32) -> Self {
        let mut edges = vec![];
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        Self {
            kind: TopologyKind::FullyConnected,
            edges,
        }
    }

    /// Create a custom topology from edges.
    pub fn custom(edges: Vec<(u32, u32)>) -> Self {
        Self {
            kind: TopologyKind::Custom,
            edges,
        }
    }

    /// Check if two qubits are connected.
    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.edges
            .iter()
            .any(|&(a, b)| (a == q1 && b == q2) || (a == q2 && b == q1))
    }
}

/// Kind of qubit topology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopologyKind {
    /// Fully connected (all-to-all).
    FullyConnected,
    /// Linear chain.
    Linear,
    /// Custom topology.
    Custom,
}
