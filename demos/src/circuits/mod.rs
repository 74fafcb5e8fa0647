//! Quantum circuit generators for demos.

pub mod grover;

pub use grover::{grover_circuit, optimal_iterations, search_circuit};
