//! Grover's search algorithm circuit generators.
//!
//! Grover's algorithm finds a marked item in an unstructured database
//! with O(sqrt(N)) queries, compared to O(N) classically. The oracle
//! marks a basis state by phase flip; the diffusion operator reflects
//! the state about the uniform superposition, amplifying the marked
//! amplitude with each iteration.

use qnoise_ir::{Circuit, IrError, IrResult, QubitId};
use std::f64::consts::PI;

/// Generate a Grover search circuit for one marked state.
///
/// # Arguments
/// * `n_qubits` - Number of qubits (search space size = 2^n)
/// * `marked_state` - The state to find (0 to 2^n - 1)
/// * `iterations` - Number of Grover iterations (optimal ≈ π/4 · sqrt(2^n))
///
/// # Returns
/// A circuit implementing Grover's algorithm with measurements.
pub fn grover_circuit(n_qubits: u32, marked_state: usize, iterations: usize) -> IrResult<Circuit> {
    if n_qubits == 0 {
        return Err(IrError::invalid_parameter(
            "n_qubits",
            "search needs at least one qubit",
        ));
    }
    let space = 1usize << n_qubits;
    if marked_state >= space {
        return Err(IrError::invalid_parameter(
            "marked_state",
            format!("{marked_state} is outside the search space of {space} states"),
        ));
    }

    let mut circuit = Circuit::with_size("grover", n_qubits, n_qubits);

    // Uniform superposition over all states
    for i in 0..n_qubits {
        circuit.h(QubitId(i))?;
    }
    circuit.barrier_all()?;

    for _ in 0..iterations {
        apply_oracle(&mut circuit, n_qubits, marked_state)?;
        circuit.barrier_all()?;
        apply_diffusion(&mut circuit, n_qubits)?;
        circuit.barrier_all()?;
    }

    circuit.measure_all()?;
    Ok(circuit)
}

/// Generate the diffusion-only circuit used by the noise sweep.
///
/// Prepares the uniform superposition, applies one diffusion operator,
/// and measures. Without an oracle the diffusion maps the superposition
/// back onto itself (up to phase), so the ideal distribution stays
/// uniform; any structure in the measured counts comes from noise.
pub fn search_circuit(n_qubits: u32) -> IrResult<Circuit> {
    if n_qubits == 0 {
        return Err(IrError::invalid_parameter(
            "n_qubits",
            "search needs at least one qubit",
        ));
    }

    let mut circuit = Circuit::with_size("grover_search", n_qubits, n_qubits);

    for i in 0..n_qubits {
        circuit.h(QubitId(i))?;
    }
    circuit.barrier_all()?;
    apply_diffusion(&mut circuit, n_qubits)?;
    circuit.barrier_all()?;
    circuit.measure_all()?;
    Ok(circuit)
}

/// Calculate the optimal number of Grover iterations.
///
/// For a single marked item in a space of size N = 2^n, the optimal
/// number of iterations is approximately π/4 · sqrt(N), never below 1.
pub fn optimal_iterations(n_qubits: u32) -> usize {
    let n = 1usize << n_qubits;
    let optimal = (PI / 4.0 * (n as f64).sqrt()).round() as usize;
    optimal.max(1)
}

/// Phase-flip the marked state.
///
/// X-conjugation turns the all-ones multi-controlled Z into a phase flip
/// of an arbitrary basis state: X is applied to every qubit whose bit in
/// `marked_state` is 0, then MCZ over all qubits, then the X gates are
/// undone.
fn apply_oracle(circuit: &mut Circuit, n_qubits: u32, marked_state: usize) -> IrResult<()> {
    for i in 0..n_qubits {
        if (marked_state >> i) & 1 == 0 {
            circuit.x(QubitId(i))?;
        }
    }

    circuit.mcz((0..n_qubits).map(QubitId))?;

    for i in 0..n_qubits {
        if (marked_state >> i) & 1 == 0 {
            circuit.x(QubitId(i))?;
        }
    }
    Ok(())
}

/// Apply the diffusion operator (2|s⟩⟨s| - I).
///
/// Implemented as H-all, X-all, MCZ over all qubits, X-all, H-all.
fn apply_diffusion(circuit: &mut Circuit, n_qubits: u32) -> IrResult<()> {
    for i in 0..n_qubits {
        circuit.h(QubitId(i))?;
    }
    for i in 0..n_qubits {
        circuit.x(QubitId(i))?;
    }

    circuit.mcz((0..n_qubits).map(QubitId))?;

    for i in 0..n_qubits {
        circuit.x(QubitId(i))?;
    }
    for i in 0..n_qubits {
        circuit.h(QubitId(i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(1), 1); // N=2, π/4*1.41 ≈ 1.11 → 1
        assert_eq!(optimal_iterations(2), 2); // N=4, π/4*2 ≈ 1.57 → 2
        assert_eq!(optimal_iterations(3), 2); // N=8, π/4*2.83 ≈ 2.22 → 2
        assert_eq!(optimal_iterations(4), 3); // N=16, π/4*4 ≈ 3.14 → 3
    }

    #[test]
    fn test_grover_circuit_creation() {
        let circuit = grover_circuit(4, 7, 3).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 4);
    }

    #[test]
    fn test_grover_small_circuit() {
        let circuit = grover_circuit(2, 3, 1).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert!(circuit.depth() > 0);
    }

    #[test]
    fn test_marked_state_out_of_range() {
        assert!(grover_circuit(2, 4, 1).is_err());
        assert!(grover_circuit(0, 0, 1).is_err());
    }

    #[test]
    fn test_search_circuit_structure() {
        let circuit = search_circuit(3).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 3);
        // H×3, diffusion (H×3, X×3, mcz, X×3, H×3), measure
        assert_eq!(circuit.num_ops(), 3 + 13 + 1);
    }
}
