//! qnoise Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits and noise models in qnoise. It is the foundation the backend
//! abstraction and the simulator build on.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over a fixed set of
//! qubits and classical bits, built through a fluent API and executed
//! immutably. A [`NoiseModel`] attaches [`ErrorChannel`]s to gate names; it
//! travels with a run request rather than living inside the circuit.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`StandardGate`] for built-in gates, including the
//!   variable-arity multi-controlled Z
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Noise**: [`ErrorChannel`] and [`NoiseModel`] for stochastic error
//!   descriptions
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qnoise_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.depth() >= 2);
//! ```
//!
//! # Example: A Uniform Noise Model
//!
//! ```rust
//! use qnoise_ir::{ErrorChannel, NoiseModel};
//!
//! let channel = ErrorChannel::depolarizing(0.003).unwrap();
//! let model = NoiseModel::uniform("h", channel);
//!
//! assert!(model.channel_for("h").is_some());
//! assert!(model.channel_for("cx").is_none());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `SX` | 1 | Clifford gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation / phase gates |
//! | `CX`, `CZ`, `CP` | 2 | Controlled gates |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli gate |
//! | `Mcz` | n | Multi-controlled Z (Z for n = 1) |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use noise::{ErrorChannel, NoiseModel};
pub use qubit::{ClbitId, QubitId};
