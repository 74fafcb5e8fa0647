//! qnoise Local Statevector Simulator
//!
//! This crate provides a local simulator backend that executes circuits
//! shot by shot, sampling stochastic error channels along each trajectory.
//! Noiseless runs are exact statevector simulation; noisy runs approximate
//! the channel's density-matrix action via Monte-Carlo trajectories.
//!
//! # Features
//!
//! - **Trajectory noise**: depolarizing, bit-flip, amplitude damping,
//!   phase damping per gate occurrence, plus readout misclassification
//! - **All standard gates**: everything `qnoise-ir` can express,
//!   including the variable-arity multi-controlled Z
//! - **Measurement sampling**: per-shot outcome sampling with
//!   configurable shot counts
//!
//! # Performance
//!
//! Because noisy runs replay the circuit per shot, cost scales with
//! `shots × ops × 2^n`. Intended range is up to ~20 qubits.
//!
//! # Example
//!
//! ```ignore
//! use qnoise_adapter_sim::SimulatorBackend;
//! use qnoise_hal::{Backend, RunSpec};
//! use qnoise_ir::{Circuit, ErrorChannel, NoiseModel};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let circuit = Circuit::bell()?;
//!     let noise = NoiseModel::uniform("h", ErrorChannel::depolarizing(0.003)?);
//!     let spec = RunSpec::new(1000).with_noise(noise);
//!
//!     let job_id = backend.submit(&circuit, &spec).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("counts: {:?}", result.counts.sorted());
//!
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
