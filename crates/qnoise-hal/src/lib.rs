//! qnoise Hardware Abstraction Layer
//!
//! This crate defines the interface between circuits and the engines that
//! execute them. A [`Backend`] accepts a [`Circuit`](qnoise_ir::Circuit)
//! together with a [`RunSpec`] (shots, optional noise model, optional
//! coupling map), runs it asynchronously through a job lifecycle, and
//! returns an [`ExecutionResult`] of measured bitstring counts.
//!
//! # Components
//!
//! - **Backend**: [`Backend`] trait with the submit/status/result/cancel
//!   lifecycle and a provided polling [`Backend::wait`]
//! - **Jobs**: [`JobId`], [`JobStatus`], [`Job`] state machine
//! - **Results**: [`Counts`] and [`ExecutionResult`]
//! - **Capabilities**: [`Capabilities`], [`GateSet`], [`Topology`]
//! - **Calibration**: [`DeviceCalibration`] snapshots and the
//!   [`CalibrationSource`] loader trait
//!
//! # Example
//!
//! ```rust,ignore
//! use qnoise_hal::{Backend, RunSpec};
//! use qnoise_ir::Circuit;
//!
//! async fn run(backend: &dyn Backend, circuit: &Circuit) -> anyhow::Result<()> {
//!     let spec = RunSpec::new(2048);
//!     let job_id = backend.submit(circuit, &spec).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("counts: {:?}", result.counts.sorted());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod calibration;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, RunSpec, ValidationResult,
};
pub use calibration::{CalibrationSource, DeviceCalibration, FileCalibrationSource};
pub use capability::{Capabilities, GateSet, Topology, TopologyKind};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
