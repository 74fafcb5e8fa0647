//! Demo runners for executing the noise-comparison experiments.

pub mod noise_sweep;

pub use noise_sweep::{ConditionResults, SweepConfig, SweepSummary, run_sweep};
