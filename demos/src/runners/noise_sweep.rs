//! Noise-comparison sweep over Grover search circuits.
//!
//! For each configured qubit count the sweep runs the diffusion-only
//! search circuit under five conditions:
//!
//! 1. **Baseline** — no noise
//! 2. **Real** — the noise model replayed from a device calibration
//!    snapshot (including its readout errors and coupling map)
//! 3. **Depolarizing** — uniform depolarizing channel on the noisy gate
//! 4. **Amplitude** — uniform amplitude damping on the noisy gate
//! 5. **Phase** — uniform phase damping on the noisy gate
//!
//! A qubit count only produces output when all five runs succeed; a
//! failure skips that count and the sweep moves on to the next one.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{error, info, instrument, warn};

use qnoise_hal::{Backend, CalibrationSource, Counts, HalError, RunSpec, Topology};
use qnoise_ir::{Circuit, ErrorChannel, NoiseModel};

use crate::circuits::grover::search_circuit;
use crate::{create_progress_bar, report};

/// Configuration for a noise sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Qubit counts to sweep over.
    pub qubit_counts: Vec<u32>,
    /// Shots per run.
    pub shots: u32,
    /// Error rate (or damping parameter) for the synthetic channels.
    pub error_rate: f64,
    /// Gate name the synthetic channels attach to.
    pub noisy_gate: String,
    /// Device to replay calibration noise from. `None` runs the "Real"
    /// condition without noise.
    pub device: Option<String>,
    /// Directory the CSV tables and histograms are written to.
    pub output_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            qubit_counts: vec![2, 3, 5],
            shots: 100_000,
            error_rate: 3e-3,
            noisy_gate: "h".into(),
            device: Some("ibmq_lima".into()),
            output_dir: PathBuf::from("results"),
        }
    }
}

impl SweepConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the qubit counts to sweep over.
    pub fn with_qubit_counts(mut self, counts: Vec<u32>) -> Self {
        self.qubit_counts = counts;
        self
    }

    /// Set the shots per run.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the synthetic error rate.
    pub fn with_error_rate(mut self, rate: f64) -> Self {
        self.error_rate = rate;
        self
    }

    /// Set the gate the synthetic channels attach to.
    pub fn with_noisy_gate(mut self, gate: impl Into<String>) -> Self {
        self.noisy_gate = gate.into();
        self
    }

    /// Set the calibration device, or `None` to skip device noise.
    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Counts from the five noise conditions for one qubit count.
#[derive(Debug, Clone)]
pub struct ConditionResults {
    /// No noise.
    pub baseline: Counts,
    /// Device-calibrated noise.
    pub device: Counts,
    /// Uniform depolarizing channel.
    pub depolarizing: Counts,
    /// Uniform amplitude damping.
    pub amplitude: Counts,
    /// Uniform phase damping.
    pub phase: Counts,
}

/// Outcome of a sweep.
#[derive(Debug)]
pub struct SweepSummary {
    /// Qubit counts whose five runs all completed.
    pub completed: Vec<u32>,
    /// Qubit counts skipped after a failure.
    pub failed: Vec<u32>,
    /// Where the output files were written.
    pub output_dir: PathBuf,
}

/// Run the full noise sweep.
///
/// Writes `test_<n>.csv` and `<n>qubits.txt` into the configured output
/// directory for each qubit count that completes.
#[instrument(skip(config, backend, calibration))]
pub async fn run_sweep(
    config: &SweepConfig,
    backend: &dyn Backend,
    calibration: &dyn CalibrationSource,
) -> anyhow::Result<SweepSummary> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "creating output directory {}",
            config.output_dir.display()
        )
    })?;

    let (device_noise, device_topology) = match &config.device {
        Some(device_id) => {
            let snapshot = calibration
                .load(device_id)
                .await
                .with_context(|| format!("loading calibration for '{device_id}'"))?;
            info!(
                device = %device_id,
                gates = snapshot.gate_errors.len(),
                "replaying device calibration"
            );
            (snapshot.noise_model(), Some(snapshot.topology()))
        }
        None => {
            info!("no device configured; the Real condition runs without noise");
            (NoiseModel::ideal(), None)
        }
    };

    let depolarizing = NoiseModel::uniform(
        config.noisy_gate.clone(),
        ErrorChannel::depolarizing(config.error_rate)?,
    );
    let amplitude = NoiseModel::uniform(
        config.noisy_gate.clone(),
        ErrorChannel::amplitude_damping(config.error_rate)?,
    );
    let phase = NoiseModel::uniform(
        config.noisy_gate.clone(),
        ErrorChannel::phase_damping(config.error_rate)?,
    );

    let mut summary = SweepSummary {
        completed: vec![],
        failed: vec![],
        output_dir: config.output_dir.clone(),
    };

    let progress = create_progress_bar(config.qubit_counts.len() as u64, "sweeping qubit counts");

    for &n in &config.qubit_counts {
        info!(qubits = n, shots = config.shots, "sweeping qubit count");

        let outcome = run_conditions(
            backend,
            config,
            n,
            &device_noise,
            device_topology.as_ref(),
            &depolarizing,
            &amplitude,
            &phase,
        )
        .await;

        // A failure in any of the five runs, or while writing the report
        // files, skips this qubit count; the sweep moves on to the next.
        match outcome.and_then(|results| write_reports(&config.output_dir, n, &results)) {
            Ok(()) => summary.completed.push(n),
            Err(e) => {
                error!(qubits = n, error = %e, "sweep failed for qubit count; skipping");
                summary.failed.push(n);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if summary.completed.is_empty() && !summary.failed.is_empty() {
        warn!("no qubit count completed");
    }

    Ok(summary)
}

fn write_reports(output_dir: &Path, n: u32, results: &ConditionResults) -> anyhow::Result<()> {
    let csv_path = output_dir.join(format!("test_{n}.csv"));
    let hist_path = output_dir.join(format!("{n}qubits.txt"));
    report::write_csv(&csv_path, results)
        .with_context(|| format!("writing {}", csv_path.display()))?;
    report::write_histogram(&hist_path, results)
        .with_context(|| format!("writing {}", hist_path.display()))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_conditions(
    backend: &dyn Backend,
    config: &SweepConfig,
    n: u32,
    device_noise: &NoiseModel,
    device_topology: Option<&Topology>,
    depolarizing: &NoiseModel,
    amplitude: &NoiseModel,
    phase: &NoiseModel,
) -> anyhow::Result<ConditionResults> {
    let circuit = search_circuit(n)?;

    let mut device_spec = RunSpec::new(config.shots).with_noise(device_noise.clone());
    if let Some(topology) = device_topology {
        device_spec = device_spec.with_coupling_map(topology.clone());
    }

    Ok(ConditionResults {
        baseline: run_counts(backend, &circuit, "baseline", &RunSpec::new(config.shots)).await?,
        device: run_counts(backend, &circuit, "device", &device_spec).await?,
        depolarizing: run_counts(
            backend,
            &circuit,
            "depolarizing",
            &RunSpec::new(config.shots).with_noise(depolarizing.clone()),
        )
        .await?,
        amplitude: run_counts(
            backend,
            &circuit,
            "amplitude",
            &RunSpec::new(config.shots).with_noise(amplitude.clone()),
        )
        .await?,
        phase: run_counts(
            backend,
            &circuit,
            "phase",
            &RunSpec::new(config.shots).with_noise(phase.clone()),
        )
        .await?,
    })
}

async fn run_counts(
    backend: &dyn Backend,
    circuit: &Circuit,
    condition: &str,
    spec: &RunSpec,
) -> Result<Counts, HalError> {
    let job_id = backend.submit(circuit, spec).await?;
    let result = backend.wait(&job_id).await?;
    crate::print_result(
        &format!("{condition} ({}q)", circuit.num_qubits()),
        condition_summary(&result.counts),
    );
    Ok(result.counts)
}

/// One-line summary of a condition's measured distribution.
fn condition_summary(counts: &Counts) -> String {
    match counts.most_frequent() {
        Some((top, count)) => {
            format!("{} outcomes, top |{top}⟩ ×{count}", counts.len())
        }
        None => "no outcomes".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_summary_names_top_outcome() {
        let counts = Counts::from_pairs([("11".to_string(), 60), ("00".to_string(), 40)]);
        assert_eq!(condition_summary(&counts), "2 outcomes, top |11⟩ ×60");
        assert_eq!(condition_summary(&Counts::new()), "no outcomes");
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.qubit_counts, vec![2, 3, 5]);
        assert_eq!(config.shots, 100_000);
        assert!((config.error_rate - 3e-3).abs() < 1e-12);
        assert_eq!(config.noisy_gate, "h");
        assert_eq!(config.device.as_deref(), Some("ibmq_lima"));
    }

    #[test]
    fn test_config_builders() {
        let config = SweepConfig::new()
            .with_qubit_counts(vec![2])
            .with_shots(512)
            .with_error_rate(0.01)
            .with_noisy_gate("x")
            .with_device(None)
            .with_output_dir("/tmp/sweep");

        assert_eq!(config.qubit_counts, vec![2]);
        assert_eq!(config.shots, 512);
        assert_eq!(config.noisy_gate, "x");
        assert!(config.device.is_none());
        assert_eq!(config.output_dir, PathBuf::from("/tmp/sweep"));
    }
}
