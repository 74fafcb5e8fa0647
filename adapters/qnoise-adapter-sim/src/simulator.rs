//! Simulator backend implementation.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qnoise_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, RunSpec, ValidationResult,
};
use qnoise_ir::{Circuit, ErrorChannel, InstructionKind, NoiseModel};

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Simulates circuits with a statevector per trajectory, replaying the
/// whole circuit once per shot so stochastic noise channels can be
/// sampled independently each time. Supports circuits up to ~20 qubits
/// (limited by memory and the per-shot replay cost).
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Capabilities cached at construction time.
    capabilities: Capabilities,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(20)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit, spec))]
    fn run_simulation(&self, circuit: &Circuit, spec: &RunSpec) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        let noise = spec.noise.as_ref();
        debug!(
            num_qubits,
            shots = spec.shots,
            noisy = noise.is_some_and(|n| !n.is_empty()),
            "starting simulation"
        );

        let mut counts = Counts::new();
        let mut rng = StdRng::from_entropy();

        for shot in 0..spec.shots {
            let mut sv = Statevector::new(num_qubits);

            for inst in circuit.instructions() {
                sv.apply(inst);

                if let (InstructionKind::Gate(gate), Some(model)) = (&inst.kind, noise) {
                    if let Some(channel) = model.channel_for(gate.name()) {
                        for q in &inst.qubits {
                            sv.apply_channel(q.0 as usize, channel, &mut rng);
                        }
                    }
                }
            }

            let mut outcome = sv.sample(&mut rng);
            if let Some(model) = noise {
                outcome = apply_readout_errors(outcome, num_qubits, model, &mut rng);
            }
            counts.insert(sv.outcome_to_bitstring(outcome), 1);

            if shot > 0 && shot % 10_000 == 0 {
                debug!(shot, "shots completed");
            }
        }

        let elapsed = start.elapsed();
        debug!(elapsed_ms = elapsed.as_millis() as u64, "simulation completed");

        ExecutionResult::new(counts, spec.shots)
    }

    fn check_shots(&self, shots: u32) -> HalResult<()> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots exceeds backend maximum of {}",
                self.capabilities.max_shots
            )));
        }
        Ok(())
    }
}

/// Flip each measured bit independently with its readout error probability.
fn apply_readout_errors(
    outcome: usize,
    num_qubits: usize,
    model: &NoiseModel,
    rng: &mut impl Rng,
) -> usize {
    // A uniform readout channel on the measure operation applies to every
    // qubit; per-qubit probabilities from calibration take precedence.
    let uniform = match model.channel_for("measure") {
        Some(ErrorChannel::ReadoutError { p }) => Some(*p),
        _ => None,
    };

    let mut flipped = outcome;
    for q in 0..num_qubits {
        let p = model.qubit_readout_error(q).or(uniform);
        if let Some(p) = p {
            if rng.r#gen::<f64>() < p {
                flipped ^= 1 << q;
            }
        }
    }
    flipped
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = Vec::new();

        if circuit.num_qubits() > self.max_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            ));
        }

        for inst in circuit.instructions() {
            if let InstructionKind::Gate(gate) = &inst.kind {
                if !self.capabilities.gate_set.contains(gate.name()) {
                    reasons.push(format!("unsupported gate: {}", gate.name()));
                }
            }
        }

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit, spec))]
    async fn submit(&self, circuit: &Circuit, spec: &RunSpec) -> HalResult<JobId> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        self.check_shots(spec.shots)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), spec.shots)
            .with_backend(self.name())
            .with_status(JobStatus::Running);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job: job.clone(), result: None });
        }

        debug!(job = %job_id, "submitted job");

        // Run immediately; the simulator has no queue.
        let mut result = self.run_simulation(circuit, spec);

        let job = job.with_status(JobStatus::Completed);
        if let Some(ms) = job.execution_time_ms() {
            result = result.with_execution_time(ms);
        }
        if let Some(backend) = &job.backend {
            result = result.with_metadata(serde_json::json!({ "backend": backend }));
        }

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(sim_job) = jobs.get_mut(&job_id.0) {
                sim_job.result = Some(result);
                sim_job.job = job;
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .extra
            .get("max_qubits")
            .and_then(serde_json::value::Value::as_u64)
            .map_or(20, |v| v as u32);

        Ok(Self {
            config,
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
        })
    }
}
