//! Backend trait and run configuration.
//!
//! The [`Backend`] trait defines the lifecycle for interacting with a
//! quantum backend:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! ## Design principles
//!
//! - **Async-native**: all I/O methods are async.
//! - **Thread-safe**: `Send + Sync` bound enables shared ownership.
//! - **Minimal**: only the methods needed for the job lifecycle.
//! - **Infallible introspection**: `capabilities()` is synchronous and
//!   infallible — a backend that cannot report capabilities without I/O
//!   is not correctly initialized.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qnoise_ir::{Circuit, NoiseModel};

use crate::capability::{Capabilities, Topology};
use crate::error::HalResult;
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// How a circuit should be executed: shot count, optional noise model,
/// optional connectivity constraint.
///
/// The noise model travels with the run request, not with the circuit, so
/// one circuit can be executed under many noise conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    /// Number of shots to execute.
    pub shots: u32,
    /// Noise model to apply during execution. `None` means ideal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseModel>,
    /// Connectivity to record with the run. Carried as metadata; the
    /// simulator does not reject non-adjacent two-qubit gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_map: Option<Topology>,
}

impl RunSpec {
    /// Create a run spec for an ideal run.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            noise: None,
            coupling_map: None,
        }
    }

    /// Attach a noise model.
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Attach a connectivity constraint.
    pub fn with_coupling_map(mut self, topology: Topology) -> Self {
        self.coupling_map = Some(topology);
        self
    }
}

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for quantum backends.
///
/// This trait defines the interface that all backends MUST implement.
/// It covers the full job lifecycle: introspection, validation, submission,
/// status polling, result retrieval, and cancellation.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible. Capabilities
///   MUST be cached at construction time.
/// - `availability()` SHOULD perform a lightweight liveness check.
/// - `validate()` MUST check the circuit against backend constraints
///   before submission.
/// - `submit()` MUST return `JobId` with initial status `Queued`.
/// - `result()` MUST only be called when status is `Completed`.
/// - `wait()` has a default implementation (500ms poll, 5-minute timeout).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    ///
    /// This method is synchronous and infallible. Implementations MUST
    /// cache capabilities at construction time and return a reference.
    fn capabilities(&self) -> &Capabilities;

    /// Check backend availability.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Validate a circuit against backend constraints.
    ///
    /// SHOULD check at minimum:
    /// - Qubit count vs `capabilities().num_qubits`
    /// - Gate support vs `capabilities().gate_set`
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Submit a circuit for execution.
    ///
    /// Returns a job ID that can be used to check status and retrieve
    /// results. The job MUST start in `Queued` status.
    async fn submit(&self, circuit: &Circuit, spec: &RunSpec) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    ///
    /// MUST only be called when `status()` returns `Completed`.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a running job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    ///
    /// Default implementation polls every 500ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        use crate::error::HalError;
        use tokio::time::sleep;

        let poll_interval = Duration::from_millis(500);
        let max_polls = 600; // 5 minutes max

        for _ in 0..max_polls {
            let status = self.status(job_id).await?;

            match status {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    sleep(poll_interval).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue (if known).
    pub queue_depth: Option<u32>,
    /// Estimated wait time for a new job (if known).
    pub estimated_wait: Option<Duration>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Create availability for a backend that is always available.
    ///
    /// Typical for simulators — zero queue, zero wait.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            estimated_wait: Some(Duration::ZERO),
            status_message: None,
        }
    }

    /// Create availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            estimated_wait: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Circuit is valid and can be submitted directly.
    Valid,
    /// Circuit is invalid for this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid (can be submitted as-is).
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("test").with_extra("max_qubits", serde_json::json!(24));

        assert_eq!(config.name, "test");
        assert!(config.extra.contains_key("max_qubits"));
    }

    #[test]
    fn test_run_spec_builder() {
        let spec = RunSpec::new(2048)
            .with_noise(NoiseModel::ideal())
            .with_coupling_map(Topology::linear(5));

        assert_eq!(spec.shots, 2048);
        assert!(spec.noise.is_some());
        assert!(spec.coupling_map.is_some());
    }

    #[test]
    fn test_backend_availability_always_available() {
        let avail = BackendAvailability::always_available();
        assert!(avail.is_available);
        assert_eq!(avail.queue_depth, Some(0));
        assert_eq!(avail.estimated_wait, Some(Duration::ZERO));
        assert!(avail.status_message.is_none());
    }

    #[test]
    fn test_backend_availability_unavailable() {
        let avail = BackendAvailability::unavailable("maintenance");
        assert!(!avail.is_available);
        assert_eq!(avail.status_message, Some("maintenance".to_string()));
    }

    #[test]
    fn test_validation_result_is_valid() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(!ValidationResult::Invalid { reasons: vec![] }.is_valid());
    }
}
