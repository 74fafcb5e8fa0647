//! Job lifecycle types.
//!
//! A job starts `Queued`, moves through `Running`, and ends in one of
//! the terminal states `Completed`, `Failed`, or `Cancelled`.
//! Transitions are monotonic: [`Job::with_status`] refuses to move a
//! job out of a terminal state, so a completed job can never be
//! "cancelled" after the fact. Transition times are stamped as the job
//! advances and feed the execution-time reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job is waiting in queue.
    Queued,
    /// Job is currently running.
    Running,
    /// Job completed successfully.
    Completed,
    /// Job failed with an error message.
    Failed(String),
    /// Job was cancelled.
    Cancelled,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled
        )
    }

    /// Check if the job is still pending (queued or running).
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Running)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed(msg) => write!(f, "Failed: {msg}"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A job and its lifecycle bookkeeping.
///
/// Besides the identifier and status, a job records which backend it
/// was submitted to and when it was created, started, and finished.
/// Backends surface the stamps through [`Job::execution_time_ms`] when
/// building an execution result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// The job identifier.
    pub id: JobId,
    /// Current status.
    pub status: JobStatus,
    /// Number of shots requested.
    pub shots: u32,
    /// Time the job was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Time the job started running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time the job finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Backend the job was submitted to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl Job {
    /// Create a new job in `Queued` status.
    pub fn new(id: impl Into<JobId>, shots: u32) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Queued,
            shots,
            created_at: Some(Utc::now()),
            started_at: None,
            finished_at: None,
            backend: None,
        }
    }

    /// Set the backend name.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Advance the job to a new status, stamping transition times.
    ///
    /// Terminal states are permanent: once the job is `Completed`,
    /// `Failed`, or `Cancelled`, further transitions are ignored.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        if self.status.is_terminal() {
            return self;
        }
        self.status = status;
        if matches!(self.status, JobStatus::Running) && self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        if self.status.is_terminal() && self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
        self
    }

    /// Wall-clock run time, once the job has both started and finished.
    pub fn execution_time_ms(&self) -> Option<u64> {
        let (started, finished) = (self.started_at?, self.finished_at?);
        (finished - started).num_milliseconds().try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed("error".into()).is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_job_creation() {
        let job = Job::new("job-123", 2048).with_backend("simulator");

        assert_eq!(job.id.0, "job-123");
        assert_eq!(job.shots, 2048);
        assert_eq!(job.backend, Some("simulator".to_string()));
        assert!(job.created_at.is_some());
        assert!(job.status.is_pending());
    }

    #[test]
    fn test_status_transition_stamps_times() {
        let job = Job::new("job-1", 100)
            .with_status(JobStatus::Running)
            .with_status(JobStatus::Completed);

        assert!(job.started_at.is_some());
        assert!(job.finished_at.is_some());
        assert!(job.status.is_success());
        assert!(job.execution_time_ms().is_some());
    }

    #[test]
    fn test_terminal_states_are_permanent() {
        let job = Job::new("job-2", 100)
            .with_status(JobStatus::Running)
            .with_status(JobStatus::Completed)
            .with_status(JobStatus::Cancelled);

        assert!(job.status.is_success());
    }

    #[test]
    fn test_execution_time_needs_both_stamps() {
        let queued = Job::new("job-3", 100);
        assert_eq!(queued.execution_time_ms(), None);

        let running = queued.with_status(JobStatus::Running);
        assert_eq!(running.execution_time_ms(), None);
    }
}
