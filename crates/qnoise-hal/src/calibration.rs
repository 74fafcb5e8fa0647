//! Device calibration import.
//!
//! A [`DeviceCalibration`] is a snapshot of a device's characterization
//! data: per-gate error rates, per-qubit readout error, coupling map, and
//! optionally T1/T2 times. [`DeviceCalibration::noise_model`] converts a
//! snapshot into a [`NoiseModel`] that a simulator can replay, so runs
//! against the simulator approximate what the device would return.
//!
//! Calibration snapshots are loaded through the [`CalibrationSource`]
//! trait. [`FileCalibrationSource`] reads JSON snapshots from a local
//! directory, one file per device.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use qnoise_ir::{ErrorChannel, NoiseModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::Topology;
use crate::error::{HalError, HalResult};

/// A calibration snapshot for one device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCalibration {
    /// Device identifier, e.g. `"ibmq_lima"`.
    pub device: String,
    /// Number of qubits on the device.
    pub num_qubits: u32,
    /// Gate names the device executes natively.
    #[serde(default)]
    pub basis_gates: Vec<String>,
    /// Coupling map as directed pairs. Treated as bidirectional.
    #[serde(default)]
    pub coupling_map: Vec<(u32, u32)>,
    /// Average error rate per gate name, in `[0, 1]`.
    #[serde(default)]
    pub gate_errors: BTreeMap<String, f64>,
    /// Readout error probability per qubit, indexed by qubit id.
    #[serde(default)]
    pub readout_errors: Vec<f64>,
    /// T1 relaxation time per qubit (microseconds), if characterized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t1: Option<Vec<f64>>,
    /// T2 dephasing time per qubit (microseconds), if characterized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t2: Option<Vec<f64>>,
}

impl DeviceCalibration {
    /// Average error rate for a gate, if characterized.
    pub fn gate_error(&self, gate: &str) -> Option<f64> {
        self.gate_errors.get(gate).copied()
    }

    /// Readout error probability for a qubit, if characterized.
    pub fn qubit_readout_error(&self, qubit: u32) -> Option<f64> {
        self.readout_errors.get(qubit as usize).copied()
    }

    /// Device connectivity as a [`Topology`].
    pub fn topology(&self) -> Topology {
        Topology::custom(self.coupling_map.clone())
    }

    /// Build a noise model replaying this snapshot.
    ///
    /// Each characterized gate error becomes a depolarizing channel with
    /// that probability; readout errors carry over per qubit. Gates with
    /// a zero (or invalid) error rate are skipped.
    pub fn noise_model(&self) -> NoiseModel {
        let mut model = NoiseModel::ideal();
        for (gate, &error) in &self.gate_errors {
            match ErrorChannel::depolarizing(error) {
                Ok(channel) if !channel.is_trivial() => {
                    model = model.with_channel(gate.clone(), channel);
                }
                Ok(_) => {}
                Err(_) => {
                    debug!(device = %self.device, gate = %gate, error,
                        "skipping gate with out-of-range error rate");
                }
            }
        }
        if !self.readout_errors.is_empty() {
            model = model.with_readout_errors(self.readout_errors.clone());
        }
        model
    }
}

/// Source of calibration snapshots.
#[async_trait]
pub trait CalibrationSource: Send + Sync {
    /// Load the calibration snapshot for a device.
    ///
    /// Returns [`HalError::CalibrationUnavailable`] when the source has
    /// no snapshot for `device_id`.
    async fn load(&self, device_id: &str) -> HalResult<DeviceCalibration>;
}

/// Calibration source reading JSON snapshots from a directory.
///
/// Each device's snapshot lives at `<dir>/<device_id>.json`.
#[derive(Debug, Clone)]
pub struct FileCalibrationSource {
    dir: PathBuf,
}

impl FileCalibrationSource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl CalibrationSource for FileCalibrationSource {
    async fn load(&self, device_id: &str) -> HalResult<DeviceCalibration> {
        let path = self.dir.join(format!("{device_id}.json"));
        if !path.is_file() {
            return Err(HalError::CalibrationUnavailable(device_id.to_string()));
        }
        debug!(device = device_id, path = %path.display(), "loading calibration snapshot");
        let data = tokio::fs::read_to_string(&path).await?;
        let calibration: DeviceCalibration = serde_json::from_str(&data)?;
        Ok(calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lima() -> DeviceCalibration {
        DeviceCalibration {
            device: "ibmq_lima".into(),
            num_qubits: 5,
            basis_gates: vec!["id".into(), "rz".into(), "sx".into(), "x".into(), "cx".into()],
            coupling_map: vec![(0, 1), (1, 2), (1, 3), (3, 4)],
            gate_errors: BTreeMap::from([
                ("sx".to_string(), 0.00032),
                ("cx".to_string(), 0.0091),
                ("id".to_string(), 0.0),
            ]),
            readout_errors: vec![0.021, 0.018, 0.035, 0.024, 0.044],
            t1: None,
            t2: None,
        }
    }

    #[test]
    fn test_noise_model_from_snapshot() {
        let model = lima().noise_model();
        assert!(model.channel_for("sx").is_some());
        assert!(model.channel_for("cx").is_some());
        // Zero-error gates don't contribute a channel.
        assert!(model.channel_for("id").is_none());
        assert!((model.qubit_readout_error(2).unwrap() - 0.035).abs() < 1e-12);
    }

    #[test]
    fn test_topology_from_coupling_map() {
        let topo = lima().topology();
        assert!(topo.is_connected(1, 3));
        assert!(!topo.is_connected(0, 4));
    }

    #[tokio::test]
    async fn test_file_source_loads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ibmq_lima.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", serde_json::to_string(&lima()).unwrap()).unwrap();

        let source = FileCalibrationSource::new(dir.path());
        let loaded = source.load("ibmq_lima").await.unwrap();
        assert_eq!(loaded.device, "ibmq_lima");
        assert_eq!(loaded.num_qubits, 5);
        assert_eq!(loaded.coupling_map.len(), 4);
    }

    #[tokio::test]
    async fn test_file_source_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCalibrationSource::new(dir.path());
        let err = source.load("ibmq_quito").await.unwrap_err();
        assert!(matches!(err, HalError::CalibrationUnavailable(d) if d == "ibmq_quito"));
    }
}
