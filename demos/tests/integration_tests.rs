//! Integration tests for the demo suite.
//!
//! These tests run the Grover circuits and the noise sweep end-to-end
//! against the local statevector simulator.

use qnoise_adapter_sim::SimulatorBackend;
use qnoise_demos::circuits::grover::{grover_circuit, optimal_iterations, search_circuit};
use qnoise_demos::runners::{SweepConfig, run_sweep};
use qnoise_hal::{Backend, FileCalibrationSource, RunSpec};
use qnoise_ir::{ErrorChannel, NoiseModel};

/// Test Grover circuit generation for various qubit counts.
#[test]
fn test_grover_circuit_scaling() {
    for n in 2..=5 {
        let iterations = optimal_iterations(n);
        let circuit = grover_circuit(n, 0, iterations).unwrap();
        assert_eq!(circuit.num_qubits(), n as usize);
        assert_eq!(circuit.num_clbits(), n as usize);
        assert!(circuit.num_ops() > 0);
    }
}

/// Two qubits, one iteration: Grover amplifies the marked state to
/// certainty, so every shot should land on it.
#[tokio::test]
async fn test_grover_finds_marked_state() {
    let circuit = grover_circuit(2, 3, 1).unwrap();
    let backend = SimulatorBackend::new();

    let job_id = backend
        .submit(&circuit, &RunSpec::new(2048))
        .await
        .unwrap();
    let result = backend.wait(&job_id).await.unwrap();

    assert_eq!(result.counts.total_shots(), 2048);
    let marked = result.counts.get("11");
    assert!(
        marked as f64 >= 2048.0 * 0.9,
        "marked state underrepresented: {marked}/2048"
    );
}

/// Counts must account for every shot, with and without noise.
#[tokio::test]
async fn test_counts_sum_to_shots_under_noise() {
    let circuit = search_circuit(3).unwrap();
    let backend = SimulatorBackend::new();

    let specs = [
        RunSpec::new(500),
        RunSpec::new(500).with_noise(NoiseModel::uniform(
            "h",
            ErrorChannel::depolarizing(0.05).unwrap(),
        )),
        RunSpec::new(500).with_noise(NoiseModel::uniform(
            "h",
            ErrorChannel::amplitude_damping(0.05).unwrap(),
        )),
        RunSpec::new(500).with_noise(NoiseModel::uniform(
            "h",
            ErrorChannel::phase_damping(0.05).unwrap(),
        )),
    ];

    for spec in &specs {
        let job_id = backend.submit(&circuit, spec).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();
        assert_eq!(result.counts.total_shots(), 500);
        for bitstring in result.counts.bitstrings() {
            assert_eq!(bitstring.len(), 3);
        }
    }
}

/// Full sweep over one qubit count, replaying the bundled ibmq_lima
/// snapshot, writing into a temporary directory.
#[tokio::test]
async fn test_noise_sweep_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    let config = SweepConfig::new()
        .with_qubit_counts(vec![2])
        .with_shots(2000)
        .with_output_dir(dir.path());

    let backend = SimulatorBackend::new();
    let calibration = FileCalibrationSource::new("calibration");

    let summary = run_sweep(&config, &backend, &calibration).await.unwrap();
    assert_eq!(summary.completed, vec![2]);
    assert!(summary.failed.is_empty());

    let csv = std::fs::read_to_string(dir.path().join("test_2.csv")).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Qubit, Baseline, Real, Depolarizing, Amplitude, Phase"
    );
    assert!(lines.len() > 1, "expected at least one data row");

    let histogram = std::fs::read_to_string(dir.path().join("2qubits.txt")).unwrap();
    for label in [
        "Without noise",
        "With noise",
        "Depolarizing",
        "Amplitude dampening",
        "Phase dampening",
    ] {
        assert!(histogram.contains(label), "missing label: {label}");
    }
}

/// A qubit count the backend rejects is skipped; the rest of the sweep
/// still completes.
#[tokio::test]
async fn test_sweep_skips_oversized_counts() {
    let dir = tempfile::tempdir().unwrap();

    let config = SweepConfig::new()
        .with_qubit_counts(vec![2, 5])
        .with_shots(200)
        .with_device(None)
        .with_output_dir(dir.path());

    let backend = SimulatorBackend::with_max_qubits(3);
    let calibration = FileCalibrationSource::new("calibration");

    let summary = run_sweep(&config, &backend, &calibration).await.unwrap();
    assert_eq!(summary.completed, vec![2]);
    assert_eq!(summary.failed, vec![5]);

    assert!(dir.path().join("test_2.csv").is_file());
    assert!(!dir.path().join("test_5.csv").exists());
}

/// A report-writing failure skips that qubit count like any run
/// failure; later counts still complete and the summary survives.
#[tokio::test]
async fn test_sweep_skips_count_when_report_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on the CSV path makes the write fail
    std::fs::create_dir(dir.path().join("test_2.csv")).unwrap();

    let config = SweepConfig::new()
        .with_qubit_counts(vec![2, 3])
        .with_shots(200)
        .with_device(None)
        .with_output_dir(dir.path());

    let backend = SimulatorBackend::new();
    let calibration = FileCalibrationSource::new("calibration");

    let summary = run_sweep(&config, &backend, &calibration).await.unwrap();
    assert_eq!(summary.completed, vec![3]);
    assert_eq!(summary.failed, vec![2]);
    assert!(dir.path().join("test_3.csv").is_file());
    assert!(dir.path().join("3qubits.txt").is_file());
}

/// A sweep pointed at a device with no snapshot fails up front rather
/// than silently running the Real condition noiseless.
#[tokio::test]
async fn test_sweep_requires_calibration_for_device() {
    let dir = tempfile::tempdir().unwrap();

    let config = SweepConfig::new()
        .with_qubit_counts(vec![2])
        .with_shots(100)
        .with_device(Some("ibmq_quito".to_string()))
        .with_output_dir(dir.path());

    let backend = SimulatorBackend::new();
    let calibration = FileCalibrationSource::new("calibration");

    let err = run_sweep(&config, &backend, &calibration).await.unwrap_err();
    assert!(err.to_string().contains("ibmq_quito"));
}
