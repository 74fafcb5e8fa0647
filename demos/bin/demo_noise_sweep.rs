//! Noise-Model Comparison Sweep
//!
//! Runs the Grover search circuit at several qubit counts under five
//! noise conditions and writes comparison tables and histograms.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qnoise_adapter_sim::SimulatorBackend;
use qnoise_demos::runners::noise_sweep::{SweepConfig, run_sweep};
use qnoise_demos::{print_header, print_info, print_result, print_section, print_success};
use qnoise_hal::FileCalibrationSource;

#[derive(Parser, Debug)]
#[command(name = "demo-noise-sweep")]
#[command(about = "Compare measurement distributions under different noise models")]
struct Args {
    /// Qubit counts to sweep over
    #[arg(short, long, value_delimiter = ',', default_value = "2,3,5")]
    qubits: Vec<u32>,

    /// Shots per run
    #[arg(short, long, default_value = "100000")]
    shots: u32,

    /// Error rate for the synthetic channels
    #[arg(short, long, default_value = "0.003")]
    error_rate: f64,

    /// Gate the synthetic channels attach to
    #[arg(short, long, default_value = "h")]
    gate: String,

    /// Device whose calibration snapshot supplies the "Real" condition
    #[arg(short, long, default_value = "ibmq_lima")]
    device: String,

    /// Run the "Real" condition without device noise
    #[arg(long)]
    no_device: bool,

    /// Directory containing calibration snapshots
    #[arg(long, default_value = "demos/calibration")]
    calibration_dir: PathBuf,

    /// Output directory for CSV tables and histograms
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    print_header("Noise-Model Comparison Sweep");

    let device = if args.no_device {
        None
    } else {
        Some(args.device.clone())
    };

    let config = SweepConfig::new()
        .with_qubit_counts(args.qubits.clone())
        .with_shots(args.shots)
        .with_error_rate(args.error_rate)
        .with_noisy_gate(args.gate.clone())
        .with_device(device)
        .with_output_dir(args.output.clone());

    print_section("Configuration");
    print_result("Qubit counts", format!("{:?}", config.qubit_counts));
    print_result("Shots per run", config.shots);
    print_result("Error rate", config.error_rate);
    print_result("Noisy gate", &config.noisy_gate);
    print_result(
        "Device",
        config.device.as_deref().unwrap_or("none (ideal)"),
    );
    print_result("Output directory", config.output_dir.display());

    let backend = SimulatorBackend::new();
    let calibration = FileCalibrationSource::new(&args.calibration_dir);

    print_section("Running Sweep");
    print_info("Each qubit count runs five conditions: baseline, real, depolarizing, amplitude, phase");

    let summary = run_sweep(&config, &backend, &calibration).await?;

    print_section("Results");
    for n in &summary.completed {
        print_result(
            &format!("{n} qubits"),
            format!("test_{n}.csv, {n}qubits.txt"),
        );
    }
    for n in &summary.failed {
        print_result(&format!("{n} qubits"), "failed (see log)");
    }

    println!();
    if summary.failed.is_empty() {
        print_success("Noise sweep complete!");
    } else {
        print_info(&format!(
            "Sweep finished with {} of {} qubit counts completed",
            summary.completed.len(),
            summary.completed.len() + summary.failed.len()
        ));
    }

    Ok(())
}
