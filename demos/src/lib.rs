//! qnoise Demo Suite
//!
//! This crate drives the noise-comparison experiments:
//!
//! - **Grover's Search**: circuit generators for the marked-state search
//!   and the diffusion-only variant used by the sweep
//! - **Noise Sweep**: runs one circuit under five noise conditions
//!   (ideal, device-calibrated, depolarizing, amplitude damping, phase
//!   damping) and writes CSV tables plus text histograms
//!
//! # Example
//!
//! ```ignore
//! use qnoise_adapter_sim::SimulatorBackend;
//! use qnoise_demos::runners::noise_sweep::{SweepConfig, run_sweep};
//! use qnoise_hal::FileCalibrationSource;
//!
//! let backend = SimulatorBackend::new();
//! let calibration = FileCalibrationSource::new("demos/calibration");
//! let summary = run_sweep(&SweepConfig::default(), &backend, &calibration).await?;
//! println!("wrote {} result sets", summary.completed.len());
//! ```

pub mod circuits;
pub mod report;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}
