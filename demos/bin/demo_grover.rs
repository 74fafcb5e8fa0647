//! Grover's Search Algorithm Demo
//!
//! Builds a Grover search circuit for a marked state and runs it on the
//! local simulator, optionally with a uniform noise channel attached.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qnoise_adapter_sim::SimulatorBackend;
use qnoise_demos::circuits::grover::{grover_circuit, optimal_iterations};
use qnoise_demos::{print_header, print_result, print_section, print_success};
use qnoise_hal::{Backend, RunSpec};
use qnoise_ir::{ErrorChannel, NoiseModel};

#[derive(Parser, Debug)]
#[command(name = "demo-grover")]
#[command(about = "Demonstrate Grover's search algorithm")]
struct Args {
    /// Number of qubits (search space size = 2^n)
    #[arg(short = 'n', long, default_value = "2")]
    qubits: u32,

    /// Marked state to search for (0 to 2^n - 1)
    #[arg(short, long, default_value = "3")]
    marked: usize,

    /// Number of Grover iterations (0 = optimal)
    #[arg(short, long, default_value = "0")]
    iterations: usize,

    /// Shots to run
    #[arg(short, long, default_value = "2048")]
    shots: u32,

    /// Depolarizing error rate on the h gate (0 = noiseless)
    #[arg(short, long, default_value = "0")]
    error_rate: f64,

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

    print_header("Grover's Search Algorithm Demo");

    let iterations = if args.iterations == 0 {
        optimal_iterations(args.qubits)
    } else {
        args.iterations
    };

    print_section("Problem Setup");
    print_result("Qubits", args.qubits);
    print_result("Search space size", 1u64 << args.qubits);
    print_result(
        "Marked state",
        format!(
            "|{}⟩ = |{:0width$b}⟩",
            args.marked,
            args.marked,
            width = args.qubits as usize
        ),
    );
    print_result("Grover iterations", iterations);
    print_result("Shots", args.shots);

    print_section("Circuit Generation");
    let circuit = grover_circuit(args.qubits, args.marked, iterations)?;
    print_result("Circuit depth", circuit.depth());
    print_result("Operations", circuit.num_ops());

    print_section("Execution");
    let backend = SimulatorBackend::new();
    let mut spec = RunSpec::new(args.shots);
    if args.error_rate > 0.0 {
        spec = spec.with_noise(NoiseModel::uniform(
            "h",
            ErrorChannel::depolarizing(args.error_rate)?,
        ));
        print_result("Noise", format!("depolarizing(p={})", args.error_rate));
    }

    let job_id = backend.submit(&circuit, &spec).await?;
    let result = backend.wait(&job_id).await?;

    print_section("Measured Distribution");
    for (bitstring, count) in result.counts.sorted().into_iter().take(8) {
        let prob = *count as f64 / f64::from(args.shots);
        print_result(
            &format!("|{bitstring}⟩"),
            format!("{count} ({:.1}%)", prob * 100.0),
        );
    }

    if let Some((most, prob)) = result.most_frequent() {
        let expected = format!("{:0width$b}", args.marked, width = args.qubits as usize);
        println!();
        if *most == expected {
            print_success(&format!(
                "Found marked state |{most}⟩ with probability {:.1}%",
                prob * 100.0
            ));
        } else {
            print_result("Most frequent", format!("|{most}⟩ (expected |{expected}⟩)"));
        }
    }

    Ok(())
}
