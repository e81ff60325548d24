//! qrmap CLI - route circuits onto device topologies.
//!
//! Provides commands for:
//! - Routing a circuit file onto a named topology
//! - Routing a generated random circuit (quick experiments)

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn, Level};

use qrmap_core::prelude::*;
use qrmap_route::apply_routing;

/// qrmap - connectivity-aware circuit routing
///
/// Compiles a circuit so that every two-qubit gate acts on an edge of the
/// device graph, by choosing an initial placement and inserting SWAPs.
#[derive(Parser)]
#[command(name = "qrmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Directory for the routing log file
    #[arg(long, global = true, default_value = "log")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a circuit file (JSON) onto a device topology
    Route {
        /// Path to the circuit JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Device topology (linear, ring, grid, full)
        #[arg(short, long, default_value = "linear")]
        topology: String,

        /// Number of device nodes (defaults to the circuit's qubit count)
        #[arg(short, long)]
        nodes: Option<usize>,

        /// Placement strategy (basic, random, majority, max_pairs)
        #[arg(short, long, default_value = "max_pairs")]
        strategy: String,

        /// Lookahead window size
        #[arg(short, long, default_value = "10")]
        lookahead: usize,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Write the routed circuit to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Route a randomly generated circuit
    Random {
        /// Number of qubits
        #[arg(short = 'q', long, default_value = "6")]
        qubits: usize,

        /// Number of gates
        #[arg(short = 'g', long, default_value = "30")]
        gates: usize,

        /// Device topology (linear, ring, grid, full)
        #[arg(short, long, default_value = "grid")]
        topology: String,

        /// Placement strategy (basic, random, majority, max_pairs)
        #[arg(short, long, default_value = "max_pairs")]
        strategy: String,

        /// RNG seed for both generation and routing
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_dir, cli.verbose)?;

    match cli.command {
        Commands::Route {
            input,
            topology,
            nodes,
            strategy,
            lookahead,
            seed,
            output,
        } => cmd_route(
            &input,
            &topology,
            nodes,
            &strategy,
            lookahead,
            seed,
            output.as_deref(),
            cli.format,
        ),
        Commands::Random {
            qubits,
            gates,
            topology,
            strategy,
            seed,
        } => cmd_random(qubits, gates, &topology, &strategy, seed, cli.format),
    }
}

/// Routes one decision log per invocation into
/// `<log_dir>/routing_transformation_<timestamp>.log`.
fn init_logging(log_dir: &PathBuf, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let path = log_dir.join(format!("routing_transformation_{}.log", stamp));
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init();

    Ok(())
}

/// Builds a device topology by name.
fn build_topology(name: &str, nodes: usize) -> Topology {
    match name {
        "linear" => Topology::linear(nodes),
        "ring" => Topology::ring(nodes),
        "grid" => {
            let side = (nodes as f64).sqrt().ceil() as usize;
            Topology::grid(side, side)
        }
        "full" | "all-to-all" => Topology::all_to_all(nodes),
        _ => {
            warn!("unknown topology '{}', using linear", name);
            Topology::linear(nodes)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_route(
    input: &PathBuf,
    topology_name: &str,
    nodes: Option<usize>,
    strategy: &str,
    lookahead: usize,
    seed: Option<u64>,
    output: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    let start = Instant::now();

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read circuit file: {}", input.display()))?;
    let circuit: Circuit =
        serde_json::from_str(&content).with_context(|| "failed to parse circuit JSON")?;

    info!(
        "parsed circuit: {} qubits, {} gates",
        circuit.num_qubits,
        circuit.gate_count()
    );

    let nodes = nodes.unwrap_or(circuit.num_qubits);
    let topology = build_topology(topology_name, nodes);

    let config = RoutingConfig {
        strategy: strategy.to_string(),
        lookahead,
        rng_seed: seed,
    };
    let routed = apply_routing(&circuit, &topology, &config)
        .with_context(|| "routing failed")?;

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&routed.circuit)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write routed circuit to {}", path.display()))?;
    }

    let result = RunResult {
        input_file: Some(input.display().to_string()),
        topology: topology_name.to_string(),
        strategy: strategy.to_string(),
        num_qubits: routed.num_qubits,
        original_gates: circuit.gate_count(),
        routed_gates: routed.circuit.gate_count(),
        swap_count: routed.swap_count,
        circuit_depth: routed.circuit.depth(),
        initial_l2p: routed.initial_placement.l2p().to_vec(),
        final_l2p: routed.final_placement.l2p().to_vec(),
        total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    print_result(&result, format)
}

fn cmd_random(
    qubits: usize,
    gates: usize,
    topology_name: &str,
    strategy: &str,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let start = Instant::now();

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let circuit = random_circuit(qubits, gates, &mut rng)?;
    info!(
        "generated random circuit: {} qubits, {} gates",
        qubits, gates
    );

    let topology = build_topology(topology_name, qubits);
    let config = RoutingConfig {
        strategy: strategy.to_string(),
        lookahead: 10,
        rng_seed: Some(rng.gen()),
    };
    let routed = apply_routing(&circuit, &topology, &config)
        .with_context(|| "routing failed")?;

    let result = RunResult {
        input_file: None,
        topology: topology_name.to_string(),
        strategy: strategy.to_string(),
        num_qubits: routed.num_qubits,
        original_gates: circuit.gate_count(),
        routed_gates: routed.circuit.gate_count(),
        swap_count: routed.swap_count,
        circuit_depth: routed.circuit.depth(),
        initial_l2p: routed.initial_placement.l2p().to_vec(),
        final_l2p: routed.final_placement.l2p().to_vec(),
        total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    print_result(&result, format)
}

/// Generates a mixed single/two-qubit circuit for quick experiments.
fn random_circuit(qubits: usize, gates: usize, rng: &mut StdRng) -> Result<Circuit> {
    anyhow::ensure!(qubits >= 2, "random circuits need at least two qubits");

    let mut circuit = Circuit::with_capacity(qubits, gates);
    for _ in 0..gates {
        let q = rng.gen_range(0..qubits);
        let gate = match rng.gen_range(0..5) {
            0 => Gate::H(q),
            1 => Gate::Rz(q, rng.gen_range(0.0..std::f64::consts::TAU)),
            2 => Gate::X(q),
            _ => {
                let mut t = rng.gen_range(0..qubits);
                while t == q {
                    t = rng.gen_range(0..qubits);
                }
                if rng.gen_bool(0.5) {
                    Gate::CNOT(q, t)
                } else {
                    Gate::CZ(q, t)
                }
            }
        };
        circuit.add_gate(gate)?;
    }
    Ok(circuit)
}

fn print_result(result: &RunResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("\n=== qrmap Route Result ===");
            if let Some(input) = &result.input_file {
                println!("Input:      {}", input);
            }
            println!("Topology:   {}", result.topology);
            println!("Strategy:   {}", result.strategy);
            println!("Qubits:     {}", result.num_qubits);
            println!();
            println!("Parsed:     {} gates", result.original_gates);
            println!("Routed:     {} gates", result.routed_gates);
            println!("SWAPs:      {}", result.swap_count);
            println!("Depth:      {}", result.circuit_depth);
            println!();
            println!("Initial placement: {:?}", result.initial_l2p);
            println!("Final placement:   {:?}", result.final_l2p);
            println!();
            println!("Time:       {:.2} ms", result.total_time_ms);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct RunResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    input_file: Option<String>,
    topology: String,
    strategy: String,
    num_qubits: usize,
    original_gates: usize,
    routed_gates: usize,
    swap_count: usize,
    circuit_depth: usize,
    initial_l2p: Vec<usize>,
    final_l2p: Vec<usize>,
    total_time_ms: f64,
}
