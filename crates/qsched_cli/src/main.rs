//! qsched - braided surface-code scheduler CLI
//!
//! Schedules a circuit against a square lattice of physical qubits and
//! reports cycle count, resource utilization, and diagnostics.

mod loader;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use qsched_core::{Lattice, SchedulerConfig};
use qsched_engine::{recursive_bisect_placement, run, snake_placement, CircuitSource, Graph, GreedyPartitioner};

use loader::TextCircuit;

/// qsched - cycle-accurate scheduler for braided surface-code circuits.
#[derive(Parser)]
#[command(name = "qsched")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a circuit file (one gate per line; see loader docs)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Surface-code distance
    #[arg(short = 'd', long, default_value = "33")]
    distance: u32,

    /// Target logical error rate, as PL = -log10(P_L) (overrides --distance
    /// when --distance was left at its default)
    #[arg(short = 'p', long = "logPL")]
    log_pl: Option<f64>,

    /// Wall-clock duration of one cycle, in microseconds
    #[arg(short = 't', long = "cycle-time", default_value = "2.2")]
    cycle_time: f64,

    /// Fraction of stuck gates that triggers the SWAP optimizer
    #[arg(long, default_value = "0.10")]
    swap_threshold: f64,

    /// Maximum consecutive SWAP-only layers before forcing progress
    #[arg(long, default_value = "10")]
    max_swaps: u32,

    /// Run recursive-bisection initial placement before scheduling
    #[arg(long)]
    init_place: bool,

    /// Run the SWAP-insertion placement optimizer during scheduling
    #[arg(long)]
    swap_opt: bool,

    /// Double two-qubit gate cost, as in a QFT's phase rotations
    #[arg(long)]
    qft: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    let start = Instant::now();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read circuit file: {}", cli.input.display()))?;
    let circuit = TextCircuit::parse(&text).with_context(|| "failed to parse circuit")?;

    info!(
        num_qubits = circuit.num_qubits(),
        num_gates = circuit.gates().len(),
        "loaded circuit"
    );

    let mut config = SchedulerConfig {
        distance: cli.distance,
        target_log_pl: cli.log_pl,
        cycle_time_us: cli.cycle_time,
        swap_threshold: cli.swap_threshold,
        max_consecutive_swap_layers: cli.max_swaps,
        qft: cli.qft,
        init_placement: cli.init_place,
        swap_optimizer: cli.swap_opt,
    };
    config.validate().with_context(|| "invalid configuration")?;

    let side = lattice_side_for(circuit.num_qubits());
    let mut lattice = Lattice::new(side);

    if config.init_placement {
        let coupling = coupling_graph(&circuit);
        let placement = if is_line_coupling(&coupling) {
            info!("coupling graph is a line; using snake placement");
            snake_placement(&Lattice::new(side))
        } else {
            info!("running recursive-bisection initial placement");
            recursive_bisect_placement(&coupling, side, &GreedyPartitioner)
        };
        lattice = Lattice::with_placement(side, placement);
    }

    info!("starting scheduling loop");
    let report = run(&circuit, &mut lattice, &config);

    let elapsed_us = start.elapsed().as_secs_f64() * 1_000_000.0;
    let runtime_us = report.total_cycles as f64 * config.cycle_time_us;
    let distance = config.resolved_distance();

    match cli.format {
        OutputFormat::Text => print_text_report(&cli, &circuit, &lattice, &report, elapsed_us, runtime_us, distance),
        OutputFormat::Json => print_json_report(&cli, &circuit, &lattice, &report, elapsed_us, runtime_us, distance)?,
    }

    Ok(())
}

fn lattice_side_for(num_qubits: usize) -> usize {
    ((num_qubits as f64).sqrt().ceil() as usize).max(1)
}

fn coupling_graph(circuit: &TextCircuit) -> Graph {
    let mut graph = Graph::new(circuit.num_qubits());
    for gate in circuit.gates() {
        if !gate.is_single() {
            graph.add_edge(gate.control, gate.target);
        }
    }
    graph
}

/// True when `graph` is a single simple path (every vertex has degree `<=
/// 2`, exactly two degree-1 endpoints, and no cycles) — the coupling shape
/// [`snake_placement`] is built for.
fn is_line_coupling(graph: &Graph) -> bool {
    let n = graph.num_vertices();
    if n <= 1 {
        return true;
    }
    if graph.vertices().any(|v| graph.degree(v) > 2) {
        return false;
    }
    let endpoints = graph.vertices().filter(|&v| graph.degree(v) == 1).count();
    endpoints == 2 && graph.num_edges() == n - 1
}

/// Maslov's closed-form QFT cost bound on a line, used only as a reference
/// figure when `--qft` is set: `h_cost + (2q - 3) * (cx_cost + swap_cost)`.
fn maslov_bound(num_qubits: usize, distance: u32) -> u64 {
    let h_cost = qsched_core::cost("h", distance, false);
    let cx_cost = qsched_core::cost("cx", distance, true);
    let swap_cost = qsched_core::cost("swap", distance, false);
    let q = num_qubits as u64;
    h_cost + (2 * q).saturating_sub(3) * (cx_cost + swap_cost)
}

#[allow(clippy::too_many_arguments)]
fn print_text_report(
    cli: &Cli,
    circuit: &TextCircuit,
    lattice: &Lattice,
    report: &qsched_engine::ScheduleReport,
    elapsed_us: f64,
    runtime_us: f64,
    distance: u32,
) {
    println!("time taken: {elapsed_us:.2} microseconds");
    if cli.swap_opt {
        println!("number of swap layers inserted: {}", report.swaps_inserted);
    }
    println!("num qubits: {}", circuit.num_qubits());
    println!("num gates: {}", circuit.gates().len());
    println!("lattice length: {}", lattice.length());
    println!("surface code distance: {distance}");
    println!(
        "logical error rate (-log(PL)): {:.4}",
        qsched_core::distance_to_logpl(distance)
    );
    println!("resource utilization: {:.4}", report.average_utilization());
    println!("scheduled circuit runtime: {} cycles", report.total_cycles);
    println!("scheduled circuit runtime: {runtime_us:.2} microseconds");
    if cli.qft {
        println!(
            "Maslov QFT bound: {} cycles",
            maslov_bound(circuit.num_qubits(), distance)
        );
    }
}

#[derive(serde::Serialize)]
struct JsonReport {
    input: String,
    num_qubits: usize,
    num_gates: usize,
    lattice_length: usize,
    distance: u32,
    logical_error_rate_neg_log_pl: f64,
    total_cycles: u64,
    gates_executed: usize,
    swaps_inserted: usize,
    average_utilization: f64,
    elapsed_us: f64,
    runtime_us: f64,
    maslov_bound_cycles: Option<u64>,
}

fn print_json_report(
    cli: &Cli,
    circuit: &TextCircuit,
    lattice: &Lattice,
    report: &qsched_engine::ScheduleReport,
    elapsed_us: f64,
    runtime_us: f64,
    distance: u32,
) -> Result<()> {
    let json = JsonReport {
        input: cli.input.display().to_string(),
        num_qubits: circuit.num_qubits(),
        num_gates: circuit.gates().len(),
        lattice_length: lattice.length(),
        distance,
        logical_error_rate_neg_log_pl: qsched_core::distance_to_logpl(distance),
        total_cycles: report.total_cycles,
        gates_executed: report.gates_executed,
        swaps_inserted: report.swaps_inserted,
        average_utilization: report.average_utilization(),
        elapsed_us,
        runtime_us,
        maslov_bound_cycles: cli.qft.then(|| maslov_bound(circuit.num_qubits(), distance)),
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
