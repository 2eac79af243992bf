//! GMII bridge testbench CLI.
//!
//! This binary is the single entry point for bridge simulation runs. It
//! performs:
//! 1. **Flag parsing:** Waveform dump path, memory image path, configuration
//!    file, and run overrides.
//! 2. **Harness construction:** Builds the bridge model, binds every port to
//!    its signal, and attaches the requested observers.
//! 3. **Run and report:** Runs to quiescence or the cycle ceiling, closes the
//!    dump, and prints run statistics.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bridgesim_core::config::Config;
use bridgesim_core::{BenchError, Simulator, StopReason};

#[derive(Parser, Debug)]
#[command(
    name = "bridgesim",
    author,
    version,
    about = "Cycle-accurate testbench for a 4-port GMII Ethernet bridge",
    long_about = "Simulate the 4-port GMII Ethernet bridge to completion.\n\nWith no flags the bridge is clocked with no stimulus and quiesces after the settle window. Supply a memory image to inject frames and a dump path to record every signal as a VCD waveform.\n\nExamples:\n  bridgesim\n  bridgesim -d waves.vcd\n  bridgesim -i traffic.hex -d waves.vcd\n  bridgesim --config bench.json --cycles 50000"
)]
struct Cli {
    /// Write a VCD waveform dump of every harness signal to FILE.
    #[arg(short = 'd', long = "dump", value_name = "FILE")]
    dump: Option<PathBuf>,

    /// Load a hex memory image of frame records and inject them.
    #[arg(short = 'i', long = "image", value_name = "FILE")]
    image: Option<PathBuf>,

    /// Read testbench configuration from a JSON file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured cycle ceiling.
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise `--quiet` selects errors
/// only and the default is info.
fn init_logging(quiet: bool) {
    let fallback = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the harness from the flags, runs it to completion, and reports.
fn run(cli: Cli) -> Result<(), BenchError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            println!("[*] Configuration: {}", path.display());
            Config::from_json_file(path)?
        }
        None => {
            println!("[*] Configuration: default");
            Config::default()
        }
    };
    if let Some(cycles) = cli.cycles {
        config.run.max_cycles = cycles;
    }
    println!(
        "    Ports: {}  Clock: {} ns  Cycle limit: {}",
        config.bridge.ports, config.clock.period_ns, config.run.max_cycles
    );
    println!();

    let mut sim = Simulator::new(&config)?;

    if let Some(path) = cli.dump.as_deref() {
        println!("[*] Waveform dump: {}", path.display());
        sim.attach_tracer(path)?;
    }
    if let Some(path) = cli.image.as_deref() {
        let frames = sim.load_image(path)?;
        println!("[*] Memory image: {} ({} frames)", path.display(), frames);
    }

    let reason = sim.run_to_completion()?;
    sim.finish()?;

    match reason {
        StopReason::Quiescent => {
            println!("\n[*] Design quiesced after {} cycles", sim.cycle());
        }
        StopReason::CycleLimit => {
            println!("\n[*] Cycle limit reached at {} cycles", sim.cycle());
        }
    }
    sim.stats().print();
    Ok(())
}
