//! # gyre — The Bench of GYRE
//!
//! Small CLI over the ring buffer crates.
//!
//! - `gyre run <SCRIPT> [--dump]` — Replay a TOML script and print the final state as JSON.
//! - `gyre tail --bytes <N> [--backing <FILE>]` — Keep the last N bytes of stdin.
//! - `gyre verify` — Run Kani proofs.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod script;
mod tail;

/// GYRE — a fixed-capacity ring buffer with pluggable storage and overwrite policy.
#[derive(Parser)]
#[command(name = "gyre", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a ring script and report the final state.
    Run {
        /// Path to the TOML script.
        script: PathBuf,

        /// Print a slot diagram to stderr after every step.
        #[arg(long)]
        dump: bool,
    },

    /// Copy stdin to stdout, keeping only the last N bytes.
    Tail {
        /// Ring capacity in bytes.
        #[arg(long)]
        bytes: usize,

        /// Memory-map the ring slots onto this file instead of the heap.
        #[arg(long)]
        backing: Option<PathBuf>,
    },

    /// Run Kani formal verification proofs.
    Verify,
}

/// Crates whose Kani harnesses `gyre verify` runs.
const PROOF_PACKAGES: [&str; 2] = ["gyre-verify", "gyre-core"];

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "gyre=info,gyre_io=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { script, dump } => {
            let parsed = script::Script::load(&script)?;
            tracing::info!(
                script = %script.display(),
                capacity = parsed.capacity,
                policy = %parsed.policy,
                steps = parsed.steps.len(),
                "running script"
            );

            let stderr = std::io::stderr();
            let mut dump_out = stderr.lock();
            let sink: Option<&mut dyn Write> = if dump { Some(&mut dump_out) } else { None };
            let report = script::run(&parsed, sink)?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
            writeln!(out)?;
        }

        Commands::Tail { bytes, backing } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            tail::run(bytes, backing.as_deref(), &mut stdin.lock(), &mut stdout.lock())?;
        }

        Commands::Verify => {
            eprintln!("GYRE: Running formal verification...");
            eprintln!("   Tool: Kani Model Checker");
            eprintln!("   Targets: {}", PROOF_PACKAGES.join(", "));
            eprintln!();

            let mut failed = Vec::new();
            for package in PROOF_PACKAGES {
                let status = Command::new("cargo")
                    .args(["kani", "--package", package])
                    .status()
                    .context("failed to launch cargo kani (install with: cargo install kani-verifier && cargo kani setup)")?;

                if status.success() {
                    eprintln!("   {}: ALL PROOFS PASSED", package);
                } else {
                    eprintln!("   {}: PROOF FAILURE", package);
                    failed.push(package);
                }
            }

            if !failed.is_empty() {
                bail!("verification incomplete: {} failed", failed.join(", "));
            }
            eprintln!();
            eprintln!("GYRE: VERIFICATION COMPLETE.");
        }
    }

    Ok(())
}
