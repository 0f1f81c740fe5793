//! Merton CLI binary.
//!
//! Computes the optimal equity allocation from saved input series.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{AllocationArgs, InputArgs, OutputFormat};

#[derive(Parser)]
#[command(name = "merton")]
#[command(about = "Optimal equity allocation from the Merton share", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest allocation
    Allocate {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        params: AllocationArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write the full historical table as CSV
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        params: AllocationArgs,

        /// Destination CSV file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Allocate {
            inputs,
            params,
            format,
        } => cmd::allocate::run(&inputs, &params, format),
        Commands::Export {
            inputs,
            params,
            output,
        } => cmd::export::run(&inputs, &params, &output),
    }
}
