//! wavekernel CLI: batch waveform analysis for power-system signals.
//!
//! This is the main entry point for the waveform analysis tool.

mod config;
mod demo;
mod input;
mod orchestrator;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lib_dsp::CATALOG;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "wavekernel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an analysis job
    Run {
        /// Path to the job configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// List the available operations
    List,

    /// Write the built-in test signal as CSV
    Demo {
        /// Output file path
        #[arg(short, long, default_value = "signal.csv")]
        output: PathBuf,

        /// Write a balanced three-phase set instead
        #[arg(long)]
        three_phase: bool,

        /// Sample step in seconds
        #[arg(long, default_value = "1e-5")]
        step: f64,

        /// Signal duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Run { config, output } => {
            run_job(&config, &output, cli.format)?;
        }
        Commands::List => {
            list_operations(cli.format)?;
        }
        Commands::Demo { output, three_phase, step, duration } => {
            write_demo(&output, three_phase, step, duration)?;
        }
    }

    Ok(())
}

fn run_job(config_path: &Path, output_dir: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Loading configuration from {:?}", config_path);

    let config = config::load_config(config_path)?;
    let orchestrator = orchestrator::Orchestrator::new(config)?;

    tracing::info!("Starting job...");
    let results = orchestrator.run()?;

    // Create output directory
    std::fs::create_dir_all(output_dir)?;

    output::write_results(&results, output_dir, format)?;
    output::print_results(&results);

    tracing::info!("Job complete. Results written to {:?}", output_dir);
    Ok(())
}

fn list_operations(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Available operations ({}):\n", CATALOG.len());
            for info in CATALOG {
                let params = if info.parameters.is_empty() {
                    "-".to_string()
                } else {
                    info.parameters.join(", ")
                };
                println!(
                    "  {:<18} {:<32} channels={}  params: {}",
                    info.name, info.display_name, info.channels, params
                );
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = CATALOG
                .iter()
                .map(|info| {
                    serde_json::json!({
                        "kind": info.name,
                        "display_name": info.display_name,
                        "channels": info.channels,
                        "parameters": info.parameters,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Csv => {
            println!("kind,display_name,channels,parameters");
            for info in CATALOG {
                println!(
                    "{},\"{}\",{},{}",
                    info.name,
                    info.display_name,
                    info.channels,
                    info.parameters.join(";")
                );
            }
        }
    }
    Ok(())
}

fn write_demo(output: &Path, three_phase: bool, step: f64, duration: f64) -> Result<()> {
    let settings = demo::DemoSettings::new(step, duration)?;
    tracing::info!(
        "Generating {} demo signal: {} samples",
        if three_phase { "three-phase" } else { "single-phase" },
        settings.len()
    );

    let table = if three_phase {
        demo::three_phase_table(&settings)
    } else {
        demo::test_signal_table(&settings)
    };
    output::write_table(output, &table.headers, &table.columns)?;

    println!("Generated demo signal:");
    println!("  Samples:  {}", settings.len());
    println!("  Columns:  {}", table.headers.join(", "));
    println!("  Written to: {:?}", output);
    Ok(())
}
