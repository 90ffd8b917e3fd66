//! Parquet inspection CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::*;

/// Parquet file inspector
#[derive(Parser)]
#[command(name = "parq")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Show file and footer summary
    Inspect(InspectCommand),

    /// Show the column schema
    Schema(SchemaCommand),

    /// Dump records as JSON lines
    Cat(CatCommand),

    /// Dump the raw Thrift structure of the footer
    Footer(FooterCommand),
}

/// Output format
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect(cmd) => cmd.execute(cli.output)?,
        Commands::Schema(cmd) => cmd.execute(cli.output)?,
        Commands::Cat(cmd) => cmd.execute()?,
        Commands::Footer(cmd) => cmd.execute()?,
    }

    Ok(())
}
