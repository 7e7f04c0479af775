//! medsql command-line interface

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medsql::cli::commands::extract::{ExtractArgs, handle_extract};
use medsql::cli::commands::reshape::{ReshapeArgs, handle_reshape};

#[derive(Parser)]
#[command(
    name = "medsql",
    version,
    about = "Converts embedded medicine record literals into batched SQL INSERT statements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract object literals from a source file and generate INSERT
    /// statements
    Extract {
        /// Source file containing the record arrays
        #[arg(long, default_value = "import_medicines_no_duplicates.mjs")]
        input: PathBuf,
        /// Output SQL file
        #[arg(long, default_value = "insert-all-medicines.sql")]
        output: PathBuf,
        /// Target schema configuration (JSON); defaults to the built-in
        /// medicine_master schema
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Re-project an existing wide INSERT statement onto the target schema
    Reshape {
        /// Source file containing the wide INSERT statement
        #[arg(long, default_value = "medicine_master_1000plus.sql")]
        input: PathBuf,
        /// Output SQL file
        #[arg(long, default_value = "medicine_master_1000plus_fixed.sql")]
        output: PathBuf,
        /// Target schema configuration (JSON); defaults to the built-in
        /// medicine_master schema
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract {
            input,
            output,
            schema,
        } => handle_extract(&ExtractArgs {
            input,
            output,
            schema,
        })?,
        Commands::Reshape {
            input,
            output,
            schema,
        } => handle_reshape(&ReshapeArgs {
            input,
            output,
            schema,
        })?,
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
