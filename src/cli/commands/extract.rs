//! `extract` command: literal-object source to SQL document

use std::path::PathBuf;

use tracing::info;

use crate::cli::commands::{load_input, load_schema};
use crate::cli::error::CliError;
use crate::cli::output::{self, RunSummary};
use crate::export::SqlEmitter;
use crate::import::objects::RecordExtractor;
use crate::models::SourceLayout;
use crate::projection::Projector;

/// Arguments for the `extract` command
pub struct ExtractArgs {
    /// Source file containing the record arrays
    pub input: PathBuf,
    /// Output SQL file
    pub output: PathBuf,
    /// Optional target schema configuration (JSON)
    pub schema: Option<PathBuf>,
}

/// Handle the `extract` command
pub fn handle_extract(args: &ExtractArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;
    let schema = load_schema(args.schema.as_deref())?;
    let layout = SourceLayout::medicine_wide();

    // Schema/layout mismatches must surface before any record work
    let projector = Projector::new(schema, &layout)?;
    let extractor = RecordExtractor::new(&layout);

    let result = extractor.extract(&content)?;
    info!(
        records = result.records.len(),
        skipped = result.skipped,
        "extraction complete"
    );

    let rows: Vec<_> = result
        .records
        .iter()
        .map(|record| projector.project_record(record))
        .collect();

    SqlEmitter::default().write_document(&args.output, projector.schema(), &rows)?;

    let summary = RunSummary {
        found: result.records.len() + result.skipped,
        emitted: rows.len(),
        skipped: result.skipped,
    };
    println!("{}", output::format_run_summary(&summary, &args.output, &[]));
    Ok(())
}
