//! `reshape` command: re-project an existing wide INSERT onto the target
//! schema

use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::commands::{load_input, load_schema};
use crate::cli::error::CliError;
use crate::cli::output::{self, RunSummary};
use crate::export::SqlEmitter;
use crate::import::inserts::InsertReader;
use crate::models::SourceLayout;
use crate::projection::Projector;

/// Arguments for the `reshape` command
pub struct ReshapeArgs {
    /// Source file containing the wide INSERT statement
    pub input: PathBuf,
    /// Output SQL file
    pub output: PathBuf,
    /// Optional target schema configuration (JSON)
    pub schema: Option<PathBuf>,
}

/// Handle the `reshape` command
pub fn handle_reshape(args: &ReshapeArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;
    let schema = load_schema(args.schema.as_deref())?;
    let layout = SourceLayout::medicine_wide();

    let projector = Projector::new(schema, &layout)?;
    let reader = InsertReader::new(layout);

    let result = reader.read(&content)?;
    info!(
        tuples = result.tuples.len(),
        skipped = result.skipped,
        "re-tokenization complete"
    );

    let mut rows = Vec::with_capacity(result.tuples.len());
    let mut skipped = result.skipped;
    for tokens in &result.tuples {
        match projector.project_tokens(tokens) {
            Ok(row) => rows.push(row),
            Err(e) => {
                // Arity is already checked by the reader; refuse the tuple
                // rather than emit a misaligned row if it happens anyway.
                warn!(error = %e, "dropping tuple at projection");
                skipped += 1;
            }
        }
    }

    SqlEmitter::default().write_document(&args.output, projector.schema(), &rows)?;

    let summary = RunSummary {
        found: result.tuples.len() + result.skipped,
        emitted: rows.len(),
        skipped,
    };
    println!(
        "{}",
        output::format_run_summary(&summary, &args.output, &result.errors)
    );
    Ok(())
}
