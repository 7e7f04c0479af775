//! Import functionality
//!
//! Two source formats feed the pipeline:
//! - embedded literal-object sections (`objects`), and
//! - an existing wide INSERT statement (`inserts`), re-tokenized by the
//!   positional value tokenizer (`values`).

pub mod inserts;
pub mod objects;
pub mod values;

use crate::models::{Record, SchemaError};
use values::TokenizeError;

/// Result of extracting records from a literal-object source.
#[derive(Debug)]
pub struct ExtractResult {
    /// Records that carried a usable `name` field
    pub records: Vec<Record>,
    /// Blocks dropped for lacking a name (malformed or placeholder entries)
    pub skipped: usize,
}

/// Result of re-tokenizing an existing INSERT statement.
#[derive(Debug)]
pub struct ReshapeResult {
    /// Token lists, one per surviving value tuple, in source order
    pub tuples: Vec<Vec<String>>,
    /// Tuples dropped for arity mismatch or malformed values
    pub skipped: usize,
    /// Per-tuple failures; these never abort the run
    pub errors: Vec<ImportError>,
}

/// Error during import.
///
/// File-level failures (`NoSections`, `NoInsertHeader`, `Layout`) abort the
/// whole run before any output is produced. `MalformedTuple` is a per-record
/// failure recorded in [`ReshapeResult::errors`] while the run continues.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("no record sections found in source")]
    NoSections,
    #[error("no INSERT header found in source")]
    NoInsertHeader,
    #[error(transparent)]
    Layout(#[from] SchemaError),
    #[error("value tuple {index}: {source}")]
    MalformedTuple {
        index: usize,
        #[source]
        source: TokenizeError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Re-export for convenience
pub use inserts::InsertReader;
pub use objects::RecordExtractor;
