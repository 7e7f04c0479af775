//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportError;
use crate::import::ImportError;
use crate::models::SchemaError;

/// Errors surfaced by the CLI commands.
///
/// All of these abort the run before any output file is written.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),
    #[error("failed to read {0}: {1}")]
    FileReadError(PathBuf, String),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("schema configuration error: {0}")]
    Schema(#[from] SchemaError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
