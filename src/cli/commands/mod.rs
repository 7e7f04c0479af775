//! CLI command implementations

pub mod extract;
pub mod reshape;

use std::path::Path;

use crate::cli::error::CliError;
use crate::models::Schema;

/// Load input content from a file, refusing to proceed if it is missing.
pub(crate) fn load_input(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::MissingInput(path.to_path_buf()));
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))
}

/// Load the target schema: a JSON configuration file if given, otherwise the
/// built-in `medicine_master` schema.
pub(crate) fn load_schema(path: Option<&Path>) -> Result<Schema, CliError> {
    match path {
        Some(p) => {
            let content = load_input(p)?;
            Ok(Schema::from_json(&content)?)
        }
        None => Ok(Schema::medicine_master()),
    }
}
