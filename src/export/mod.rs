//! Export functionality
//!
//! Formats projected values as SQL literals and assembles the batched
//! INSERT document.

pub mod sql;

/// Error during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to emit: no records survived import")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Re-export for convenience
pub use sql::{SqlEmitter, SqlValue};
