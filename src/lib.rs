//! medsql - converts embedded medicine record literals into SQL inserts
//!
//! Provides two pipelines over the same core primitives:
//! - `extract`: locate object literals in a source document, project them
//!   onto the `medicine_master` schema and emit batched INSERT statements
//! - `reshape`: re-tokenize an existing wide INSERT statement and re-project
//!   its tuples onto the target schema
//!
//! The core is the positional value tokenizer (`import::values`) and the
//! column projector (`projection`); everything else is glue around them.

pub mod cli;
pub mod export;
pub mod import;
pub mod models;
pub mod projection;

// Re-export commonly used types
pub use export::{ExportError, SqlEmitter, SqlValue};
pub use import::inserts::InsertReader;
pub use import::objects::RecordExtractor;
pub use import::values::{TokenizeError, split_values};
pub use import::{ExtractResult, ImportError, ReshapeResult};
pub use models::{
    ColumnSpec, FieldType, FieldValue, Record, Schema, SchemaError, SourceColumn, SourceLayout,
};
pub use projection::{ProjectionError, Projector};
