//! Data models: records extracted from source text and the target schema
//! they are projected onto.

pub mod record;
pub mod schema;

pub use record::{FieldValue, Record};
pub use schema::{ColumnSpec, FieldType, Schema, SchemaError, SourceColumn, SourceLayout};
