//! SQL value formatting and batched INSERT document assembly.
//!
//! Embedded single quotes are escaped by doubling them according to SQL
//! standards; absent values become `NULL`, and an empty list is emitted as
//! `NULL`, never as an empty array constructor.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export::ExportError;
use crate::models::{FieldValue, Schema};

/// Records per INSERT statement.
pub const DEFAULT_BATCH_SIZE: usize = 50;

// Column names per line in the emitted INSERT header.
const COLUMNS_PER_LINE: usize = 6;

/// One typed value ready for SQL emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Flag(bool),
    Text(String),
    List(Vec<String>),
    /// An already-formatted SQL literal, passed through verbatim
    /// (re-projection pipeline)
    Raw(String),
}

impl SqlValue {
    /// Convert an extracted field value, collapsing empty lists to NULL.
    pub fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => SqlValue::Text(s.clone()),
            FieldValue::Flag(b) => SqlValue::Flag(*b),
            FieldValue::List(items) if items.is_empty() => SqlValue::Null,
            FieldValue::List(items) => SqlValue::List(items.clone()),
        }
    }

    /// Format as a SQL literal.
    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Flag(true) => "true".to_string(),
            SqlValue::Flag(false) => "false".to_string(),
            SqlValue::Text(s) => format!("'{}'", escape(s)),
            SqlValue::List(items) if items.is_empty() => "NULL".to_string(),
            SqlValue::List(items) => {
                let quoted: Vec<String> =
                    items.iter().map(|item| format!("'{}'", escape(item))).collect();
                format!("ARRAY[{}]", quoted.join(", "))
            }
            SqlValue::Raw(text) => text.clone(),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\'', "''")
}

/// Assembles the final SQL document from projected rows.
pub struct SqlEmitter {
    batch_size: usize,
}

impl Default for SqlEmitter {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SqlEmitter {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Build the complete output document: header comments, transaction
    /// frame, one INSERT statement per batch (each prefixed by a range
    /// comment), and the closing summary select.
    pub fn emit_document(&self, schema: &Schema, rows: &[Vec<SqlValue>]) -> String {
        let total = rows.len();
        let mut out = String::new();

        out.push_str("-- Complete medicine database\n");
        out.push_str("-- Generated medicine INSERT statements\n");
        out.push_str(&format!("-- Total medicines: {}\n\n", total));
        out.push_str("BEGIN;\n\n");

        for (batch_index, chunk) in rows.chunks(self.batch_size).enumerate() {
            let first = batch_index * self.batch_size + 1;
            let last = batch_index * self.batch_size + chunk.len();
            out.push_str(&format!(
                "-- Batch {}: medicines {} to {}\n",
                batch_index + 1,
                first,
                last
            ));
            out.push_str(&format!("INSERT INTO {} (\n", schema.table));
            out.push_str(&format_column_list(schema));
            out.push_str(") VALUES\n");

            for (i, row) in chunk.iter().enumerate() {
                let values: Vec<String> = row.iter().map(SqlValue::to_sql).collect();
                let terminator = if i + 1 == chunk.len() { ";" } else { "," };
                out.push_str(&format!("({}){}\n", values.join(", "), terminator));
            }
            out.push('\n');
        }

        out.push_str("COMMIT;\n\n");
        out.push_str("-- Success message\n");
        out.push_str(&format!(
            "SELECT 'Successfully inserted {} medicines!' as result;\n",
            total
        ));

        debug!(total, batches = rows.len().div_ceil(self.batch_size), "document assembled");
        out
    }

    /// Emit the document and write it to disk in one step, so a failed run
    /// never leaves a partial output file behind.
    pub fn write_document(
        &self,
        path: &Path,
        schema: &Schema,
        rows: &[Vec<SqlValue>],
    ) -> Result<(), ExportError> {
        if rows.is_empty() {
            return Err(ExportError::Empty);
        }
        let document = self.emit_document(schema, rows);
        std::fs::write(path, document)?;
        Ok(())
    }
}

fn format_column_list(schema: &Schema) -> String {
    let names = schema.column_names();
    let mut out = String::new();
    for (i, group) in names.chunks(COLUMNS_PER_LINE).enumerate() {
        out.push_str("    ");
        out.push_str(&group.join(", "));
        if (i + 1) * COLUMNS_PER_LINE < names.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out
}
