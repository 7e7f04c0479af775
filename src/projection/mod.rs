//! Column projection: remaps values from the source field order onto the
//! target schema order.
//!
//! The projector validates the schema against the source layout once, at
//! construction. A schema column whose source field does not exist in the
//! layout is a configuration error and must fail here, never mid-batch.

use thiserror::Error;
use tracing::debug;

use crate::export::SqlValue;
use crate::models::{Record, Schema, SchemaError, SourceLayout};

/// Per-record projection failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("expected {expected} positional values, got {got}")]
    Arity { expected: usize, got: usize },
}

/// Projects records and raw value lists onto a target schema.
#[derive(Debug)]
pub struct Projector {
    schema: Schema,
    /// Per target column, the position of its source field in the layout
    positions: Vec<usize>,
    source_len: usize,
}

impl Projector {
    /// Build a projector, failing fast on schema/layout mismatches.
    pub fn new(schema: Schema, source: &SourceLayout) -> Result<Self, SchemaError> {
        let mut positions = Vec::with_capacity(schema.columns.len());
        for spec in &schema.columns {
            match source.position(&spec.source) {
                Some(pos) => positions.push(pos),
                None => {
                    return Err(SchemaError::MissingSourceColumn {
                        column: spec.column.clone(),
                        source_name: spec.source.clone(),
                    });
                }
            }
        }
        debug!(
            columns = schema.columns.len(),
            source_columns = source.len(),
            "projector validated against source layout"
        );
        Ok(Self {
            schema,
            positions,
            source_len: source.len(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Project one extracted record into the target-ordered value sequence.
    ///
    /// Fields absent from the record are replaced by the column's declared
    /// default; a column with no default projects to NULL. Source fields not
    /// referenced by any column are never touched.
    pub fn project_record(&self, record: &Record) -> Vec<SqlValue> {
        self.schema
            .columns
            .iter()
            .map(|spec| match record.get(&spec.source) {
                Some(value) => SqlValue::from_field(value),
                None => spec
                    .default
                    .as_ref()
                    .map(SqlValue::from_field)
                    .unwrap_or(SqlValue::Null),
            })
            .collect()
    }

    /// Re-project a tokenized source tuple by position.
    ///
    /// Tokens are already SQL literals and pass through verbatim. A tuple
    /// whose arity disagrees with the source layout is refused outright;
    /// emitting a short tuple would misalign every following column.
    pub fn project_tokens(&self, tokens: &[String]) -> Result<Vec<SqlValue>, ProjectionError> {
        if tokens.len() != self.source_len {
            return Err(ProjectionError::Arity {
                expected: self.source_len,
                got: tokens.len(),
            });
        }
        Ok(self
            .positions
            .iter()
            .map(|&pos| SqlValue::Raw(tokens[pos].clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnSpec, FieldType, FieldValue};

    fn projector() -> Projector {
        Projector::new(Schema::medicine_master(), &SourceLayout::medicine_wide()).unwrap()
    }

    #[test]
    fn unknown_source_column_fails_at_construction() {
        let mut schema = Schema::medicine_master();
        schema.columns.push(ColumnSpec {
            column: "bogus".to_string(),
            source: "not_a_field".to_string(),
            field_type: FieldType::Text,
            default: None,
        });
        let err = Projector::new(schema, &SourceLayout::medicine_wide()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSourceColumn { .. }));
    }

    #[test]
    fn absent_fields_take_declared_defaults() {
        let mut record = Record::new();
        record.set("name", FieldValue::Text("Aspirin".to_string()));

        let row = projector().project_record(&record);
        // prescription_required defaults to true, controlled_substance to
        // false, is_active to true; everything else to NULL
        assert_eq!(row[0], SqlValue::Text("Aspirin".to_string()));
        assert_eq!(row[1], SqlValue::Null);
        assert_eq!(row[16], SqlValue::Flag(false));
        assert_eq!(row[17], SqlValue::Flag(true));
        assert_eq!(row[18], SqlValue::Flag(true));
    }

    #[test]
    fn rename_is_applied_by_source_lookup() {
        let mut record = Record::new();
        record.set("name", FieldValue::Text("X".to_string()));
        record.set(
            "drug_interactions",
            FieldValue::List(vec!["warfarin".to_string()]),
        );

        let row = projector().project_record(&record);
        // interactions is column 15 of the target schema
        assert_eq!(row[14], SqlValue::List(vec!["warfarin".to_string()]));
    }

    #[test]
    fn dropped_source_fields_are_never_referenced() {
        let mut record = Record::new();
        record.set("name", FieldValue::Text("X".to_string()));
        record.set(
            "warnings",
            FieldValue::List(vec!["not in target schema".to_string()]),
        );

        let row = projector().project_record(&record);
        assert_eq!(row.len(), 19);
        assert!(!row.contains(&SqlValue::List(vec![
            "not in target schema".to_string()
        ])));
    }

    #[test]
    fn token_projection_reorders_by_position() {
        let layout = SourceLayout::medicine_wide();
        let tokens: Vec<String> = layout
            .columns
            .iter()
            .map(|c| format!("'{}'", c.name))
            .collect();

        let row = projector().project_tokens(&tokens).unwrap();
        assert_eq!(row.len(), 19);
        assert_eq!(row[0], SqlValue::Raw("'name'".to_string()));
        // interactions draws from drug_interactions, position 16
        assert_eq!(row[14], SqlValue::Raw("'drug_interactions'".to_string()));
        assert_eq!(row[18], SqlValue::Raw("'is_active'".to_string()));
    }

    #[test]
    fn short_tuple_never_yields_partial_output() {
        let tokens = vec!["'a'".to_string(), "'b'".to_string()];
        assert_eq!(
            projector().project_tokens(&tokens),
            Err(ProjectionError::Arity {
                expected: 29,
                got: 2
            })
        );
    }
}
