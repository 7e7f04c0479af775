//! Target schema and source layout configuration.
//!
//! The schema is immutable configuration, not something derived from the
//! data: an ordered list of [`ColumnSpec`] entries, each naming the target
//! column, the source field it draws from, its semantic type, and the
//! default substituted when the source field is absent. Renames (e.g. source
//! `drug_interactions` feeding target `interactions`) are explicit per
//! column; dropped source fields are simply never referenced.

use serde::{Deserialize, Serialize};

use super::record::FieldValue;

/// Semantic type of a field/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Optional string (absent => NULL)
    Text,
    /// Optional boolean (absent => declared default)
    Flag,
    /// Optional ordered list of strings (absent or empty => NULL)
    List,
}

/// Error in the schema/source-layout configuration.
///
/// These are configuration errors, not per-record errors: they must surface
/// once at startup, before any record is projected.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema column `{column}` draws from `{source_name}`, which is not in the source layout")]
    MissingSourceColumn { column: String, source_name: String },
    #[error("declared column list has {found} columns, source layout expects {expected}")]
    LayoutArityMismatch { expected: usize, found: usize },
    #[error("declared column {index} is `{found}`, source layout expects `{expected}`")]
    LayoutColumnMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("invalid schema configuration: {0}")]
    Config(String),
}

/// One target schema entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSpec {
    /// Target column name
    pub column: String,
    /// Source field name this column draws from (usually the same name)
    pub source: String,
    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value substituted when the source field is absent; `None` means NULL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl ColumnSpec {
    fn text(name: &str) -> Self {
        Self {
            column: name.to_string(),
            source: name.to_string(),
            field_type: FieldType::Text,
            default: None,
        }
    }

    fn list(name: &str) -> Self {
        Self {
            column: name.to_string(),
            source: name.to_string(),
            field_type: FieldType::List,
            default: None,
        }
    }

    fn list_from(column: &str, source: &str) -> Self {
        Self {
            column: column.to_string(),
            source: source.to_string(),
            field_type: FieldType::List,
            default: None,
        }
    }

    fn flag(name: &str, default: bool) -> Self {
        Self {
            column: name.to_string(),
            source: name.to_string(),
            field_type: FieldType::Flag,
            default: Some(FieldValue::Flag(default)),
        }
    }
}

/// The ordered, typed target column definition records are projected onto.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    /// Destination table name
    pub table: String,
    /// Ordered target columns
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// The built-in `medicine_master` target schema (19 columns).
    pub fn medicine_master() -> Self {
        Self {
            table: "medicine_master".to_string(),
            columns: vec![
                ColumnSpec::text("name"),
                ColumnSpec::text("generic_name"),
                ColumnSpec::list("brand_names"),
                ColumnSpec::text("category"),
                ColumnSpec::text("subcategory"),
                ColumnSpec::text("therapeutic_class"),
                ColumnSpec::list("dosage_forms"),
                ColumnSpec::list("strengths"),
                ColumnSpec::text("standard_dosage_adult"),
                ColumnSpec::text("standard_dosage_pediatric"),
                ColumnSpec::list("routes"),
                ColumnSpec::list("indications"),
                ColumnSpec::list("contraindications"),
                ColumnSpec::list("side_effects"),
                ColumnSpec::list_from("interactions", "drug_interactions"),
                ColumnSpec::text("pregnancy_category"),
                ColumnSpec::flag("controlled_substance", false),
                ColumnSpec::flag("prescription_required", true),
                ColumnSpec::flag("is_active", true),
            ],
        }
    }

    /// Load a schema from its JSON configuration form.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::Config(e.to_string()))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }
}

/// One column of the source layout/vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl SourceColumn {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
        }
    }
}

/// The ordered source column layout.
///
/// Doubles as the extractor's field vocabulary (names + types) and as the
/// positional layout a wide INSERT tuple is indexed against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceLayout {
    pub columns: Vec<SourceColumn>,
}

impl SourceLayout {
    /// The 29-column layout of the original wide medicine INSERT.
    pub fn medicine_wide() -> Self {
        use FieldType::{Flag, List, Text};
        Self {
            columns: vec![
                SourceColumn::new("name", Text),
                SourceColumn::new("generic_name", Text),
                SourceColumn::new("brand_names", List),
                SourceColumn::new("category", Text),
                SourceColumn::new("subcategory", Text),
                SourceColumn::new("therapeutic_class", Text),
                SourceColumn::new("pharmacological_class", Text),
                SourceColumn::new("dosage_forms", List),
                SourceColumn::new("strengths", List),
                SourceColumn::new("standard_dosage_adult", Text),
                SourceColumn::new("standard_dosage_pediatric", Text),
                SourceColumn::new("routes", List),
                SourceColumn::new("frequencies", List),
                SourceColumn::new("indications", List),
                SourceColumn::new("contraindications", List),
                SourceColumn::new("side_effects", List),
                SourceColumn::new("drug_interactions", List),
                SourceColumn::new("warnings", List),
                SourceColumn::new("max_daily_dose", Text),
                SourceColumn::new("duration_guidelines", Text),
                SourceColumn::new("monitoring_requirements", List),
                SourceColumn::new("mechanism_of_action", Text),
                SourceColumn::new("pregnancy_category", Text),
                SourceColumn::new("controlled_substance", Flag),
                SourceColumn::new("prescription_required", Flag),
                SourceColumn::new("search_keywords", List),
                SourceColumn::new("synonyms", List),
                SourceColumn::new("icd_codes", List),
                SourceColumn::new("is_active", Flag),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a source column by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Check a column list declared by an INSERT header against this layout.
    /// Fails fast on any mismatch rather than silently misaligning values.
    pub fn check_declared(&self, declared: &[String]) -> Result<(), SchemaError> {
        if declared.len() != self.columns.len() {
            return Err(SchemaError::LayoutArityMismatch {
                expected: self.columns.len(),
                found: declared.len(),
            });
        }
        for (index, (have, want)) in declared.iter().zip(&self.columns).enumerate() {
            if !have.eq_ignore_ascii_case(&want.name) {
                return Err(SchemaError::LayoutColumnMismatch {
                    index,
                    expected: want.name.clone(),
                    found: have.clone(),
                });
            }
        }
        Ok(())
    }
}
