//! Record extraction from embedded literal-object sections.
//!
//! The source document contains one or more `const <name> = [ ... ];`
//! sections holding brace-delimited object literals. Sections are
//! concatenated in encounter order into one logical record stream, blocks
//! are delimited by a depth-aware scanner, and named fields are pulled out
//! of each block with type-appropriate patterns.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::import::{ExtractResult, ImportError};
use crate::models::{FieldType, FieldValue, Record, SourceLayout};

static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)const\s+(\w+)\s*=\s*\[(.*?)\];").unwrap());

static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([^']+)'").unwrap());

struct FieldPattern {
    name: String,
    field_type: FieldType,
    re: Regex,
}

/// Extracts records from literal-object source text.
pub struct RecordExtractor {
    patterns: Vec<FieldPattern>,
}

impl RecordExtractor {
    /// Build an extractor for the given source field vocabulary.
    pub fn new(vocabulary: &SourceLayout) -> Self {
        let patterns = vocabulary
            .columns
            .iter()
            .map(|col| {
                let escaped = regex::escape(&col.name);
                // The leading \b keeps `name` from matching inside
                // `generic_name` and `category` inside `subcategory`.
                let pattern = match col.field_type {
                    FieldType::Text => format!(r"\b{escaped}\s*:\s*'([^']+)'"),
                    FieldType::Flag => format!(r"\b{escaped}\s*:\s*(true|false)"),
                    FieldType::List => format!(r"\b{escaped}\s*:\s*\[([^\]]*)\]"),
                };
                FieldPattern {
                    name: col.name.clone(),
                    field_type: col.field_type,
                    // Patterns are built from escaped column names and
                    // cannot fail to compile.
                    re: Regex::new(&pattern).unwrap(),
                }
            })
            .collect();
        Self { patterns }
    }

    /// Extract all records from the source text.
    ///
    /// A block that yields no non-empty `name` field is dropped and counted,
    /// never treated as an error. Zero sections is fatal for the run.
    pub fn extract(&self, source: &str) -> Result<ExtractResult, ImportError> {
        let mut bodies = Vec::new();
        for caps in SECTION_RE.captures_iter(source) {
            debug!(section = &caps[1], "found record section");
            bodies.push(caps[2].to_string());
        }
        if bodies.is_empty() {
            return Err(ImportError::NoSections);
        }

        let combined = bodies.join(",");
        let blocks = scan_blocks(&combined);
        debug!(blocks = blocks.len(), "delimited object blocks");

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for block in &blocks {
            let record = self.parse_block(block);
            if record.name().is_some() {
                records.push(record);
            } else {
                skipped += 1;
            }
        }

        debug!(records = records.len(), skipped, "extraction finished");
        Ok(ExtractResult { records, skipped })
    }

    fn parse_block(&self, block: &str) -> Record {
        let mut record = Record::new();
        for pattern in &self.patterns {
            if let Some(caps) = pattern.re.captures(block) {
                let value = match pattern.field_type {
                    FieldType::Text => FieldValue::Text(caps[1].to_string()),
                    FieldType::Flag => FieldValue::Flag(&caps[1] == "true"),
                    FieldType::List => {
                        let items: Vec<String> = LIST_ITEM_RE
                            .captures_iter(&caps[1])
                            .map(|c| c[1].to_string())
                            .collect();
                        if items.is_empty() {
                            // Present-but-empty stays unset, keeping the
                            // unset/empty distinction for projection.
                            continue;
                        }
                        FieldValue::List(items)
                    }
                };
                record.set(&pattern.name, value);
            }
        }
        record
    }
}

// Delimit top-level brace blocks, tracking nesting depth and quoted spans so
// a brace inside a string or a nested structure cannot end a block early.
fn scan_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut buf = String::new();
    let mut depth = 0u32;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        if let Some(q) = quote {
            if depth > 0 {
                buf.push(c);
            }
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                if depth > 0 {
                    buf.push(c);
                }
                quote = Some(c);
            }
            '{' => {
                depth += 1;
                if depth > 1 {
                    buf.push(c);
                }
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(std::mem::take(&mut buf));
                } else {
                    buf.push(c);
                }
            }
            _ => {
                if depth > 0 {
                    buf.push(c);
                }
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceLayout;

    fn extractor() -> RecordExtractor {
        RecordExtractor::new(&SourceLayout::medicine_wide())
    }

    #[test]
    fn extracts_fields_by_type() {
        let source = r#"
            const medicines = [
              {
                name: 'Aspirin',
                generic_name: 'acetylsalicylic acid',
                brand_names: ['Bayer', 'Ecotrin'],
                prescription_required: false
              }
            ];
        "#;
        let result = extractor().extract(source).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped, 0);

        let record = &result.records[0];
        assert_eq!(record.name(), Some("Aspirin"));
        assert_eq!(
            record.get("brand_names"),
            Some(&FieldValue::List(vec![
                "Bayer".to_string(),
                "Ecotrin".to_string()
            ]))
        );
        assert_eq!(
            record.get("prescription_required"),
            Some(&FieldValue::Flag(false))
        );
        assert_eq!(record.get("controlled_substance"), None);
    }

    #[test]
    fn sections_concatenate_in_encounter_order() {
        let source = r#"
            const medicines = [
              { name: 'First' }
            ];
            const additionalMedicines = [
              { name: 'Second' }
            ];
        "#;
        let result = extractor().extract(source).unwrap();
        let names: Vec<_> = result.records.iter().map(|r| r.name().unwrap()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn missing_section_is_fatal() {
        let err = extractor().extract("no arrays here").unwrap_err();
        assert!(matches!(err, ImportError::NoSections));
    }

    #[test]
    fn nameless_block_is_dropped_and_counted() {
        let source = r#"
            const medicines = [
              { name: 'Kept' },
              { generic_name: 'nameless placeholder' }
            ];
        "#;
        let result = extractor().extract(source).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn empty_list_stays_unset() {
        let source = r#"
            const medicines = [
              { name: 'Plain', warnings: [] }
            ];
        "#;
        let result = extractor().extract(source).unwrap();
        assert_eq!(result.records[0].get("warnings"), None);
    }

    #[test]
    fn brace_inside_quoted_value_does_not_end_block() {
        let blocks = scan_blocks("{ name: 'has } brace', category: 'x' }");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("category"));
    }

    #[test]
    fn nested_braces_are_tracked() {
        let blocks = scan_blocks("{ a: { b: 1 } }, { c: 2 }");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].trim(), "a: { b: 1 }");
    }
}
