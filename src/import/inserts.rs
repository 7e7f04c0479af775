//! Re-tokenization of an existing INSERT statement.
//!
//! Locates the `INSERT INTO <table> (...) VALUES` header, checks the
//! declared column list against the configured source layout, then splits
//! the VALUES body into parenthesized tuples with a quote-aware, depth-aware
//! scan before handing each tuple interior to the value tokenizer.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::import::values::split_values;
use crate::import::{ImportError, ReshapeResult};
use crate::models::SourceLayout;

static INSERT_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)INSERT\s+INTO\s+["`]?(\w+)["`]?\s*\(([^)]*)\)\s*VALUES"#).unwrap()
});

/// Reads value tuples out of an existing INSERT statement.
pub struct InsertReader {
    layout: SourceLayout,
}

impl InsertReader {
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    /// Tokenize every value tuple in the source.
    ///
    /// A missing header or a column list that disagrees with the configured
    /// layout aborts the run. Per-tuple failures (malformed values, arity
    /// mismatch) drop that tuple, are counted, and never abort the batch.
    pub fn read(&self, content: &str) -> Result<ReshapeResult, ImportError> {
        let caps = INSERT_HEADER_RE
            .captures(content)
            .ok_or(ImportError::NoInsertHeader)?;
        let table = caps[1].to_string();
        let declared: Vec<String> = caps[2]
            .split(',')
            .map(|c| c.trim().trim_matches(['`', '"', '\'']).to_string())
            .filter(|c| !c.is_empty())
            .collect();
        debug!(table = %table, columns = declared.len(), "found INSERT header");

        self.layout.check_declared(&declared)?;

        let header_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        let groups = split_tuple_groups(&content[header_end..]);
        debug!(groups = groups.len(), "split value tuples");

        let mut tuples = Vec::new();
        let mut skipped = 0usize;
        let mut errors = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            match split_values(group) {
                Ok(tokens) => {
                    if tokens.len() == self.layout.len() {
                        tuples.push(tokens);
                    } else {
                        debug!(
                            index,
                            expected = self.layout.len(),
                            got = tokens.len(),
                            "dropping tuple with wrong arity"
                        );
                        skipped += 1;
                    }
                }
                Err(e) => {
                    skipped += 1;
                    errors.push(ImportError::MalformedTuple { index, source: e });
                }
            }
        }

        Ok(ReshapeResult {
            tuples,
            skipped,
            errors,
        })
    }
}

// Split the VALUES body into tuple interiors (outer parentheses stripped),
// respecting quoted spans, doubled-quote escapes, nested parentheses, and
// `--` comment lines between tuples. A `;` at depth zero ends the statement.
fn split_tuple_groups(body: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut buf = String::new();
    let mut depth = 0u32;
    let mut chars = body.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            buf.push(c);
            if c == q {
                if chars.peek() == Some(&q) {
                    buf.push(q);
                    chars.next();
                } else {
                    quote = None;
                }
            }
            continue;
        }
        match c {
            '\'' | '"' if depth > 0 => {
                buf.push(c);
                quote = Some(c);
            }
            '(' => {
                depth += 1;
                if depth > 1 {
                    buf.push(c);
                }
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push(std::mem::take(&mut buf));
                } else {
                    buf.push(c);
                }
            }
            '-' if depth == 0 && chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            ';' if depth == 0 => break,
            _ => {
                if depth > 0 {
                    buf.push(c);
                }
            }
        }
    }
    // An unterminated quote or parenthesis leaves a pending buffer; flush it
    // as a final group so the tokenizer reports the malformed input instead
    // of the remainder vanishing silently.
    if !buf.trim().is_empty() {
        groups.push(buf);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaError;

    fn wide_insert(tuples: &str) -> String {
        let columns: Vec<String> = SourceLayout::medicine_wide()
            .columns
            .iter()
            .map(|c| c.name.clone())
            .collect();
        format!(
            "INSERT INTO medicine_master (\n  {}\n) VALUES\n{}",
            columns.join(", "),
            tuples
        )
    }

    fn wide_tuple(name: &str) -> String {
        // name + 28 filler values to match the 29-column layout
        let mut values = vec![format!("'{}'", name)];
        values.extend(std::iter::repeat_n("NULL".to_string(), 28));
        format!("({})", values.join(", "))
    }

    #[test]
    fn reads_tuples_in_order() {
        let content = wide_insert(&format!("{},\n{};\n", wide_tuple("A"), wide_tuple("B")));
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let result = reader.read(&content).unwrap();

        assert_eq!(result.tuples.len(), 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.tuples[0][0], "'A'");
        assert_eq!(result.tuples[1][0], "'B'");
    }

    #[test]
    fn missing_header_is_fatal() {
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let err = reader.read("SELECT 1;").unwrap_err();
        assert!(matches!(err, ImportError::NoInsertHeader));
    }

    #[test]
    fn declared_columns_must_match_layout() {
        let content = "INSERT INTO medicine_master (name, generic_name) VALUES ('a', 'b');";
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let err = reader.read(content).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Layout(SchemaError::LayoutArityMismatch { .. })
        ));
    }

    #[test]
    fn short_tuple_is_dropped_not_truncated() {
        let content = wide_insert(&format!("('only', 'two'),\n{};\n", wide_tuple("Kept")));
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let result = reader.read(&content).unwrap();

        assert_eq!(result.tuples.len(), 1);
        assert_eq!(result.skipped, 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn malformed_final_tuple_is_a_distinct_error() {
        let mut bad = vec!["'unclosed".to_string()];
        bad.extend(std::iter::repeat_n("NULL".to_string(), 28));
        let content = wide_insert(&format!(
            "{},\n({})\n",
            wide_tuple("Kept"),
            bad.join(", ")
        ));
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let result = reader.read(&content).unwrap();

        assert_eq!(result.tuples.len(), 1);
        assert_eq!(result.tuples[0][0], "'Kept'");
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors[0],
            ImportError::MalformedTuple { index: 1, .. }
        ));
    }

    #[test]
    fn comment_lines_between_tuples_are_ignored() {
        let content = wide_insert(&format!(
            "-- Batch 1: medicines 1 to 1\n{},\n-- interlude\n{};\n",
            wide_tuple("A"),
            wide_tuple("B")
        ));
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let result = reader.read(&content).unwrap();
        assert_eq!(result.tuples.len(), 2);
    }

    #[test]
    fn nested_parentheses_inside_values_are_kept() {
        let mut values = vec!["'Aspirin (buffered)'".to_string()];
        values.extend(std::iter::repeat_n("NULL".to_string(), 28));
        let content = wide_insert(&format!("({});\n", values.join(", ")));
        let reader = InsertReader::new(SourceLayout::medicine_wide());
        let result = reader.read(&content).unwrap();
        assert_eq!(result.tuples[0][0], "'Aspirin (buffered)'");
    }
}
