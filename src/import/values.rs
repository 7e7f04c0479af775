//! Positional value tokenizer.
//!
//! Splits the interior of one parenthesized value tuple (outer parentheses
//! already stripped) into discrete value tokens. Naive comma-splitting
//! breaks on commas inside quoted strings or array literals, and naive
//! bracket-matching breaks on quoted brackets, so the scan keeps three
//! mutually exclusive modes plus a bracket-nesting counter.

use thiserror::Error;

/// Malformed input detected at end of scan.
///
/// This must reach the caller as a distinct failure for the affected record:
/// silently truncating the value list would corrupt column alignment for
/// every subsequent projected field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("unterminated {0}-quoted string at end of value list")]
    UnterminatedQuote(char),
    #[error("unterminated array literal at end of value list (depth {0})")]
    UnterminatedArray(u32),
}

enum Mode {
    Bare,
    Quoted(char),
    Bracketed,
}

/// Split a flat value list into its positional tokens.
///
/// Top-level separating commas are removed; no other characters are altered.
/// Bare-mode segments are trimmed of surrounding whitespace, content inside
/// quotes or brackets never is. Adjacent commas yield an empty-string token,
/// preserved positionally; a trailing all-whitespace remainder is not
/// emitted.
pub fn split_values(input: &str) -> Result<Vec<String>, TokenizeError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut mode = Mode::Bare;
    let mut depth: u32 = 0;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match mode {
            Mode::Bare => {
                if c == '\'' || c == '"' {
                    buf.push(c);
                    mode = Mode::Quoted(c);
                } else if starts_array_keyword(&chars, i) {
                    buf.push(c);
                    mode = Mode::Bracketed;
                } else if c == ',' {
                    tokens.push(buf.trim().to_string());
                    buf.clear();
                } else {
                    buf.push(c);
                }
            }
            Mode::Quoted(quote) => {
                buf.push(c);
                if c == quote {
                    if chars.get(i + 1) == Some(&quote) {
                        // Doubled-quote escape for a literal quote
                        buf.push(quote);
                        i += 1;
                    } else {
                        mode = Mode::Bare;
                    }
                }
            }
            Mode::Bracketed => {
                buf.push(c);
                if c == '[' {
                    depth += 1;
                } else if c == ']' && depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        mode = Mode::Bare;
                    }
                }
            }
        }
        i += 1;
    }

    match mode {
        Mode::Quoted(quote) => return Err(TokenizeError::UnterminatedQuote(quote)),
        Mode::Bracketed => return Err(TokenizeError::UnterminatedArray(depth)),
        Mode::Bare => {}
    }

    if !buf.trim().is_empty() {
        tokens.push(buf.trim().to_string());
    }
    Ok(tokens)
}

// Case-insensitive match of the ARRAY keyword that introduces an array
// literal.
fn starts_array_keyword(chars: &[char], at: usize) -> bool {
    const KEYWORD: [char; 5] = ['a', 'r', 'r', 'a', 'y'];
    chars.len() >= at + KEYWORD.len()
        && chars[at..at + KEYWORD.len()]
            .iter()
            .zip(KEYWORD)
            .all(|(c, k)| c.to_ascii_lowercase() == k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<String> {
        split_values(input).unwrap()
    }

    #[test]
    fn splits_bare_values() {
        assert_eq!(split("NULL, true, 42"), vec!["NULL", "true", "42"]);
    }

    #[test]
    fn commas_inside_quotes_do_not_split() {
        assert_eq!(
            split("'Aspirin', 'take 1, then wait', false"),
            vec!["'Aspirin'", "'take 1, then wait'", "false"]
        );
    }

    #[test]
    fn commas_inside_arrays_do_not_split() {
        assert_eq!(
            split("ARRAY['Bayer', 'Ecotrin'], NULL"),
            vec!["ARRAY['Bayer', 'Ecotrin']", "NULL"]
        );
    }

    #[test]
    fn nested_brackets_track_depth() {
        assert_eq!(
            split("ARRAY[['a', 'b'], ['c']], 'x'"),
            vec!["ARRAY[['a', 'b'], ['c']]", "'x'"]
        );
    }

    #[test]
    fn array_keyword_is_case_insensitive() {
        assert_eq!(split("array['a','b'], 1"), vec!["array['a','b']", "1"]);
    }

    #[test]
    fn doubled_quote_is_an_escape() {
        assert_eq!(
            split("'O''Reilly', 'plain'"),
            vec!["'O''Reilly'", "'plain'"]
        );
    }

    #[test]
    fn quoted_bracket_does_not_open_an_array() {
        assert_eq!(split("'a [ b', 'c'"), vec!["'a [ b'", "'c'"]);
    }

    #[test]
    fn adjacent_commas_preserve_empty_token() {
        assert_eq!(split("'a',,'b'"), vec!["'a'", "", "'b'"]);
    }

    #[test]
    fn trailing_whitespace_remainder_is_not_emitted() {
        assert_eq!(split("'a', 'b',  "), vec!["'a'", "'b'"]);
    }

    #[test]
    fn bare_segments_are_trimmed() {
        assert_eq!(split("  NULL ,  true "), vec!["NULL", "true"]);
    }

    #[test]
    fn whitespace_inside_quotes_is_preserved() {
        assert_eq!(split("'  padded  '"), vec!["'  padded  '"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(
            split_values("'unclosed, NULL"),
            Err(TokenizeError::UnterminatedQuote('\''))
        );
    }

    #[test]
    fn unterminated_array_is_an_error() {
        assert_eq!(
            split_values("ARRAY['a', 'b'"),
            Err(TokenizeError::UnterminatedArray(1))
        );
    }

    #[test]
    fn round_trip_recovers_token_sequence() {
        let tokens = vec![
            "'Aspirin'".to_string(),
            "ARRAY['a, b', 'c']".to_string(),
            "NULL".to_string(),
            "'O''Neil, Jr.'".to_string(),
            "true".to_string(),
        ];
        let joined = tokens.join(", ");
        assert_eq!(split(&joined), tokens);
    }
}
