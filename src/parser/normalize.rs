use super::classify::{is_hedged, is_not_in_code};
use super::patterns::patterns;
use super::record::{
    ErrorRecord, LineValue, RawErrorEntry, DEFAULT_TYPE, NO_DESCRIPTION, UNKNOWN_LINE,
};
use crate::error::ParserError;
use regex::Regex;
use std::cmp::Ordering;

/// Convert a structured entry from the service into a record, repairing the
/// two malformations the service is known to produce: a type field carrying
/// `- Description ...`, and a description carrying `Fix: ...`.
pub fn normalize_entry(entry: &RawErrorEntry) -> Result<ErrorRecord, ParserError> {
    let p = patterns()?;

    let line = entry
        .line
        .as_ref()
        .and_then(LineValue::to_line_text)
        .unwrap_or_else(|| UNKNOWN_LINE.to_string());
    let mut error_type = entry
        .error_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TYPE)
        .to_string();
    let mut description = entry.description.as_deref().unwrap_or("").trim().to_string();
    let mut solution = entry.solution.as_deref().unwrap_or("").trim().to_string();

    if error_type.contains("Description") {
        let (head, tail) = split_once_on(&p.embedded_description, &error_type);
        if let Some(tail) = tail {
            description = prepend(&tail, &description);
        }
        error_type = head;
    }

    if description.contains("Fix:") || description.contains("Solution:") {
        let (head, tail) = split_once_on(&p.embedded_fix, &description);
        if let Some(tail) = tail {
            solution = prepend(&tail, &solution);
            description = head;
        }
    }

    let is_potential = entry.is_potential == Some(true) || is_hedged(&error_type);
    let not_in_code = is_not_in_code(&description) || is_not_in_code(&solution);

    Ok(finalize(ErrorRecord {
        line,
        error_type,
        description,
        solution,
        is_potential,
        not_in_code,
        index: 0,
    }))
}

/// Substitute defaults so no record leaves the parser with an empty type or
/// description
pub fn finalize(mut record: ErrorRecord) -> ErrorRecord {
    if record.line.trim().is_empty() {
        record.line = UNKNOWN_LINE.to_string();
    }
    if record.error_type.trim().is_empty() {
        record.error_type = DEFAULT_TYPE.to_string();
    }
    if record.description.trim().is_empty() {
        record.description = NO_DESCRIPTION.to_string();
    }
    record
}

/// Order by numeric line (unknown lines last, discovery order on ties) and
/// assign display indices.
pub fn sort_and_index(mut records: Vec<ErrorRecord>) -> Vec<ErrorRecord> {
    records.sort_by(|a, b| match (a.line_key(), b.line_key()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    for (index, record) in records.iter_mut().enumerate() {
        record.index = index;
    }
    records
}

/// Split at the first match of `separator`; both halves trimmed
fn split_once_on(separator: &Regex, text: &str) -> (String, Option<String>) {
    let mut parts = separator.splitn(text, 2);
    let head = parts.next().unwrap_or("").trim().to_string();
    let tail = parts.next().map(|t| t.trim().to_string());
    (head, tail)
}

fn prepend(front: &str, back: &str) -> String {
    match (front.is_empty(), back.is_empty()) {
        (_, true) => front.to_string(),
        (true, false) => back.to_string(),
        (false, false) => format!("{} {}", front, back),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: &str) -> ErrorRecord {
        ErrorRecord {
            line: line.to_string(),
            error_type: format!("T{}", line),
            description: "d".to_string(),
            solution: String::new(),
            is_potential: false,
            not_in_code: false,
            index: 99,
        }
    }

    #[test]
    fn test_malformed_entry_repair() {
        let entry = RawErrorEntry {
            error_type: Some("TypeError - Description mismatched operand types".to_string()),
            description: Some("Fix: cast to int".to_string()),
            ..Default::default()
        };

        let record = normalize_entry(&entry).unwrap();
        assert_eq!(record.error_type, "TypeError");
        assert_eq!(record.description, "mismatched operand types");
        assert_eq!(record.solution, "cast to int");
        assert_eq!(record.line, UNKNOWN_LINE);
        assert!(!record.is_potential);
    }

    #[test]
    fn test_embedded_fix_prepends_to_solution() {
        let entry = RawErrorEntry {
            line: Some(LineValue::Number(7.0)),
            error_type: Some("Warning".to_string()),
            description: Some("unused import - Solution: remove it".to_string()),
            solution: Some("or use it".to_string()),
            ..Default::default()
        };

        let record = normalize_entry(&entry).unwrap();
        assert_eq!(record.line, "7");
        assert_eq!(record.description, "unused import");
        assert_eq!(record.solution, "remove it or use it");
        assert!(record.is_potential);
    }

    #[test]
    fn test_empty_entry_gets_defaults() {
        let record = normalize_entry(&RawErrorEntry::default()).unwrap();
        assert_eq!(record.line, UNKNOWN_LINE);
        assert_eq!(record.error_type, DEFAULT_TYPE);
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.solution, "");
    }

    #[test]
    fn test_explicit_potential_flag() {
        let entry = RawErrorEntry {
            error_type: Some("Race".to_string()),
            is_potential: Some(true),
            ..Default::default()
        };
        assert!(normalize_entry(&entry).unwrap().is_potential);
    }

    #[test]
    fn test_type_mentioning_description_is_kept() {
        for name in ["MissingDescriptionError", "Description error in docstring"] {
            let entry = RawErrorEntry {
                error_type: Some(name.to_string()),
                description: Some("d".to_string()),
                ..Default::default()
            };
            let record = normalize_entry(&entry).unwrap();
            assert_eq!(record.error_type, name);
            assert_eq!(record.description, "d");
        }
    }

    #[test]
    fn test_not_in_code_from_description_or_solution() {
        let entry = RawErrorEntry {
            error_type: Some("Import Error".to_string()),
            description: Some("module utils is not in the provided code".to_string()),
            ..Default::default()
        };
        assert!(normalize_entry(&entry).unwrap().not_in_code);

        let entry = RawErrorEntry {
            error_type: Some("Import Error".to_string()),
            description: Some("utils cannot be resolved".to_string()),
            solution: Some("Add utils; it is not present in the code".to_string()),
            ..Default::default()
        };
        let record = normalize_entry(&entry).unwrap();
        assert!(record.not_in_code);
        assert!(!record.is_potential);

        let entry = RawErrorEntry {
            error_type: Some("Import Error".to_string()),
            description: Some("utils cannot be resolved".to_string()),
            ..Default::default()
        };
        assert!(!normalize_entry(&entry).unwrap().not_in_code);
    }

    #[test]
    fn test_sort_unknown_lines_last_and_stable() {
        let sorted = sort_and_index(vec![
            record("?"),
            record("12"),
            record("3"),
            record("abc"),
            record("12"),
        ]);

        let lines: Vec<_> = sorted.iter().map(|r| r.line.as_str()).collect();
        assert_eq!(lines, vec!["3", "12", "12", "?", "abc"]);

        let indices: Vec<_> = sorted.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_is_numeric_not_lexical() {
        let sorted = sort_and_index(vec![record("100"), record("9")]);
        assert_eq!(sorted[0].line, "9");
    }

    #[test]
    fn test_sort_lines_beyond_u64() {
        let sorted = sort_and_index(vec![
            record("?"),
            record("123456789012345678901234"),
            record("99999999999999999999"),
            record("5"),
        ]);
        let lines: Vec<_> = sorted.iter().map(|r| r.line.as_str()).collect();
        assert_eq!(
            lines,
            vec!["5", "99999999999999999999", "123456789012345678901234", "?"]
        );
    }
}
