use super::classify::{is_hedged, is_not_in_code, mentions_hedged_error};
use super::patterns::{capture, patterns, Patterns};
use super::record::{ErrorRecord, NO_DESCRIPTION, UNKNOWN_LINE, UNKNOWN_TYPE};
use crate::error::ParserError;
use regex::Regex;
use tracing::debug;

/// Extract records from `1. ...`, `2. ...` blocks.
/// Expected format:
///   1. Line 10: Null Reference
///   Description: variable x is undefined
///   Fix: initialize x to 0
pub fn extract(section: &str) -> Result<Vec<ErrorRecord>, ParserError> {
    let p = patterns()?;
    Ok(split_at_markers(section, &p.numbered_marker)
        .into_iter()
        .map(|block| extract_block(block, p))
        .collect())
}

/// Extract records from `N. Line M:` or `(Potential error) Line M:` markers
/// appearing anywhere in a report, including several on one line.
pub fn extract_inline(report: &str) -> Result<Vec<ErrorRecord>, ParserError> {
    let p = patterns()?;
    Ok(split_at_markers(report, &p.inline_marker)
        .into_iter()
        .map(|block| extract_block(block, p))
        .collect())
}

/// Split `text` into blocks that each begin at a `marker` match. Text before
/// the first marker is not a block.
fn split_at_markers<'a>(text: &'a str, marker: &Regex) -> Vec<&'a str> {
    let starts: Vec<usize> = marker.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

fn extract_block(block: &str, p: &Patterns) -> ErrorRecord {
    let line = capture(&p.line_number, block).unwrap_or_else(|| UNKNOWN_LINE.to_string());

    let error_type = capture(&p.type_label, block)
        .or_else(|| heading_type(block, p))
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

    let is_potential = mentions_hedged_error(block) || is_hedged(&error_type);

    let description = capture(&p.description_label, block)
        .or_else(|| trailing_lines(block, p))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let solution = capture(&p.fix_label, block).unwrap_or_default();

    debug!(
        "Found numbered error: line {}, type {}, potential {}",
        line, error_type, is_potential
    );

    ErrorRecord {
        line,
        error_type,
        description,
        solution,
        is_potential,
        not_in_code: is_not_in_code(block),
        index: 0,
    }
}

/// Category from the block's first line: the numeral, any hedge marker and a
/// leading `Line N:` reference are stripped. A first line that is (or still
/// contains) a line reference does not name a category.
fn heading_type(block: &str, p: &Patterns) -> Option<String> {
    let first = block.lines().next()?.trim();
    let rest = p.numeral_prefix.replace(first, "");
    let rest = p.hedge_marker_prefix.replace(&rest, "");
    let rest = p.hedged_line_ref_prefix.replace(&rest, "");
    let rest = p.line_ref_prefix.replace(&rest, "");

    let heading = rest.trim().trim_matches('`').trim();
    if heading.is_empty() || p.line_number.is_match(heading) {
        return None;
    }
    Some(heading.to_string())
}

/// Unlabeled description: every line after the first that is not itself a
/// labeled field
fn trailing_lines(block: &str, p: &Patterns) -> Option<String> {
    let description = block
        .lines()
        .skip(1)
        .filter(|line| !p.labeled_line.is_match(line))
        .collect::<Vec<_>>()
        .join("\n");
    let description = description.trim();
    (!description.is_empty()).then(|| description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_block() {
        let section = "1. Line 10: Null Reference\nDescription: variable x is undefined\nFix: initialize x to 0";
        let records = extract(section).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.line, "10");
        assert_eq!(record.error_type, "Null Reference");
        assert_eq!(record.description, "variable x is undefined");
        assert_eq!(record.solution, "initialize x to 0");
        assert!(!record.is_potential);
        assert!(!record.not_in_code);
    }

    #[test]
    fn test_parse_multiple_blocks_drops_preamble() {
        let section = "Found these:\n1. Line 3: Syntax Error\nDescription: missing colon\n2. (Potential error) Line 8: Overflow\nProblem: counter may wrap\n   past the limit\nHow to fix: use u64";
        let records = extract(section).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].error_type, "Syntax Error");
        assert!(!records[0].is_potential);

        assert_eq!(records[1].line, "8");
        assert_eq!(records[1].error_type, "Overflow");
        assert_eq!(records[1].description, "counter may wrap\n   past the limit");
        assert_eq!(records[1].solution, "use u64");
        assert!(records[1].is_potential);
    }

    #[test]
    fn test_labeled_type_wins() {
        let section = "1. Line 5: something\nType of error: Possible race condition\nDescription: shared counter";
        let records = extract(section).unwrap();
        assert_eq!(records[0].error_type, "Possible race condition");
        assert!(records[0].is_potential);
    }

    #[test]
    fn test_unlabeled_description_fallback() {
        let section = "1. Division by zero\nThe divisor can be zero at line 12.\nFix: check the divisor";
        let records = extract(section).unwrap();
        assert_eq!(records[0].error_type, "Division by zero");
        assert_eq!(records[0].line, "12");
        assert_eq!(records[0].description, "The divisor can be zero at line 12.");
        assert_eq!(records[0].solution, "check the divisor");
    }

    #[test]
    fn test_line_reference_heading_is_not_a_type() {
        let records = extract("1. The value on line 4 is never read").unwrap();
        assert_eq!(records[0].error_type, UNKNOWN_TYPE);
        assert_eq!(records[0].description, NO_DESCRIPTION);
        assert_eq!(records[0].line, "4");
    }

    #[test]
    fn test_not_in_code_flag() {
        let section = "1. Line 2: Missing import\nDescription: requests is used but this call is not in the provided code";
        let records = extract(section).unwrap();
        assert!(records[0].not_in_code);
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        assert!(extract("- Line 3: Bad\n- Description: x").unwrap().is_empty());
        assert!(extract("").unwrap().is_empty());
    }

    #[test]
    fn test_inline_markers_on_one_line() {
        let report = "Issues: 1. Line 4: Bad name Description: x is unclear 2. Line 9: Unused import (Potential error) Line 11: Shadowed variable";
        let records = extract_inline(report).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].line, "4");
        assert_eq!(records[1].line, "9");
        assert_eq!(records[2].line, "11");
        assert!(records[2].is_potential);
        assert!(!records[1].is_potential);
    }

    #[test]
    fn test_numbered_potential_marker_starts_at_numeral() {
        let report = "1. Line 3: Null deref\nx is null here\n2. (Potential error) Line 8: Overflow";
        let records = extract_inline(report).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].description, "x is null here");
        assert_eq!(records[1].line, "8");
        assert_eq!(records[1].error_type, "Overflow");
        assert!(records[1].is_potential);
    }
}
