use super::classify::{classify_type, is_hedged, is_not_in_code};
use super::patterns::{capture, patterns};
use super::record::{ErrorRecord, DEFAULT_TYPE, UNKNOWN_LINE};
use crate::error::ParserError;
use tracing::debug;

/// Last-resort extractor: every non-empty paragraph becomes one record.
pub fn extract(section: &str) -> Result<Vec<ErrorRecord>, ParserError> {
    let p = patterns()?;
    let mut records = Vec::new();

    for paragraph in p.paragraph_break.split(section) {
        if paragraph.trim().is_empty() {
            continue;
        }

        let line = capture(&p.line_number, paragraph).unwrap_or_else(|| UNKNOWN_LINE.to_string());
        let error_type = classify_type(paragraph).unwrap_or(DEFAULT_TYPE).to_string();
        let is_potential = is_hedged(paragraph);

        // Whole paragraph when there is no labeled description
        let description = capture(&p.paragraph_description, paragraph)
            .unwrap_or_else(|| paragraph.trim().to_string());
        let solution = capture(&p.paragraph_fix, paragraph).unwrap_or_default();

        debug!(
            "Found paragraph error: line {}, type {}, potential {}",
            line, error_type, is_potential
        );

        records.push(ErrorRecord {
            line,
            error_type,
            description,
            solution,
            is_potential,
            not_in_code: is_not_in_code(paragraph),
            index: 0,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_record_per_paragraph() {
        let section = "There is a syntax error at line 4 where a colon is missing.\n\nThe loop might be infinite because i never changes.\nTo fix this: increment i.\n\n\n";
        let records = extract(section).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].line, "4");
        assert_eq!(records[0].error_type, "Syntax Error");
        assert_eq!(
            records[0].description,
            "There is a syntax error at line 4 where a colon is missing."
        );
        assert!(!records[0].is_potential);

        assert_eq!(records[1].line, UNKNOWN_LINE);
        assert_eq!(records[1].error_type, DEFAULT_TYPE);
        assert_eq!(records[1].solution, "increment i.");
        assert!(records[1].is_potential);
    }

    #[test]
    fn test_labeled_fields() {
        let section = "Runtime exception on line: 12\nIssue: list index out of range\nSolution: check the length first";
        let records = extract(section).unwrap();
        assert_eq!(records[0].line, "12");
        assert_eq!(records[0].error_type, "Runtime Error");
        assert_eq!(records[0].description, "list index out of range");
        assert_eq!(records[0].solution, "check the length first");
    }

    #[test]
    fn test_not_in_code() {
        let records =
            extract("An import error is mentioned, but that module is not present in the code.")
                .unwrap();
        assert_eq!(records[0].error_type, "Import Error");
        assert!(records[0].not_in_code);
    }

    #[test]
    fn test_blank_section_yields_nothing() {
        assert!(extract("  \n\n \n").unwrap().is_empty());
    }
}
