//! Locating the errors and explanation regions of a report.

use super::classify::has_error_tokens;
use super::patterns::patterns;
use crate::error::ParserError;
use regex::Regex;
use std::borrow::Cow;
use tracing::{debug, warn};

pub const NO_EXPLANATION: &str = "No code explanation found in the analysis.";
pub const EXPLANATION_PARSE_FAILURE: &str = "Error parsing the code explanation.";

/// Normalize CRLF line endings so every pattern can assume `\n`
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Text following the first `start` match up to the first `end` match (or the
/// end of input), trimmed. Empty captures count as no match.
fn section_after(start: &Regex, end: &Regex, text: &str) -> Option<String> {
    let heading = start.find(text)?;
    let rest = &text[heading.end()..];
    let stop = end.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    let section = rest[..stop].trim();
    (!section.is_empty()).then(|| section.to_string())
}

/// Find the part of a report that lists errors.
///
/// Tries a markdown `ERRORS` heading, then a bare `ERRORS` keyword, then
/// falls back to the whole report when it reads like an error listing.
pub(crate) fn locate_errors_section(text: &str) -> Result<Option<String>, ParserError> {
    let p = patterns()?;

    if let Some(section) = section_after(&p.errors_heading, &p.next_heading, text) {
        debug!("Errors section found under heading");
        return Ok(Some(section));
    }

    if let Some(section) = section_after(&p.errors_keyword, &p.blank_then_capital, text) {
        debug!("Errors section found after bare keyword");
        return Ok(Some(section));
    }

    if has_error_tokens(text) {
        debug!("No errors heading; treating the whole report as the errors section");
        return Ok(Some(text.trim().to_string()));
    }

    Ok(None)
}

/// Whether the report carries a markdown `ERRORS` heading anywhere
pub(crate) fn has_errors_heading(text: &str) -> Result<bool, ParserError> {
    Ok(patterns()?.errors_heading_loose.is_match(text))
}

/// Best-effort explanation text for a report. Never fails; falls back to a
/// fixed sentence when nothing suitable is found.
pub fn locate_explanation(text: &str) -> String {
    let normalized = normalize_newlines(text);
    match try_locate_explanation(&normalized) {
        Ok(Some(explanation)) => explanation,
        Ok(None) if !has_error_tokens(text) => text.to_string(),
        Ok(None) => NO_EXPLANATION.to_string(),
        Err(e) => {
            warn!("Failed to locate explanation: {}", e);
            EXPLANATION_PARSE_FAILURE.to_string()
        }
    }
}

fn try_locate_explanation(text: &str) -> Result<Option<String>, ParserError> {
    let p = patterns()?;

    if let Some(section) = section_after(&p.explanation_heading, &p.next_heading, text) {
        return Ok(Some(section));
    }

    if let Some(section) = section_after(&p.explanation_keyword, &p.blank_then_capital, text) {
        return Ok(Some(section));
    }

    if let Some(heading) = p.errors_heading_loose.find(text) {
        let before = text[..heading.start()].trim();
        if !before.is_empty() {
            return Ok(Some(before.to_string()));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "### 1. CODE EXPLANATION:\nThe program sums numbers.\n\n### 2. ERRORS\n1. Line 4: Syntax Error\nDescription: missing colon\n\n### 3. NOTES\nnothing";

    #[test]
    fn test_errors_under_numbered_heading() {
        let section = locate_errors_section(REPORT).unwrap().unwrap();
        assert_eq!(section, "1. Line 4: Syntax Error\nDescription: missing colon");
    }

    #[test]
    fn test_errors_after_bare_keyword() {
        let text = "Summary first.\n\nErrors:\n1. Line 2: A\n\n2. Line 9: B\n\nThanks for reading";
        let section = locate_errors_section(text).unwrap().unwrap();
        assert_eq!(section, "1. Line 2: A\n\n2. Line 9: B");
    }

    #[test]
    fn test_errors_whole_report_fallback() {
        let text = "There is an error on line 3.";
        assert_eq!(locate_errors_section(text).unwrap().as_deref(), Some(text));
    }

    #[test]
    fn test_errors_none() {
        assert!(locate_errors_section("All good here.").unwrap().is_none());
        assert!(locate_errors_section("").unwrap().is_none());
    }

    #[test]
    fn test_empty_heading_falls_through() {
        let text = "### ERRORS\n### NEXT\nstuff";
        // The heading is empty, the keyword form then captures the rest
        let section = locate_errors_section(text).unwrap().unwrap();
        assert_eq!(section, "### NEXT\nstuff");
    }

    #[test]
    fn test_explanation_heading() {
        assert_eq!(locate_explanation(REPORT), "The program sums numbers.");
    }

    #[test]
    fn test_explanation_keyword() {
        let text = "CODE EXPLANATION:\nIt parses input.\nThen prints.\n\nErrors below";
        assert_eq!(locate_explanation(text), "It parses input.\nThen prints.");
    }

    #[test]
    fn test_explanation_before_errors_heading() {
        let text = "This script copies files.\n### ERRORS\n- Line 3: Bad path";
        assert_eq!(locate_explanation(text), "This script copies files.");
    }

    #[test]
    fn test_explanation_plain_text_unchanged() {
        let text = "Just a description of what the code does.\r\n";
        assert_eq!(locate_explanation(text), text);
    }

    #[test]
    fn test_explanation_sentinel() {
        assert_eq!(locate_explanation("Error: line 3 is broken"), NO_EXPLANATION);
    }

    #[test]
    fn test_crlf_normalization() {
        let text = "### ERRORS\r\n- Line 3: Bad\r\n";
        let normalized = normalize_newlines(text);
        let section = locate_errors_section(&normalized).unwrap().unwrap();
        assert_eq!(section, "- Line 3: Bad");
    }
}
