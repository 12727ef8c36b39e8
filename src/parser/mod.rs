//! Parser for free-form analysis reports.
//!
//! The entry point never fails: every input yields a [`ParseOutcome`], with
//! either ordered records or a fallback sentence explaining why there are
//! none.

mod cascade;
mod classify;
mod hyphen;
mod normalize;
mod numbered;
mod paragraph;
mod patterns;
mod record;
mod section;

pub use record::{
    AnalysisInput, ErrorRecord, LineValue, ParseOutcome, RawErrorEntry, DEFAULT_TYPE,
    NO_DESCRIPTION, UNKNOWN_LINE, UNKNOWN_TYPE,
};
pub use section::{locate_explanation, NO_EXPLANATION};

use crate::error::ParserError;
use section::{has_errors_heading, locate_errors_section, normalize_newlines};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub const NO_ERRORS_FOUND: &str = "No errors found in the code analysis.";
pub const NO_SPECIFIC_ERRORS: &str = "The analysis found no specific errors to report.";
pub const PARSE_FAILURE: &str = "Error parsing the code analysis response.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reports longer than this many bytes are truncated before parsing
    pub max_report_bytes: Option<usize>,
}

/// Parse a report given as plain text
pub fn parse_analysis(report: &str) -> ParseOutcome {
    parse_analysis_input(&AnalysisInput::from_report(report))
}

/// Parse one analysis response. Structured entries, when present, take
/// priority over the report text.
pub fn parse_analysis_input(input: &AnalysisInput) -> ParseOutcome {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &AnalysisInput, options: &ParseOptions) -> ParseOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| try_parse(input, options))) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            warn!("Failed to parse analysis: {}", e);
            ParseOutcome::fallback(PARSE_FAILURE)
        }
        Err(_) => {
            warn!("Parser panicked; returning fallback outcome");
            ParseOutcome::fallback(PARSE_FAILURE)
        }
    }
}

fn try_parse(input: &AnalysisInput, options: &ParseOptions) -> Result<ParseOutcome, ParserError> {
    if !input.errors.is_empty() {
        debug!("Using {} structured errors from the service", input.errors.len());
        let records = input
            .errors
            .iter()
            .map(normalize::normalize_entry)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ParseOutcome::with_errors(normalize::sort_and_index(records)));
    }

    let report = truncate_report(&input.report, options.max_report_bytes);
    let report = normalize_newlines(report);

    if !has_errors_heading(&report)? {
        let records = numbered::extract_inline(&report)?;
        if !records.is_empty() {
            debug!("Extracted {} inline numbered errors", records.len());
            return Ok(ParseOutcome::with_errors(finish(records)));
        }
    }

    let Some(section) = locate_errors_section(&report)? else {
        debug!("No errors section found in analysis");
        return Ok(ParseOutcome::fallback(NO_ERRORS_FOUND));
    };

    if classify::declares_no_errors(&section) {
        debug!("Errors section states there are no errors");
        return Ok(ParseOutcome::fallback(section));
    }

    let records = cascade::run_cascade(&section)?;
    if records.is_empty() {
        return Ok(ParseOutcome::fallback(NO_SPECIFIC_ERRORS));
    }

    Ok(ParseOutcome::with_errors(finish(records)))
}

fn finish(records: Vec<ErrorRecord>) -> Vec<ErrorRecord> {
    normalize::sort_and_index(records.into_iter().map(normalize::finalize).collect())
}

/// Cut the report to at most `cap` bytes on a char boundary
fn truncate_report(report: &str, cap: Option<usize>) -> &str {
    match cap {
        Some(max) if report.len() > max => {
            let mut end = max;
            while !report.is_char_boundary(end) {
                end -= 1;
            }
            warn!(
                "Report is {} bytes; truncating to {} before parsing",
                report.len(),
                end
            );
            &report[..end]
        }
        _ => report,
    }
}
