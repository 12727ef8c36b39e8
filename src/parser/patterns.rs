//! Regular expressions shared by the locators and extractors.
//!
//! Compiled once per process. Inputs are normalized to `\n` line endings
//! before any of these run.

use crate::error::ParserError;
use regex::Regex;
use std::sync::LazyLock;

static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(Patterns::compile);

/// Shared pattern table, or the compile failure folded into a parser error
pub fn patterns() -> Result<&'static Patterns, ParserError> {
    PATTERNS
        .as_ref()
        .map_err(|e| ParserError::Pattern(e.to_string()))
}

pub struct Patterns {
    // Section locators
    pub errors_heading: Regex,
    pub errors_heading_loose: Regex,
    pub errors_keyword: Regex,
    pub explanation_heading: Regex,
    pub explanation_keyword: Regex,
    pub next_heading: Regex,
    pub blank_then_capital: Regex,

    // Shared field extraction
    pub line_number: Regex,

    // Numbered blocks
    pub numbered_marker: Regex,
    pub inline_marker: Regex,
    pub numeral_prefix: Regex,
    pub hedge_marker_prefix: Regex,
    pub hedged_line_ref_prefix: Regex,
    pub line_ref_prefix: Regex,
    pub type_label: Regex,
    pub description_label: Regex,
    pub fix_label: Regex,
    pub labeled_line: Regex,

    // Hyphen bullets
    pub bullet_line_ref: Regex,
    pub bullet_potential: Regex,
    pub bullet_description: Regex,
    pub bullet_solution: Regex,
    pub bullet: Regex,

    // Paragraphs
    pub paragraph_break: Regex,
    pub paragraph_description: Regex,
    pub paragraph_fix: Regex,

    // Structured entry fix-ups
    pub embedded_description: Regex,
    pub embedded_fix: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            errors_heading: Regex::new(
                r"(?m)^[ \t]*#{2,6}[ \t]*(?:\d+\.[ \t]*)?ERRORS:?[ \t]*\n",
            )?,
            errors_heading_loose: Regex::new(r"(?m)^[ \t]*#{2,6}[ \t]*(?:\d+\.[ \t]*)?ERRORS\b")?,
            errors_keyword: Regex::new(r"(?i)\berrors\b[:\s]*\n")?,
            explanation_heading: Regex::new(
                r"(?m)^[ \t]*#{2,6}[ \t]*(?:1\.[ \t]*)?CODE EXPLANATION:?[ \t]*\n",
            )?,
            explanation_keyword: Regex::new(r"(?i)\bcode explanation[:\s]*\n")?,
            next_heading: Regex::new(r"(?m)^[ \t]*#{2,6}[ \t]*\S")?,
            blank_then_capital: Regex::new(r"\n[ \t]*\n[A-Z]")?,

            line_number: Regex::new(r"(?i)\bline\s*:?\s*(\d+)")?,

            numbered_marker: Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+")?,
            inline_marker: Regex::new(
                r"(?:\d+\.\s+|(?:\d+\.\s+)?\(\s*[Pp]otential\s+error\s*\)\s+)Line\s+\d+\s*:",
            )?,
            numeral_prefix: Regex::new(r"^\d+[.)]\s*")?,
            hedge_marker_prefix: Regex::new(
                r"(?i)^(?:\(\s*(?:potential|possible)\s+error\s*\)|(?:potential|possible)\s+error\s*:)\s*",
            )?,
            hedged_line_ref_prefix: Regex::new(
                r"(?i)^(?:potential|possible)\s+error\s*\(\s*line\s*:?\s*\d+\s*\)\s*:?\s*",
            )?,
            line_ref_prefix: Regex::new(r"(?i)^(?:at\s+)?line\s*:?\s*\d+\s*[:.)\-]?\s*")?,
            type_label: Regex::new(
                r"(?i)\b(?:type\s+of\s+error|error\s+type|issue\s+type)\s*:[ \t]*(\S[^\n]*)",
            )?,
            description_label: Regex::new(
                r"(?i)\b(?:description|problem|issue):[ \t]*(\S[^\n]*(?:\n[ \t]+\S[^\n]*)*)",
            )?,
            fix_label: Regex::new(
                r"(?i)\b(?:how\s+to\s+fix|fix|solution):[ \t]*(\S[^\n]*(?:\n[ \t]+\S[^\n]*)*)",
            )?,
            labeled_line: Regex::new(
                r"(?i)^\s*(?:fix|solution|how\s+to\s+fix|type|type\s+of\s+error|error\s+type|issue\s+type|line)\s*:",
            )?,

            bullet_line_ref: Regex::new(r"(?i)^-\s*(?:at\s+)?line\s+(\d+)\s*:\s*`?([^`]+)")?,
            bullet_potential: Regex::new(
                r"(?i)^-\s*(?:potential|possible)\s+error\s*\(\s*line\s+(\d+)\s*\)\s*:\s*`?([^`]+)",
            )?,
            bullet_description: Regex::new(r"(?i)^-\s*description:\s*(.*)$")?,
            bullet_solution: Regex::new(r"(?i)^-\s*(?:fix|solution):\s*(.*)$")?,
            bullet: Regex::new(r"^-\s+(.+)$")?,

            paragraph_break: Regex::new(r"\n\s*\n")?,
            paragraph_description: Regex::new(
                r"(?i)\b(?:description|issue|problem):[ \t]*(\S[^\n]*)",
            )?,
            paragraph_fix: Regex::new(
                r"(?i)(?:\bhow\s+to\s+fix|\bto\s+fix\s+this|\bfix|\bsolution):[ \t]*(\S[^\n]*)",
            )?,

            embedded_description: Regex::new(r"\s*-\s*Description:?\s*")?,
            embedded_fix: Regex::new(r"\s*(?:-\s*)?(?:Fix|Solution):\s*")?,
        })
    }
}

/// First capture group of `re` in `text`, trimmed, if non-empty
pub fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
