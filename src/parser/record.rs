use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Line sentinel for records whose location could not be determined
pub const UNKNOWN_LINE: &str = "?";

pub const DEFAULT_TYPE: &str = "Error";
pub const UNKNOWN_TYPE: &str = "Unknown Error";
pub const NO_DESCRIPTION: &str = "No description provided";

/// A single issue extracted from an analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Decimal line number, or `"?"` when unknown
    pub line: String,

    #[serde(rename = "type")]
    pub error_type: String,

    pub description: String,

    #[serde(default)]
    pub solution: String,

    #[serde(default)]
    pub is_potential: bool,

    #[serde(default)]
    pub not_in_code: bool,

    /// Display ordinal, assigned after sorting
    #[serde(default)]
    pub index: usize,
}

impl ErrorRecord {
    /// Ordering key for a decimal line of any length: significant digit
    /// count, then the digits. `None` when the line is not a number.
    pub fn line_key(&self) -> Option<(usize, &str)> {
        let digits = decimal_digits(&self.line)?;
        Some((digits.len(), digits))
    }
}

/// `text` as a decimal without leading zeros, if it is all ASCII digits
fn decimal_digits(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.trim_start_matches('0'))
}

/// Line field as sent by the analysis service. Usually a number, sometimes a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum LineValue {
    Number(f64),
    Text(String),
}

impl LineValue {
    /// Render as record line text. Zero, negative, fractional and
    /// non-numeric values have no usable location.
    pub fn to_line_text(&self) -> Option<String> {
        match self {
            LineValue::Number(n) => {
                // `{:.0}` prints the exact integer, even past u64::MAX
                if n.is_finite() && *n >= 1.0 && n.fract() == 0.0 {
                    Some(format!("{:.0}", n))
                } else {
                    None
                }
            }
            LineValue::Text(s) => decimal_digits(s)
                .filter(|digits| !digits.is_empty())
                .map(str::to_string),
        }
    }
}

/// Pre-structured error object supplied directly by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawErrorEntry {
    #[serde(default)]
    pub line: Option<LineValue>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, alias = "fix")]
    pub solution: Option<String>,

    #[serde(default)]
    pub is_potential: Option<bool>,
}

/// Everything the parser needs from one analysis response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisInput {
    pub report: String,
    pub errors: Vec<RawErrorEntry>,
}

impl AnalysisInput {
    pub fn from_report(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(report: impl Into<String>, errors: Vec<RawErrorEntry>) -> Self {
        Self {
            report: report.into(),
            errors,
        }
    }
}

/// Result of parsing one analysis response.
///
/// At most one side is meaningful: either `errors` is non-empty, or
/// `explanation_fallback_text` says why there is nothing to show. Both are
/// empty only when there was nothing at all to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub errors: Vec<ErrorRecord>,
    pub explanation_fallback_text: String,
}

impl ParseOutcome {
    pub fn with_errors(errors: Vec<ErrorRecord>) -> Self {
        Self {
            errors,
            explanation_fallback_text: String::new(),
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            errors: Vec::new(),
            explanation_fallback_text: text.into(),
        }
    }

    pub fn potential_count(&self) -> usize {
        self.errors.iter().filter(|e| e.is_potential).count()
    }
}
