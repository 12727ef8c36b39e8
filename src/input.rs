use crate::error::InputError;
use crate::parser::{AnalysisInput, RawErrorEntry};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a saved report from a file, or from stdin when the path is `-`
pub fn read_report(path: &Path) -> Result<String, InputError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(InputError::Stdin)?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).map_err(|e| InputError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Response body of the analysis service
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    errors: Option<Vec<RawErrorEntry>>,
}

/// Turn a saved response into parser input. JSON envelopes carrying
/// `explanation` and/or `errors` are unpacked; anything else is taken as the
/// raw report text.
pub fn decode_response(raw: &str) -> AnalysisInput {
    // CLI wrappers put the model output in {"result": "...", ...}
    #[derive(Deserialize)]
    struct WrappedOutput {
        result: String,
    }

    if let Ok(wrapped) = serde_json::from_str::<WrappedOutput>(raw.trim()) {
        if let Some(input) = decode_envelope(&wrapped.result) {
            return input;
        }
        return AnalysisInput::from_report(wrapped.result);
    }

    decode_envelope(raw).unwrap_or_else(|| AnalysisInput::from_report(raw))
}

fn decode_envelope(s: &str) -> Option<AnalysisInput> {
    let json_str = extract_json(s)?;

    match serde_json::from_str::<ServiceResponse>(&json_str) {
        Ok(ServiceResponse {
            explanation: None,
            errors: None,
        }) => None,
        Ok(response) => {
            let errors = response.errors.unwrap_or_default();
            debug!(
                "Decoded service response with {} structured errors",
                errors.len()
            );
            Some(AnalysisInput::with_errors(
                response.explanation.unwrap_or_default(),
                errors,
            ))
        }
        Err(e) => {
            debug!("Not a service response envelope: {}", e);
            None
        }
    }
}

/// Extract a JSON object from a string that might wrap it in a markdown code
/// block or surrounding prose
fn extract_json(s: &str) -> Option<String> {
    let trimmed = s.trim();

    // First try: the whole string is valid JSON
    if trimmed.starts_with('{') && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return Some(trimmed.to_string());
    }

    // Second try: a fenced block
    let re = regex::Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").ok()?;
    for cap in re.captures_iter(s) {
        let candidate = cap.get(1)?.as_str().trim();
        if candidate.starts_with('{') && serde_json::from_str::<serde_json::Value>(candidate).is_ok()
        {
            return Some(candidate.to_string());
        }
    }

    // Third try: first balanced object
    let brace_start = s.find('{')?;
    let mut depth = 0;
    let mut end = brace_start;

    for (i, c) in s[brace_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = brace_start + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    if depth == 0 && end > brace_start {
        let candidate = &s[brace_start..end];
        if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
            return Some(candidate.to_string());
        }
    }

    None
}
