use crate::error::OutputError;
use crate::parser::{ErrorRecord, ParseOutcome, UNKNOWN_LINE};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrintedOutcome<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a str>,
    #[serde(flatten)]
    outcome: &'a ParseOutcome,
}

/// Pretty JSON for one outcome, with the explanation alongside when given
pub fn render_json(outcome: &ParseOutcome, explanation: Option<&str>) -> Result<String, OutputError> {
    let printed = PrintedOutcome {
        explanation,
        outcome,
    };
    Ok(serde_json::to_string_pretty(&printed)?)
}

/// Human-readable listing of an outcome
pub fn render_text(outcome: &ParseOutcome, explanation: Option<&str>) -> String {
    let mut content = String::new();

    if let Some(explanation) = explanation {
        content.push_str("Explanation\n");
        content.push_str("-----------\n");
        content.push_str(explanation.trim());
        content.push_str("\n\n");
    }

    if outcome.errors.is_empty() {
        if !outcome.explanation_fallback_text.is_empty() {
            content.push_str(&outcome.explanation_fallback_text);
            content.push('\n');
        }
        return content;
    }

    content.push_str(&format!(
        "{} errors ({} potential)\n\n",
        outcome.errors.len(),
        outcome.potential_count()
    ));

    for record in &outcome.errors {
        content.push_str(&format_record(record));
    }

    content
}

fn format_record(record: &ErrorRecord) -> String {
    let mut block = String::new();

    let location = if record.line == UNKNOWN_LINE {
        "line ?".to_string()
    } else {
        format!("line {}", record.line)
    };

    let mut tags = Vec::new();
    if record.is_potential {
        tags.push("potential");
    }
    if record.not_in_code {
        tags.push("not in code");
    }

    block.push_str(&format!(
        "{}. [{}] {}",
        record.index + 1,
        location,
        record.error_type
    ));
    if !tags.is_empty() {
        block.push_str(&format!(" ({})", tags.join(", ")));
    }
    block.push('\n');
    block.push_str(&format!("   {}\n", record.description));
    if !record.solution.is_empty() {
        block.push_str(&format!("   Fix: {}\n", record.solution));
    }
    block.push('\n');

    block
}

/// Write one outcome as `<dir>/<name>`
pub fn write_outcome_json(
    dir: &Path,
    name: &str,
    outcome: &ParseOutcome,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(OutputError::CreateDir)?;

    let path = dir.join(name);
    let json = serde_json::to_string_pretty(outcome)?;
    fs::write(&path, json).map_err(OutputError::Write)?;

    Ok(path)
}
