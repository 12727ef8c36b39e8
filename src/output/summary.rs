use crate::batch::{BatchReport, BatchTotals, FileStatus};
use crate::error::OutputError;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub timestamp: String,
    pub root: String,
    pub duration_sec: f64,
    pub files: Vec<FileSummary>,
    pub totals: BatchTotals,
    pub failed: Vec<String>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub status: String,
    pub duration_sec: f64,
    pub errors: usize,
    pub potential: usize,
    pub not_in_code: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Write `summary.json` and `summary.md` for a finished batch
pub fn write_summary(
    out_dir: &Path,
    report: &BatchReport,
    root: &Path,
) -> Result<SummaryReport, OutputError> {
    fs::create_dir_all(out_dir).map_err(OutputError::CreateDir)?;

    let summary = build_summary(report, out_dir.to_path_buf(), root);

    let json_path = out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&json_path, json).map_err(OutputError::Write)?;

    let md_path = out_dir.join("summary.md");
    fs::write(&md_path, build_summary_markdown(&summary)).map_err(OutputError::Write)?;

    Ok(summary)
}

fn build_summary(report: &BatchReport, out_dir: PathBuf, root: &Path) -> SummaryReport {
    let mut files = Vec::new();
    let mut failed = Vec::new();

    for result in &report.results {
        let name = result.file.display().to_string();

        let (status, reason) = match &result.status {
            FileStatus::Parsed => ("parsed".to_string(), None),
            FileStatus::NoErrors => (
                "no_errors".to_string(),
                Some(result.outcome.explanation_fallback_text.clone()).filter(|r| !r.is_empty()),
            ),
            FileStatus::Failed { error } => {
                failed.push(name.clone());
                ("failed".to_string(), Some(error.clone()))
            }
        };

        files.push(FileSummary {
            file: name,
            status,
            duration_sec: result.duration.as_secs_f64(),
            errors: result.outcome.errors.len(),
            potential: result.outcome.potential_count(),
            not_in_code: result.outcome.errors.iter().filter(|e| e.not_in_code).count(),
            output: result.output.clone(),
            reason,
        });
    }

    SummaryReport {
        timestamp: Utc::now().to_rfc3339(),
        root: root.display().to_string(),
        duration_sec: report.total_duration.as_secs_f64(),
        files,
        totals: report.totals(),
        failed,
        out_dir,
    }
}

fn build_summary_markdown(summary: &SummaryReport) -> String {
    let mut md = String::new();

    md.push_str("# reportsift Summary\n\n");
    md.push_str(&format!("**Generated:** {}\n", summary.timestamp));
    md.push_str(&format!("**Reports:** {}\n", summary.root));
    md.push_str(&format!("**Output Dir:** {}\n", summary.out_dir.display()));
    md.push_str(&format!("**Duration:** {:.1}s\n\n", summary.duration_sec));

    md.push_str("## Totals\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Files | {} |\n", summary.totals.files));
    md.push_str(&format!("| Errors | {} |\n", summary.totals.errors));
    md.push_str(&format!("| Potential | {} |\n", summary.totals.potential));
    md.push_str(&format!("| Not in code | {} |\n", summary.totals.not_in_code));
    md.push_str(&format!("| Failed files | {} |\n\n", summary.totals.failed));

    md.push_str("## Files\n\n");
    md.push_str("| File | Status | Errors |\n");
    md.push_str("|------|--------|--------|\n");

    for file in &summary.files {
        let status_icon = match file.status.as_str() {
            "parsed" => "✅",
            "no_errors" => "➖",
            "failed" => "❌",
            _ => "❓",
        };

        let status_str = match &file.reason {
            Some(reason) => format!("{} {} ({})", status_icon, file.status, reason),
            None => format!("{} {}", status_icon, file.status),
        };

        let errors_str = format!(
            "{} ({} potential, {} not in code)",
            file.errors, file.potential, file.not_in_code
        );

        md.push_str(&format!(
            "| {} | {} | {} |\n",
            file.file, status_str, errors_str
        ));
    }

    if !summary.failed.is_empty() {
        md.push_str("\n## Failed Files\n\n");
        for name in &summary.failed {
            md.push_str(&format!("- {}\n", name));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileResult;
    use crate::parser::{parse_analysis, ParseOutcome};
    use std::time::Duration;

    fn sample_report() -> BatchReport {
        BatchReport {
            results: vec![
                FileResult {
                    file: PathBuf::from("a.txt"),
                    status: FileStatus::Parsed,
                    outcome: parse_analysis("### ERRORS\n- Line 2: Bad\n- Potential error (Line 4): Maybe"),
                    output: Some(PathBuf::from("parsed/a.errors.json")),
                    duration: Duration::from_millis(5),
                },
                FileResult {
                    file: PathBuf::from("b.txt"),
                    status: FileStatus::Failed {
                        error: "unreadable".to_string(),
                    },
                    outcome: ParseOutcome::default(),
                    output: None,
                    duration: Duration::from_millis(1),
                },
            ],
            total_duration: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_build_summary_counts() {
        let summary = build_summary(&sample_report(), PathBuf::from("parsed"), Path::new("reports"));

        assert_eq!(summary.totals.files, 2);
        assert_eq!(summary.totals.errors, 2);
        assert_eq!(summary.totals.potential, 1);
        assert_eq!(summary.totals.failed, 1);
        assert_eq!(summary.failed, vec!["b.txt".to_string()]);
        assert_eq!(summary.files[1].reason.as_deref(), Some("unreadable"));
    }

    #[test]
    fn test_write_summary_files() {
        let dir = tempfile::tempdir().unwrap();
        write_summary(dir.path(), &sample_report(), Path::new("reports")).unwrap();

        let json = fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totals"]["errors"], 2);

        let md = fs::read_to_string(dir.path().join("summary.md")).unwrap();
        assert!(md.contains("| a.txt | ✅ parsed | 2 (1 potential, 0 not in code) |"));
        assert!(md.contains("## Failed Files\n\n- b.txt"));
    }
}
