use crate::error::{BatchError, OutputError};
use crate::input::{decode_response, read_report};
use crate::output::write_outcome_json;
use crate::parser::{parse_with_options, ParseOptions, ParseOutcome};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct FileResult {
    /// Report path relative to the batch root
    pub file: PathBuf,
    pub status: FileStatus,
    pub outcome: ParseOutcome,
    pub output: Option<PathBuf>,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    Parsed,
    NoErrors,
    Failed { error: String },
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Parsed => write!(f, "parsed"),
            FileStatus::NoErrors => write!(f, "no_errors"),
            FileStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<FileResult>,
    pub total_duration: Duration,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub files: usize,
    pub errors: usize,
    pub potential: usize,
    pub not_in_code: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn totals(&self) -> BatchTotals {
        let mut totals = BatchTotals {
            files: self.results.len(),
            ..Default::default()
        };
        for result in &self.results {
            totals.errors += result.outcome.errors.len();
            totals.potential += result.outcome.potential_count();
            totals.not_in_code += result
                .outcome
                .errors
                .iter()
                .filter(|e| e.not_in_code)
                .count();
            if matches!(result.status, FileStatus::Failed { .. }) {
                totals.failed += 1;
            }
        }
        totals
    }
}

/// Output file name for a report: its relative path with directory
/// separators flattened, plus `.errors.json`
pub fn output_name(file: &Path) -> String {
    let stem = file
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("__");
    format!("{}.errors.json", stem)
}

/// Output names for a batch, in `files` order. A name already taken gets a
/// numeric suffix.
fn output_names(files: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    files
        .iter()
        .map(|file| {
            let name = output_name(file);
            if taken.insert(name.clone()) {
                return name;
            }
            let stem = name.strip_suffix(".errors.json").unwrap_or(&name);
            let mut n = 2;
            loop {
                let candidate = format!("{}-{}.errors.json", stem, n);
                if taken.insert(candidate.clone()) {
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}

pub struct BatchRunner {
    options: ParseOptions,
    concurrency: usize,
    semaphore: Arc<Semaphore>,
}

impl BatchRunner {
    pub fn new(concurrency: usize, options: ParseOptions) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            options,
            concurrency,
            semaphore: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Parse every file (relative to `root`) and write one JSON outcome per
    /// file into `out_dir` as results arrive.
    pub async fn run(
        &self,
        root: &Path,
        files: Vec<PathBuf>,
        out_dir: &Path,
    ) -> Result<BatchReport, BatchError> {
        let start = Instant::now();

        if files.is_empty() {
            return Err(BatchError::NoReports(root.to_path_buf()));
        }

        std::fs::create_dir_all(out_dir).map_err(OutputError::CreateDir)?;

        info!(
            "Parsing {} reports with concurrency {}",
            files.len(),
            self.concurrency
        );

        let names = output_names(&files);
        let mut futures = FuturesUnordered::new();

        for (file, name) in files.into_iter().zip(names) {
            let permit = self.semaphore.clone().acquire_owned().await?;
            let path = root.join(&file);
            let options = self.options;

            futures.push(tokio::task::spawn_blocking(move || {
                let _permit = permit; // hold until done
                (name, parse_file(file, &path, &options))
            }));
        }

        let mut results = Vec::new();
        while let Some(joined) = futures.next().await {
            match joined {
                Ok((name, mut result)) => {
                    if !matches!(result.status, FileStatus::Failed { .. }) {
                        match write_outcome_json(out_dir, &name, &result.outcome) {
                            Ok(path) => {
                                debug!("Wrote {}", path.display());
                                result.output = Some(path);
                            }
                            Err(e) => {
                                warn!("Failed to write outcome for {:?}: {}", result.file, e);
                                result.status = FileStatus::Failed {
                                    error: e.to_string(),
                                };
                            }
                        }
                    }

                    info!(
                        "{:?}: {} errors ({})",
                        result.file,
                        result.outcome.errors.len(),
                        result.status
                    );
                    results.push(result);
                }
                Err(e) => {
                    warn!("Parse task panicked: {}", e);
                }
            }
        }

        results.sort_by(|a, b| a.file.cmp(&b.file));

        Ok(BatchReport {
            results,
            total_duration: start.elapsed(),
        })
    }
}

fn parse_file(file: PathBuf, path: &Path, options: &ParseOptions) -> FileResult {
    let start = Instant::now();

    match read_report(path) {
        Ok(raw) => {
            let input = decode_response(&raw);
            let outcome = parse_with_options(&input, options);
            let status = if outcome.errors.is_empty() {
                FileStatus::NoErrors
            } else {
                FileStatus::Parsed
            };
            FileResult {
                file,
                status,
                outcome,
                output: None,
                duration: start.elapsed(),
            }
        }
        Err(e) => {
            warn!("Skipping {:?}: {}", file, e);
            FileResult {
                file,
                status: FileStatus::Failed {
                    error: e.to_string(),
                },
                outcome: ParseOutcome::default(),
                output: None,
                duration: start.elapsed(),
            }
        }
    }
}
