use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportsiftError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unsupported config version {0}")]
    UnsupportedVersion(u32),

    #[error("Batch concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("max_report_bytes must be greater than zero when set")]
    ZeroReportCap,

    #[error("Invalid glob pattern '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read report '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read report from stdin: {0}")]
    Stdin(std::io::Error),
}

/// Internal parser faults. These never leave the parser's entry point; they
/// are folded into a fallback outcome.
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to compile pattern: {0}")]
    Pattern(String),
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to build glob pattern '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Report directory not found: {0}")]
    MissingDir(PathBuf),
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No report files matched in {0}")]
    NoReports(PathBuf),

    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write output: {0}")]
    Write(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
