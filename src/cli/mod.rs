pub mod batch;
pub mod explain;
pub mod parse;
pub mod schema;

use clap::{Parser, Subcommand, ValueEnum};
use reportsift::config::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reportsift")]
#[command(
    author,
    version,
    about = "Turn free-form code-analysis reports into ordered error records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (defaults apply when it does not exist)
    #[arg(
        short,
        long,
        global = true,
        env = "REPORTSIFT_CONFIG",
        default_value = "reportsift.yaml"
    )]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one saved analysis response and print its error records
    Parse(ParseArgs),

    /// Print the explanation part of a saved analysis response
    Explain(ExplainArgs),

    /// Parse every report in a directory
    Batch(BatchArgs),

    /// Print JSON Schema for the config file or the parse outcome
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct ParseArgs {
    /// Report file, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Override the output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Include the located explanation in the output
    #[arg(long)]
    pub with_explanation: bool,

    /// Override the report size cap, in bytes
    #[arg(long)]
    pub max_bytes: Option<usize>,
}

#[derive(Parser, Clone)]
pub struct ExplainArgs {
    /// Report file, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser, Clone)]
pub struct BatchArgs {
    /// Directory of saved reports
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Override output directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Override max parallel parses
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Which schema to print
    #[arg(long, value_enum, default_value_t = SchemaTarget::Config)]
    pub target: SchemaTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    Config,
    Outcome,
}
