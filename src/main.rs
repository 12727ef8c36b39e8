use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        command,
        verbose,
        config,
    } = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if verbose {
        EnvFilter::new("reportsift=debug")
    } else {
        EnvFilter::new("reportsift=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Parse(args) => cli::parse::execute(args, &config),
        Commands::Explain(args) => cli::explain::execute(args),
        Commands::Batch(args) => cli::batch::execute(args, &config).await,
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
