use crate::cli::BatchArgs;
use reportsift::batch::BatchRunner;
use reportsift::config::Config;
use reportsift::discovery::{discover_reports, exclude_under};
use reportsift::output::write_summary;
use std::path::Path;
use tracing::{info, warn};

pub async fn execute(args: BatchArgs, config_path: &Path) -> anyhow::Result<()> {
    info!("Loading config from {:?}", config_path);
    let mut config = Config::load_or_default(config_path)?;

    // Apply CLI overrides
    if let Some(concurrency) = args.concurrency {
        config.batch.concurrency = concurrency;
    }
    if let Some(out_dir) = args.out_dir {
        config.batch.out_dir = out_dir;
    }

    config.validate()?;

    let out_dir = config.batch.out_dir.clone();
    let files = discover_reports(&args.dir, &config.batch.include, &config.batch.exclude)?;

    // Earlier outputs written under the scanned directory are not reports
    let files = exclude_under(&args.dir, files, &out_dir);

    info!("Found {} reports in {:?}", files.len(), args.dir);
    info!("Outputs will be written to {:?}", out_dir);

    let runner = BatchRunner::new(config.batch.concurrency, config.parse_options());
    let report = runner.run(&args.dir, files, &out_dir).await?;
    let summary = write_summary(&out_dir, &report, &args.dir)?;

    let totals = &summary.totals;
    info!(
        "Completed in {:.1}s: {} errors ({} potential) across {} reports",
        summary.duration_sec, totals.errors, totals.potential, totals.files
    );
    if totals.failed > 0 {
        warn!("{} reports could not be parsed: {:?}", totals.failed, summary.failed);
    }

    println!(
        "Parsed {} reports: {} errors ({} potential, {} not in code), {} failed -> {}",
        totals.files,
        totals.errors,
        totals.potential,
        totals.not_in_code,
        totals.failed,
        out_dir.display()
    );

    Ok(())
}
