use crate::cli::ParseArgs;
use reportsift::config::{Config, OutputFormat};
use reportsift::input::{decode_response, read_report};
use reportsift::output::{render_json, render_text};
use reportsift::parser::{locate_explanation, parse_with_options};
use std::path::Path;
use tracing::info;

pub fn execute(args: ParseArgs, config_path: &Path) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(config_path)?;

    // Apply CLI overrides
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(max_bytes) = args.max_bytes {
        config.max_report_bytes = Some(max_bytes);
    }

    config.validate()?;

    let raw = read_report(&args.file)?;
    let input = decode_response(&raw);
    let outcome = parse_with_options(&input, &config.parse_options());

    info!(
        "Parsed {:?}: {} errors ({} potential)",
        args.file,
        outcome.errors.len(),
        outcome.potential_count()
    );

    let explanation = args
        .with_explanation
        .then(|| locate_explanation(&input.report));

    match config.format {
        OutputFormat::Json => println!("{}", render_json(&outcome, explanation.as_deref())?),
        OutputFormat::Text => print!("{}", render_text(&outcome, explanation.as_deref())),
    }

    Ok(())
}
