use crate::cli::ExplainArgs;
use reportsift::input::{decode_response, read_report};
use reportsift::parser::locate_explanation;

pub fn execute(args: ExplainArgs) -> anyhow::Result<()> {
    let raw = read_report(&args.file)?;
    let input = decode_response(&raw);
    println!("{}", locate_explanation(&input.report));
    Ok(())
}
