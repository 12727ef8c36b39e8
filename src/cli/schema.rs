use crate::cli::{SchemaArgs, SchemaTarget};
use reportsift::config::Config;
use reportsift::parser::ParseOutcome;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Config => schema_for!(Config),
        SchemaTarget::Outcome => schema_for!(ParseOutcome),
    };
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{}", json);
    Ok(())
}
