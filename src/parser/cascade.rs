use super::record::ErrorRecord;
use super::{hyphen, numbered, paragraph};
use crate::error::ParserError;
use tracing::debug;

/// A format-specific extractor. Returns an empty list when the section is not
/// in its format.
pub type Strategy = fn(&str) -> Result<Vec<ErrorRecord>, ParserError>;

/// Extractors in priority order
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("numbered", numbered::extract),
    ("hyphen", hyphen::extract),
    ("paragraph", paragraph::extract),
];

/// Run the extractors over an errors section, keeping the first non-empty
/// result
pub fn run_cascade(section: &str) -> Result<Vec<ErrorRecord>, ParserError> {
    run_strategies(STRATEGIES, section)
}

fn run_strategies(
    strategies: &[(&str, Strategy)],
    section: &str,
) -> Result<Vec<ErrorRecord>, ParserError> {
    for (name, strategy) in strategies {
        let records = strategy(section)?;
        if !records.is_empty() {
            debug!("{} extractor produced {} records", name, records.len());
            return Ok(records);
        }
        debug!("{} extractor found nothing", name);
    }
    Ok(Vec::new())
}
