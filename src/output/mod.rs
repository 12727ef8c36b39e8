mod report;
mod summary;

pub use report::{render_json, render_text, write_outcome_json};
pub use summary::{write_summary, FileSummary, SummaryReport};
