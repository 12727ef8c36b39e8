mod orchestrator;

pub use orchestrator::{output_name, BatchReport, BatchRunner, BatchTotals, FileResult, FileStatus};
