//! Turns free-form code-analysis reports into ordered, typed error records.
//!
//! [`parser::parse_analysis_input`] is the core entry point; the other
//! modules wrap it for the `reportsift` command-line tool.

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
