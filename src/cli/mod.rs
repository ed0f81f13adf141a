//! CLI support for sql-odata
//!
//! Provides programmatic access to the `sqlo` commands so other tools can
//! embed them without spawning a process.

mod docs;
mod parse;
mod request;

pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use parse::{ParseOptions, execute_parse};
pub use request::{OutputFormat, RequestOptions, execute_request};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Request error: {0}")]
    Build(#[from] crate::BuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'sqlo docs' to see available categories.")]
    UnknownCategory(String),
}

fn to_json_string(value: &serde_json::Value, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    Ok(json)
}
