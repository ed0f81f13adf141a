//! Parse a statement and print its structured form

use super::{CliError, to_json_string};
use crate::{Parser, ParserConfig};

/// Options for the parse command
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// The SQL statement
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Reject arity mismatches and unscoped UPDATE/DELETE
    pub strict: bool,
}

/// Parse the statement and render the resulting query as JSON.
pub fn execute_parse(options: &ParseOptions) -> Result<String, CliError> {
    let parser = Parser::with_config(parser_config(options.strict));
    let query = parser.parse(&options.query)?;
    to_json_string(&serde_json::to_value(&query)?, options.pretty)
}

pub(super) fn parser_config(strict: bool) -> ParserConfig {
    if strict {
        ParserConfig::strict()
    } else {
        ParserConfig::default()
    }
}
