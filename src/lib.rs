//! Translate a restricted SQL dialect into OData v4 Web API requests.
//!
//! ```
//! use sql_odata::{parse, to_request};
//!
//! let query = parse("SELECT a, b FROM foo WHERE x = 1 ORDER BY y LIMIT 10").unwrap();
//! let request = to_request(&query, "https://org.crm.dynamics.com").unwrap();
//!
//! assert_eq!(
//!     request.url(),
//!     "https://org.crm.dynamics.com/api/data/v9.2/foo?$select=a,b&$filter=x eq 1&$orderby=y asc&$top=10"
//! );
//! ```
pub mod ast;
pub mod cli;
pub mod execute;
pub mod lexer;
pub mod literal;
pub mod output;
pub mod parser;
pub mod request;
pub mod response;
pub mod translate;
pub mod value;

pub use ast::{Direction, Operation, OrderBy, Query};
pub use execute::{ExecuteError, Executor, HttpResponse, Outcome, Transport};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser, ParserConfig};
pub use request::{BuildError, BuilderConfig, HttpRequest, Method, MutationPlan, RequestBuilder};
pub use translate::translate_where_clause;
pub use value::Value;

/// Parse one statement with the default [`ParserConfig`].
pub fn parse(text: &str) -> Result<Query, ParseError> {
    Parser::new().parse(text)
}

/// Build the request for a query against `base_url` with the default
/// [`BuilderConfig`].
pub fn to_request(query: &Query, base_url: &str) -> Result<HttpRequest, BuildError> {
    RequestBuilder::new(base_url)?.build(query)
}
