//! Build the OData request for a statement

use super::{CliError, parse::parser_config, to_json_string};
use crate::{
    BuilderConfig, Parser, Query, RequestBuilder,
    output::{mutation_plan_to_json, request_to_http},
    request::MutationPlan,
};

/// How a request is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Descriptor object (method, url, headers, body)
    #[default]
    Json,
    /// HTTP/1.1 request text
    Http,
}

/// Options for the request command
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// The SQL statement
    pub query: String,
    /// Service root, e.g. `https://org.crm.dynamics.com`
    pub base_url: String,
    /// Web API version; `None` uses the default
    pub api_version: Option<String>,
    pub format: OutputFormat,
    /// Percent-encode query option values
    pub encoded: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Reject arity mismatches and unscoped UPDATE/DELETE
    pub strict: bool,
}

/// Parse the statement and render its request.
///
/// UPDATE/DELETE filters that do not name one record render the
/// retrieve-then-mutate plan instead of failing.
pub fn execute_request(options: &RequestOptions) -> Result<String, CliError> {
    let query = Parser::with_config(parser_config(options.strict)).parse(&options.query)?;

    let mut config = BuilderConfig::default();
    if let Some(version) = &options.api_version {
        config.api_version = version.clone();
    }
    let builder = RequestBuilder::with_config(&options.base_url, config)?;

    let plan = match &query {
        Query::Update(_) | Query::Delete(_) => builder.plan_mutation(&query)?,
        _ => MutationPlan::Direct(builder.build(&query)?),
    };

    match (options.format, &plan) {
        (OutputFormat::Json, plan) => {
            to_json_string(&mutation_plan_to_json(plan, options.encoded), options.pretty)
        }
        (OutputFormat::Http, MutationPlan::Direct(request)) => {
            Ok(request_to_http(request, options.encoded))
        }
        (OutputFormat::Http, MutationPlan::Bulk(bulk)) => {
            let template = bulk.request_for(&format!("<{}>", bulk.key_field));
            Ok(format!(
                "{}\n# then, for each {} returned:\n{}",
                request_to_http(&bulk.lookup, options.encoded),
                bulk.key_field,
                request_to_http(&template, false)
            ))
        }
    }
}
