//! Turning a [`Query`] into an OData v4 Web API request.
//!
//! | Query  | Method | Target                           | Body        |
//! |--------|--------|----------------------------------|-------------|
//! | SELECT | GET    | `<entity>?$select&$filter&...`   | -           |
//! | INSERT | POST   | `<entity>`                       | `values`    |
//! | UPDATE | PATCH  | `<entity>(<id>)`                 | `values`    |
//! | DELETE | DELETE | `<entity>(<id>)`                 | -           |
//!
//! UPDATE and DELETE address one record. The id is taken from a filter of the
//! form `<field>id eq '<value>'`; any other filter has to go through
//! [`RequestBuilder::plan_mutation`], which resolves the matching ids with a
//! lookup query first.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::ast::{Operation, Query, SelectQuery, query::Values};

pub const DEFAULT_API_VERSION: &str = "9.2";

static RECORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\w+id\s+eq\s+'([^']*)'\s*$").expect("record id pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready for an HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Resource URL without query string
    pub endpoint: String,
    /// OData system query options, in emission order
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// JSON-encoded body for POST and PATCH
    pub body: Option<String>,
}

impl HttpRequest {
    fn new(method: Method, endpoint: String, params: Vec<(String, String)>, body: Option<String>) -> Self {
        HttpRequest {
            method,
            endpoint,
            params,
            headers: odata_headers(body.is_some()),
            body,
        }
    }

    /// A plain GET of an absolute URL, used to follow `@odata.nextLink`.
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest::new(Method::Get, url.into(), Vec::new(), None)
    }

    /// URL with parameter values as written, e.g. `$filter=x eq 1`.
    pub fn url(&self) -> String {
        self.render_url(|value| value.to_string())
    }

    /// URL with parameter values percent-encoded for the wire.
    pub fn encoded_url(&self) -> String {
        self.render_url(|value| urlencoding::encode(value).into_owned())
    }

    fn render_url(&self, encode: impl Fn(&str) -> String) -> String {
        if self.params.is_empty() {
            return self.endpoint.clone();
        }
        let query: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode(value)))
            .collect();
        format!("{}?{}", self.endpoint, query.join("&"))
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn odata_headers(has_body: bool) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Accept".to_string(), "application/json".to_string()),
        ("OData-MaxVersion".to_string(), "4.0".to_string()),
        ("OData-Version".to_string(), "4.0".to_string()),
    ];
    if has_body {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }
    headers
}

/// Errors that can occur while building a request.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{operation} on '{entity}' requires a WHERE clause")]
    MissingFilter { operation: Operation, entity: String },

    #[error(
        "{operation} on '{entity}' cannot target a single record from filter '{filter}'; \
         use a <entity>id eq '<id>' filter or resolve the matching records first"
    )]
    AmbiguousTarget {
        operation: Operation,
        entity: String,
        filter: String,
    },

    #[error("{0} is not an UPDATE or DELETE")]
    NotAMutation(Operation),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Request builder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Web API version segment, without the `v`
    pub api_version: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// How an UPDATE or DELETE reaches its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPlan {
    /// The filter named one record by id
    Direct(HttpRequest),
    /// Ids must be looked up first, then mutated one by one
    Bulk(BulkPlan),
}

/// Retrieve-then-mutate plan for a filter that does not name a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPlan {
    pub operation: Operation,
    /// GET selecting only the key field of every matching record
    pub lookup: HttpRequest,
    /// Key field read from each lookup result, `<entity>id`
    pub key_field: String,
    collection: String,
    body: Option<String>,
}

impl BulkPlan {
    /// The PATCH or DELETE for one resolved record.
    pub fn request_for(&self, id: &str) -> HttpRequest {
        let method = match self.operation {
            Operation::Delete => Method::Delete,
            _ => Method::Patch,
        };
        HttpRequest::new(
            method,
            record_endpoint(&self.collection, id),
            Vec::new(),
            self.body.clone(),
        )
    }
}

/// Builds requests against one service root.
///
/// ```
/// use sql_odata::{parse, RequestBuilder};
///
/// let builder = RequestBuilder::new("https://org.crm.dynamics.com").unwrap();
/// let query = parse("SELECT name FROM accounts WHERE revenue > 1000").unwrap();
/// let request = builder.build(&query).unwrap();
///
/// assert_eq!(request.method.as_str(), "GET");
/// assert_eq!(
///     request.url(),
///     "https://org.crm.dynamics.com/api/data/v9.2/accounts?$select=name&$filter=revenue gt 1000"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    config: BuilderConfig,
}

impl RequestBuilder {
    pub fn new(base_url: &str) -> Result<Self, BuildError> {
        RequestBuilder::with_config(base_url, BuilderConfig::default())
    }

    /// An empty base URL yields host-relative URLs (`/api/data/...`).
    pub fn with_config(base_url: &str, config: BuilderConfig) -> Result<Self, BuildError> {
        let trimmed = base_url.trim();
        if trimmed.contains(['?', '#']) || trimmed.chars().any(char::is_whitespace) {
            return Err(BuildError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(RequestBuilder {
            base_url: trimmed.trim_end_matches('/').to_string(),
            config,
        })
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// `<base>/api/data/v<version>/<entity>`
    pub fn collection_url(&self, entity: &str) -> String {
        format!(
            "{}/api/data/v{}/{}",
            self.base_url, self.config.api_version, entity
        )
    }

    /// Build the single request for a query.
    ///
    /// UPDATE and DELETE succeed only when the filter names one record; see
    /// [`RequestBuilder::plan_mutation`] for the general case.
    pub fn build(&self, query: &Query) -> Result<HttpRequest, BuildError> {
        let request = match query {
            Query::Select(select) => self.select(select),
            Query::Insert(insert) => HttpRequest::new(
                Method::Post,
                self.collection_url(&insert.entity),
                Vec::new(),
                Some(encode_body(&insert.values)?),
            ),
            Query::Update(_) | Query::Delete(_) => match self.plan_mutation(query)? {
                MutationPlan::Direct(request) => request,
                MutationPlan::Bulk(_) => {
                    return Err(BuildError::AmbiguousTarget {
                        operation: query.operation(),
                        entity: query.entity().to_string(),
                        filter: query.filter().unwrap_or_default().to_string(),
                    });
                }
            },
        };

        debug!(method = %request.method, url = %request.url(), "built request");
        Ok(request)
    }

    /// Resolve how an UPDATE or DELETE reaches its records.
    pub fn plan_mutation(&self, query: &Query) -> Result<MutationPlan, BuildError> {
        let (method, values) = match query {
            Query::Update(update) => (Method::Patch, Some(&update.values)),
            Query::Delete(_) => (Method::Delete, None),
            other => return Err(BuildError::NotAMutation(other.operation())),
        };
        let entity = query.entity();

        let filter = query.filter().ok_or_else(|| BuildError::MissingFilter {
            operation: query.operation(),
            entity: entity.to_string(),
        })?;

        let body = values.map(encode_body).transpose()?;
        let collection = self.collection_url(entity);

        if let Some(id) = extract_record_id(filter) {
            debug!(%entity, %id, "filter names a single record");
            return Ok(MutationPlan::Direct(HttpRequest::new(
                method,
                record_endpoint(&collection, &id),
                Vec::new(),
                body,
            )));
        }

        let key_field = format!("{entity}id");
        let lookup = self.select(&SelectQuery {
            entity: entity.to_string(),
            fields: vec![key_field.clone()],
            filter: Some(filter.to_string()),
            order_by: None,
            limit: None,
        });

        debug!(%entity, %filter, "filter needs a lookup before mutating");
        Ok(MutationPlan::Bulk(BulkPlan {
            operation: query.operation(),
            lookup,
            key_field,
            collection,
            body,
        }))
    }

    fn select(&self, select: &SelectQuery) -> HttpRequest {
        let mut params = Vec::new();

        if !select.selects_all() {
            params.push(("$select".to_string(), select.fields.join(",")));
        }
        if let Some(filter) = &select.filter {
            params.push(("$filter".to_string(), filter.clone()));
        }
        if let Some(order_by) = &select.order_by {
            let order: Vec<String> = order_by.iter().map(|o| o.to_odata()).collect();
            params.push(("$orderby".to_string(), order.join(",")));
        }
        if let Some(limit) = select.limit {
            params.push(("$top".to_string(), limit.to_string()));
        }

        HttpRequest::new(Method::Get, self.collection_url(&select.entity), params, None)
    }
}

fn record_endpoint(collection: &str, id: &str) -> String {
    format!("{collection}({id})")
}

fn encode_body(values: &Values) -> Result<String, BuildError> {
    Ok(serde_json::to_string(values)?)
}

/// The record id named by a filter of the form `<field>id eq '<value>'`.
///
/// The clause must be the whole filter; braces around GUIDs are dropped.
///
/// ```
/// use sql_odata::request::extract_record_id;
///
/// assert_eq!(extract_record_id("accountid eq '{123}'").as_deref(), Some("123"));
/// assert_eq!(extract_record_id("name eq 'x'"), None);
/// assert_eq!(extract_record_id("accountid eq '1' or accountid eq '2'"), None);
/// ```
pub fn extract_record_id(filter: &str) -> Option<String> {
    let caps = RECORD_ID.captures(filter)?;
    let id: String = caps[1].chars().filter(|c| *c != '{' && *c != '}').collect();
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}
