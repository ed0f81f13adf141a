//! Running queries through an injected HTTP transport.
//!
//! The crate never opens a connection itself. Callers supply a [`Transport`]
//! (a `fetch` wrapper, a blocking HTTP client, a test double) and the
//! [`Executor`] sequences the requests a query needs:
//!
//! - SELECT follows `@odata.nextLink` until the collection is exhausted
//! - INSERT reports the new record id from the `OData-EntityId` header
//! - UPDATE/DELETE with an id filter send one request; any other filter
//!   looks up the matching ids and sends one request per record
//!
//! Multi-record mutations are not transactional. A failure part-way leaves
//! the records already changed as they are.

use std::collections::HashSet;

use serde_json::Value as Json;
use tracing::{debug, info, warn};

use crate::{
    ast::{Operation, Query},
    request::{BuildError, BulkPlan, HttpRequest, MutationPlan, RequestBuilder},
    response::{entity_id_from_header, key_of, next_link, records},
};

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Sends one request and returns the raw response.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a query did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// SELECT results, all pages
    Records(Vec<Json>),
    /// INSERT; `id` is `None` when the service sent no `OData-EntityId`
    Created { id: Option<String> },
    /// Number of records changed by UPDATE/DELETE
    Affected(usize),
}

/// Errors that can occur while executing a query.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Transport error on {method} {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("{method} {url} failed with status {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid JSON response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Lookup returned a record without the '{field}' key")]
    MissingKey { field: String },

    #[error(
        "{operation} failed on record {id} after {applied} of {total} records were changed \
         (earlier changes are not rolled back): {source}"
    )]
    PartialFailure {
        operation: Operation,
        applied: usize,
        total: usize,
        id: String,
        #[source]
        source: Box<ExecuteError>,
    },
}

/// Runs queries against one service through a transport.
pub struct Executor<T> {
    builder: RequestBuilder,
    transport: T,
}

impl<T: Transport> Executor<T> {
    pub fn new(builder: RequestBuilder, transport: T) -> Self {
        Executor { builder, transport }
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn run(&self, query: &Query) -> Result<Outcome, ExecuteError> {
        match query {
            Query::Select(_) => {
                let request = self.builder.build(query)?;
                Ok(Outcome::Records(self.fetch_all(&request)?))
            }
            Query::Insert(_) => {
                let request = self.builder.build(query)?;
                let response = self.send(&request)?;
                let id = response
                    .header("OData-EntityId")
                    .and_then(entity_id_from_header);
                debug!(entity = query.entity(), ?id, "record created");
                Ok(Outcome::Created { id })
            }
            Query::Update(_) | Query::Delete(_) => {
                let plan = self.builder.plan_mutation(query)?;
                self.apply(&plan).map(Outcome::Affected)
            }
        }
    }

    /// Execute a mutation plan, returning the number of records changed.
    pub fn apply(&self, plan: &MutationPlan) -> Result<usize, ExecuteError> {
        match plan {
            MutationPlan::Direct(request) => {
                self.send(request)?;
                Ok(1)
            }
            MutationPlan::Bulk(bulk) => self.apply_bulk(bulk),
        }
    }

    fn apply_bulk(&self, plan: &BulkPlan) -> Result<usize, ExecuteError> {
        let ids = self
            .fetch_all(&plan.lookup)?
            .iter()
            .map(|record| {
                key_of(record, &plan.key_field).ok_or_else(|| ExecuteError::MissingKey {
                    field: plan.key_field.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = ids.len();
        if total == 0 {
            info!(operation = %plan.operation, "no records match; nothing to change");
            return Ok(0);
        }

        warn!(
            operation = %plan.operation,
            records = total,
            "applying mutation record by record; changes are not transactional"
        );

        for (applied, id) in ids.iter().enumerate() {
            if let Err(source) = self.send(&plan.request_for(id)) {
                return Err(ExecuteError::PartialFailure {
                    operation: plan.operation,
                    applied,
                    total,
                    id: id.clone(),
                    source: Box::new(source),
                });
            }
        }
        Ok(total)
    }

    /// GET a collection and every following page.
    ///
    /// Stops at a `@odata.nextLink` that was already fetched.
    pub fn fetch_all(&self, request: &HttpRequest) -> Result<Vec<Json>, ExecuteError> {
        let mut results = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(request.clone());

        while let Some(page) = next.take() {
            let url = page.encoded_url();
            visited.insert(url.clone());
            let response = self.send(&page)?;
            let body: Json = serde_json::from_str(&response.body)
                .map_err(|source| ExecuteError::InvalidResponse { url: url.clone(), source })?;

            results.extend(records(&body));

            next = match next_link(&body) {
                Some(link) if !visited.contains(link) => Some(HttpRequest::get(link)),
                Some(link) => {
                    warn!(%link, "next link already fetched, stopping");
                    None
                }
                None => None,
            };
        }

        Ok(results)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ExecuteError> {
        let response = self
            .transport
            .send(request)
            .map_err(|source| ExecuteError::Transport {
                method: request.method.to_string(),
                url: request.url(),
                source,
            })?;

        if !response.is_success() {
            return Err(ExecuteError::Status {
                method: request.method.to_string(),
                url: request.url(),
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}
