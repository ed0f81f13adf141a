//! Rendering request descriptors for display.
//!
//! Two forms are supported:
//!
//! - **JSON** via [`request_to_json()`]: method, URL, headers and the decoded
//!   body as one object, for handing to another tool
//! - **HTTP text** via [`request_to_http()`]: the request as it would appear on
//!   the wire, for reading or pasting into an HTTP client
//!
//! # Examples
//!
//! ```
//! use sql_odata::{parse, to_request};
//! use sql_odata::output::request_to_http;
//!
//! let request = to_request(&parse("DELETE FROM account WHERE accountid = '42'").unwrap(), "").unwrap();
//! assert!(request_to_http(&request, false).starts_with("DELETE /api/data/v9.2/account(42) HTTP/1.1\n"));
//! ```

use serde_json::{Map, Value as Json, json};

use crate::request::{BulkPlan, HttpRequest, MutationPlan};

/// Request descriptor as a JSON object.
///
/// The body is embedded as JSON when it parses, otherwise as a string.
pub fn request_to_json(request: &HttpRequest, encoded: bool) -> Json {
    let headers: Map<String, Json> = request
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), Json::String(value.clone())))
        .collect();

    let mut object = json!({
        "method": request.method.as_str(),
        "url": render_url(request, encoded),
        "headers": headers,
    });

    if let Some(body) = &request.body {
        object["body"] = serde_json::from_str(body).unwrap_or_else(|_| Json::String(body.clone()));
    }
    object
}

/// A bulk plan as JSON: the lookup request and the per-record template.
pub fn bulk_plan_to_json(plan: &BulkPlan, encoded: bool) -> Json {
    json!({
        "operation": plan.operation,
        "keyField": plan.key_field,
        "lookup": request_to_json(&plan.lookup, encoded),
        "perRecord": request_to_json(&plan.request_for(&format!("<{}>", plan.key_field)), false),
    })
}

pub fn mutation_plan_to_json(plan: &MutationPlan, encoded: bool) -> Json {
    match plan {
        MutationPlan::Direct(request) => request_to_json(request, encoded),
        MutationPlan::Bulk(bulk) => bulk_plan_to_json(bulk, encoded),
    }
}

/// Request as HTTP/1.1 text: request line, headers, blank line, body.
///
/// Absolute URLs are split into a path and a `Host` header.
pub fn request_to_http(request: &HttpRequest, encoded: bool) -> String {
    let url = render_url(request, encoded);
    let (host, target) = split_host(&url);

    let mut out = format!("{} {} HTTP/1.1\n", request.method, target);
    if let Some(host) = host {
        out.push_str(&format!("Host: {host}\n"));
    }
    for (name, value) in &request.headers {
        out.push_str(&format!("{name}: {value}\n"));
    }
    if let Some(body) = &request.body {
        out.push('\n');
        out.push_str(body);
        out.push('\n');
    }
    out
}

fn render_url(request: &HttpRequest, encoded: bool) -> String {
    if encoded {
        request.encoded_url()
    } else {
        request.url()
    }
}

fn split_host(url: &str) -> (Option<&str>, &str) {
    let Some((_, rest)) = url.split_once("://") else {
        return (None, url);
    };
    match rest.find('/') {
        Some(slash) => (Some(&rest[..slash]), &rest[slash..]),
        None => (Some(rest), "/"),
    }
}
