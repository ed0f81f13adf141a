use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    ast::{Operation, OrderBy},
    value::Value,
};

/// Column assignments of an INSERT or UPDATE, keyed by column name.
///
/// Ordered so that request bodies encode the same way every time.
pub type Values = BTreeMap<String, Value>;

/// A parsed statement.
///
/// One variant per operation; each payload carries only the clauses its
/// grammar allows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "UPPERCASE")]
pub enum Query {
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
}

impl Query {
    pub fn operation(&self) -> Operation {
        match self {
            Query::Select(_) => Operation::Select,
            Query::Insert(_) => Operation::Insert,
            Query::Update(_) => Operation::Update,
            Query::Delete(_) => Operation::Delete,
        }
    }

    /// Target entity (collection) name
    pub fn entity(&self) -> &str {
        match self {
            Query::Select(q) => &q.entity,
            Query::Insert(q) => &q.entity,
            Query::Update(q) => &q.entity,
            Query::Delete(q) => &q.entity,
        }
    }

    /// Translated filter, if the statement had a WHERE clause
    pub fn filter(&self) -> Option<&str> {
        match self {
            Query::Select(q) => q.filter.as_deref(),
            Query::Insert(_) => None,
            Query::Update(q) => q.filter.as_deref(),
            Query::Delete(q) => q.filter.as_deref(),
        }
    }
}

/// `SELECT <fields> FROM <entity> [WHERE ..] [ORDER BY ..] [LIMIT ..]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectQuery {
    pub entity: String,

    /// Selected columns; `["*"]` selects everything
    pub fields: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderBy>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl SelectQuery {
    /// True when the field list is empty or the lone `*` wildcard.
    pub fn selects_all(&self) -> bool {
        match self.fields.as_slice() {
            [] => true,
            [only] => only == "*",
            _ => false,
        }
    }
}

/// `INSERT INTO <entity> (<columns>) VALUES (<values>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertQuery {
    pub entity: String,
    pub values: Values,
}

/// `UPDATE <entity> SET <assignments> [WHERE ..]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateQuery {
    pub entity: String,
    pub values: Values,

    /// Required by the request builder, optional to the parser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// `DELETE FROM <entity> [WHERE ..]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteQuery {
    pub entity: String,

    /// Required by the request builder, optional to the parser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}
