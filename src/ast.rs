//! # Query model
//!
//! The structured form of one SQL-like statement, produced by
//! [`Parser`](crate::Parser) and consumed by
//! [`RequestBuilder`](crate::RequestBuilder).
//!
//! ## Layout
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operation]** - The four supported statement kinds
//! - **[clauses]** - `ORDER BY` items and sort direction
//! - **[query]** - The [`Query`] union and its per-operation payloads
//!
//! ## Statement shapes
//!
//! ```text
//! SELECT <fields> FROM <entity> [WHERE <filter>] [ORDER BY <order>] [LIMIT <n>]
//! INSERT INTO <entity> (<columns>) VALUES (<values>)
//! UPDATE <entity> SET <column> = <value>[, ...] [WHERE <filter>]
//! DELETE FROM <entity> [WHERE <filter>]
//! ```
//!
//! Filters are stored after translation to OData syntax, so a `Query` never
//! contains SQL comparison operators.
pub mod clauses;
pub mod operation;
pub mod query;
pub mod tokens;

pub use clauses::{Direction, OrderBy};
pub use operation::Operation;
pub use query::{DeleteQuery, InsertQuery, Query, SelectQuery, UpdateQuery};
pub use tokens::Token;
