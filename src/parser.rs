use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::{
    ast::{
        DeleteQuery, Direction, InsertQuery, Operation, OrderBy, Query, SelectQuery, UpdateQuery,
        query::Values,
    },
    lexer::{LexError, mask_literals, split_list},
    literal::parse_literal,
    translate::translate_where_clause,
};

static LEADING_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z]+)").expect("keyword pattern"));

static SELECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^SELECT\s+(?P<fields>.+?)\s+FROM\s+(?P<entity>[A-Za-z_][A-Za-z0-9_]*)(?:\s+WHERE\s+(?P<filter>.+?))?(?:\s+ORDER\s+BY\s+(?P<order>.+?))?(?:\s+LIMIT\s+(?P<limit>\S+))?\s*;$",
    )
    .expect("select pattern")
});

static INSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^INSERT\s+(?:INTO\s+)?(?P<entity>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<columns>[^)]*)\)\s*VALUES\s*\((?P<values>.*)\)\s*;$",
    )
    .expect("insert pattern")
});

static UPDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^UPDATE\s+(?P<entity>[A-Za-z_][A-Za-z0-9_]*)\s+SET\s+(?P<assignments>.+?)(?:\s+WHERE\s+(?P<filter>.+?))?\s*;$",
    )
    .expect("update pattern")
});

static DELETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^DELETE\s+(?:FROM\s+)?(?P<entity>[A-Za-z_][A-Za-z0-9_]*)(?:\s+WHERE\s+(?P<filter>.+?))?\s*;$",
    )
    .expect("delete pattern")
});

/// Words that can only land in the entity slot when the real name is missing,
/// e.g. `DELETE FROM;` or `INSERT INTO (a) VALUES (1)`.
const RESERVED: [&str; 5] = ["FROM", "INTO", "SET", "VALUES", "WHERE"];

/// Parser behavior switches.
///
/// The defaults reproduce the permissive behavior of the query language:
/// mismatched INSERT lists are reconciled positionally and unscoped
/// UPDATE/DELETE statements are left for the request builder to reject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Reject INSERT statements whose column and value counts differ
    pub strict_insert_arity: bool,

    /// Reject UPDATE/DELETE statements without a WHERE clause at parse time
    pub require_filter: bool,
}

impl ParserConfig {
    /// Both checks enabled.
    pub fn strict() -> Self {
        ParserConfig {
            strict_insert_arity: true,
            require_filter: true,
        }
    }
}

/// Errors that can occur while parsing a statement.
///
/// Every variant except [`ParseError::Empty`] carries the canonicalized
/// statement that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty statement")]
    Empty,

    #[error("Unsupported operation '{keyword}' (expected SELECT, INSERT, UPDATE or DELETE): {statement}")]
    UnsupportedOperation { keyword: String, statement: String },

    #[error("Invalid {operation} syntax: {reason}: {statement}")]
    InvalidSyntax {
        operation: Operation,
        statement: String,
        reason: String,
    },

    #[error("{operation} requires a WHERE clause: {statement}")]
    MissingFilter {
        operation: Operation,
        statement: String,
    },

    #[error("Lexical error: {source}: {statement}")]
    Lex {
        statement: String,
        #[source]
        source: LexError,
    },
}

impl ParseError {
    /// The statement that failed to parse, if there was one.
    pub fn statement(&self) -> Option<&str> {
        match self {
            ParseError::Empty => None,
            ParseError::UnsupportedOperation { statement, .. }
            | ParseError::InvalidSyntax { statement, .. }
            | ParseError::MissingFilter { statement, .. }
            | ParseError::Lex { statement, .. } => Some(statement),
        }
    }
}

/// Converts one SQL-like statement into a [`Query`].
///
/// The parser is stateless apart from its configuration and can be shared
/// freely.
///
/// ```
/// use sql_odata::{Parser, Query};
///
/// let query = Parser::new().parse("SELECT name FROM account LIMIT 5").unwrap();
/// match query {
///     Query::Select(select) => {
///         assert_eq!(select.fields, vec!["name"]);
///         assert_eq!(select.limit, Some(5));
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Parser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a single statement; a trailing `;` is optional.
    pub fn parse(&self, text: &str) -> Result<Query, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == ";" {
            return Err(ParseError::Empty);
        }

        let statement = if trimmed.ends_with(';') {
            trimmed.to_string()
        } else {
            format!("{trimmed};")
        };

        let keyword = LEADING_KEYWORD
            .captures(&statement)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        let operation = Operation::from_keyword(&keyword).ok_or_else(|| {
            ParseError::UnsupportedOperation {
                keyword: keyword.clone(),
                statement: statement.clone(),
            }
        })?;

        debug!(%operation, "parsing statement");

        let masked = mask_literals(&statement);
        let source = Source {
            statement: &statement,
            masked: &masked,
        };

        let query = match operation {
            Operation::Select => self.parse_select(source)?,
            Operation::Insert => self.parse_insert(source)?,
            Operation::Update => self.parse_update(source)?,
            Operation::Delete => self.parse_delete(source)?,
        };

        if self.config.require_filter
            && matches!(operation, Operation::Update | Operation::Delete)
            && query.filter().is_none()
        {
            return Err(ParseError::MissingFilter {
                operation,
                statement,
            });
        }

        Ok(query)
    }

    fn parse_select(&self, source: Source<'_>) -> Result<Query, ParseError> {
        let statement = source.statement;
        let invalid = |reason: &str| invalid_syntax(Operation::Select, statement, reason);

        let caps = SELECT.captures(source.masked).ok_or_else(|| {
            invalid("expected SELECT <fields> FROM <entity> [WHERE ..] [ORDER BY ..] [LIMIT n]")
        })?;

        let entity = entity(&caps, Operation::Select, statement)?;

        let fields: Vec<String> = source
            .group(&caps, "fields")
            .unwrap_or_default()
            .split(',')
            .map(|f| f.trim().to_string())
            .collect();
        if fields.iter().any(|f| f.is_empty()) {
            return Err(invalid("empty field name in select list"));
        }
        if fields.len() > 1 && fields.iter().any(|f| f == "*") {
            return Err(invalid("'*' cannot be combined with other fields"));
        }

        let order_by = match source.group(&caps, "order") {
            Some(order) => Some(parse_order_list(order).map_err(|r| invalid(&r))?),
            None => None,
        };

        let limit = match source.group(&caps, "limit") {
            Some(limit) => Some(limit.parse::<u64>().map_err(|_| {
                invalid(&format!("LIMIT must be a non-negative integer, got '{limit}'"))
            })?),
            None => None,
        };

        Ok(Query::Select(SelectQuery {
            entity,
            fields,
            filter: source.filter(&caps),
            order_by,
            limit,
        }))
    }

    fn parse_insert(&self, source: Source<'_>) -> Result<Query, ParseError> {
        let statement = source.statement;
        let invalid = |reason: &str| invalid_syntax(Operation::Insert, statement, reason);

        let caps = INSERT.captures(source.masked).ok_or_else(|| {
            invalid("expected INSERT INTO <entity> (<columns>) VALUES (<values>)")
        })?;

        let entity = entity(&caps, Operation::Insert, statement)?;

        let columns: Vec<&str> = source
            .group(&caps, "columns")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .collect();
        if columns.iter().any(|c| c.is_empty()) {
            return Err(invalid("empty column name"));
        }

        let values = split_list(source.group(&caps, "values").unwrap_or_default())
            .map_err(|e| lex_error(statement, e))?;
        if values.iter().any(|v| v.is_empty()) {
            return Err(invalid("empty value in VALUES list"));
        }

        if columns.len() != values.len() {
            if self.config.strict_insert_arity {
                return Err(invalid(&format!(
                    "{} columns but {} values",
                    columns.len(),
                    values.len()
                )));
            }
            warn!(
                %entity,
                columns = columns.len(),
                values = values.len(),
                "INSERT column/value count mismatch; extra values dropped, unmatched columns omitted"
            );
        }

        // zip stops at the shorter list
        let values: Values = columns
            .iter()
            .zip(values.iter())
            .map(|(column, value)| (column.to_string(), parse_literal(value)))
            .collect();

        if values.is_empty() {
            return Err(invalid("no values to insert"));
        }

        Ok(Query::Insert(InsertQuery { entity, values }))
    }

    fn parse_update(&self, source: Source<'_>) -> Result<Query, ParseError> {
        let statement = source.statement;
        let invalid = |reason: &str| invalid_syntax(Operation::Update, statement, reason);

        let caps = UPDATE.captures(source.masked).ok_or_else(|| {
            invalid("expected UPDATE <entity> SET <column> = <value>[, ..] [WHERE ..]")
        })?;

        let entity = entity(&caps, Operation::Update, statement)?;

        let assignments = split_list(source.group(&caps, "assignments").unwrap_or_default())
            .map_err(|e| lex_error(statement, e))?;

        let mut values = Values::new();
        for assignment in assignments {
            let (column, value) = assignment
                .split_once('=')
                .ok_or_else(|| invalid(&format!("expected <column> = <value>, got '{assignment}'")))?;
            let (column, value) = (column.trim(), value.trim());
            if column.is_empty() {
                return Err(invalid(&format!("missing column name in '{assignment}'")));
            }
            if value.is_empty() {
                return Err(invalid(&format!("missing value for column '{column}'")));
            }
            values.insert(column.to_string(), parse_literal(value));
        }

        if values.is_empty() {
            return Err(invalid("no assignments in SET clause"));
        }

        Ok(Query::Update(UpdateQuery {
            entity,
            values,
            filter: source.filter(&caps),
        }))
    }

    fn parse_delete(&self, source: Source<'_>) -> Result<Query, ParseError> {
        let caps = DELETE.captures(source.masked).ok_or_else(|| {
            invalid_syntax(
                Operation::Delete,
                source.statement,
                "expected DELETE FROM <entity> [WHERE ..]",
            )
        })?;

        Ok(Query::Delete(DeleteQuery {
            entity: entity(&caps, Operation::Delete, source.statement)?,
            filter: source.filter(&caps),
        }))
    }
}

/// A canonical statement and its literal-masked twin.
///
/// Patterns match against `masked`; captured spans are read from `statement`.
#[derive(Clone, Copy)]
struct Source<'s> {
    statement: &'s str,
    masked: &'s str,
}

impl<'s> Source<'s> {
    fn group(&self, caps: &Captures, name: &str) -> Option<&'s str> {
        caps.name(name).map(|m| &self.statement[m.range()])
    }

    /// Translated WHERE clause, `None` when absent or blank.
    fn filter(&self, caps: &Captures) -> Option<String> {
        self.group(caps, "filter")
            .map(translate_where_clause)
            .filter(|f| !f.is_empty())
    }
}

fn invalid_syntax(operation: Operation, statement: &str, reason: &str) -> ParseError {
    ParseError::InvalidSyntax {
        operation,
        statement: statement.to_string(),
        reason: reason.to_string(),
    }
}

fn lex_error(statement: &str, source: LexError) -> ParseError {
    ParseError::Lex {
        statement: statement.to_string(),
        source,
    }
}

fn entity(caps: &Captures, operation: Operation, statement: &str) -> Result<String, ParseError> {
    let name = &caps["entity"];
    if RESERVED.iter().any(|word| name.eq_ignore_ascii_case(word)) {
        return Err(invalid_syntax(operation, statement, "missing entity name"));
    }
    Ok(name.to_string())
}

fn parse_order_list(list: &str) -> Result<Vec<OrderBy>, String> {
    list.split(',')
        .map(|item| {
            let words: Vec<&str> = item.split_whitespace().collect();
            match words.as_slice() {
                [field] => Ok(OrderBy::new(*field, Direction::Asc)),
                [field, direction] => Ok(OrderBy::new(*field, Direction::from_keyword(direction))),
                [] => Err("empty ORDER BY item".to_string()),
                _ => Err(format!("expected <field> [ASC|DESC] in ORDER BY, got '{}'", item.trim())),
            }
        })
        .collect()
}
