//! SQL `WHERE` clause to OData `$filter` rewriting.
//!
//! This is a lexical substitution pass, not an expression parser. SQL
//! operators are swapped for their OData spellings and everything else is
//! left as written:
//!
//! | SQL           | OData      |
//! |---------------|------------|
//! | `AND` / `OR`  | `and` / `or` |
//! | `=`           | `eq`       |
//! | `<>` / `!=`   | `ne`       |
//! | `>` / `<`     | `gt` / `lt` |
//! | `>=` / `<=`   | `ge` / `le` |
//! | `LIKE`        | `contains` |
//! | `IS NULL`     | `eq null`  |
//! | `IS NOT NULL` | `ne null`  |
//!
//! Operator precedence, parentheses and function calls are not understood.
//! A malformed expression comes out equally malformed and is only rejected by
//! the service. Text inside single-quoted literals is never rewritten.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{ast::Token, lexer::Lexer};

// Alternation order matters: longer operators first so `>=` never becomes
// `gt =`, and `IS NOT NULL` before `IS NULL`. Each alternative is named after
// the entry in `ODATA_OPERATORS` it maps to.
static OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(?P<ne_null>\bIS\s+NOT\s+NULL\b)|(?P<eq_null>\bIS\s+NULL\b)",
        r"|(?P<and>\bAND\b)|(?P<or>\bOR\b)|(?P<contains>\bLIKE\b)",
        r"|(?P<ne><>|!=)|(?P<ge>>=)|(?P<le><=)|(?P<eq>=)|(?P<gt>>)|(?P<lt><)",
    ))
    .expect("operator pattern")
});

const ODATA_OPERATORS: [(&str, &str); 11] = [
    ("ne_null", "ne null"),
    ("eq_null", "eq null"),
    ("and", "and"),
    ("or", "or"),
    ("contains", "contains"),
    ("ne", "ne"),
    ("ge", "ge"),
    ("le", "le"),
    ("eq", "eq"),
    ("gt", "gt"),
    ("lt", "lt"),
];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// OData spelling of an `OPERATOR` match, keyed on the group that matched.
///
/// Case folding is Unicode-aware, so `LI\u{212A}E` (Kelvin sign) counts as
/// `LIKE`.
fn odata_operator(caps: &Captures) -> String {
    match ODATA_OPERATORS
        .iter()
        .find(|(group, _)| caps.name(group).is_some())
    {
        Some((_, odata)) => odata.to_string(),
        None => caps[0].to_string(),
    }
}

fn translate_text(text: &str) -> String {
    let replaced = OPERATOR.replace_all(text, |caps: &Captures| {
        format!(" {} ", odata_operator(caps))
    });
    WHITESPACE.replace_all(&replaced, " ").into_owned()
}

/// Rewrite a SQL boolean expression into OData filter syntax.
///
/// ```
/// use sql_odata::translate_where_clause;
///
/// assert_eq!(
///     translate_where_clause("age > 18 AND name = 'Bob'"),
///     "age gt 18 and name eq 'Bob'"
/// );
/// assert_eq!(translate_where_clause("email IS NOT NULL"), "email ne null");
/// ```
///
/// A clause with an unterminated literal cannot be split safely and is
/// rewritten as a whole.
pub fn translate_where_clause(clause: &str) -> String {
    let tokens = match Lexer::new(clause).tokenize() {
        Ok(tokens) => tokens,
        Err(_) => return translate_text(clause).trim().to_string(),
    };

    let mut out = String::with_capacity(clause.len() + 8);
    for token in &tokens {
        match token {
            Token::Text(text) => out.push_str(&translate_text(text)),
            other => out.push_str(other.as_source()),
        }
    }
    out.trim().to_string()
}
