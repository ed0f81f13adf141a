// tests/parser_tests.rs

use sql_odata::ast::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use sql_odata::{Direction, Operation, OrderBy, ParseError, Parser, ParserConfig, Query, Value, parse};

fn select(text: &str) -> SelectQuery {
    match parse(text).unwrap() {
        Query::Select(q) => q,
        other => panic!("Expected SELECT, got {:?}", other),
    }
}

fn insert(text: &str) -> InsertQuery {
    match parse(text).unwrap() {
        Query::Insert(q) => q,
        other => panic!("Expected INSERT, got {:?}", other),
    }
}

fn update(text: &str) -> UpdateQuery {
    match parse(text).unwrap() {
        Query::Update(q) => q,
        other => panic!("Expected UPDATE, got {:?}", other),
    }
}

fn delete(text: &str) -> DeleteQuery {
    match parse(text).unwrap() {
        Query::Delete(q) => q,
        other => panic!("Expected DELETE, got {:?}", other),
    }
}

fn assert_invalid(text: &str, expected: Operation) {
    match parse(text) {
        Err(ParseError::InvalidSyntax { operation, .. }) => assert_eq!(operation, expected),
        other => panic!("Expected InvalidSyntax for {:?}, got {:?}", text, other),
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_keywords_case_insensitive() {
    assert_eq!(parse("select a from b").unwrap().operation(), Operation::Select);
    assert_eq!(parse("Insert Into b (a) Values (1)").unwrap().operation(), Operation::Insert);
    assert_eq!(parse("update b set a = 1 where bid eq '1'").unwrap().operation(), Operation::Update);
    assert_eq!(parse("delete from b where x = 1").unwrap().operation(), Operation::Delete);
}

#[test]
fn test_unsupported_operation() {
    match parse("DROP TABLE account") {
        Err(ParseError::UnsupportedOperation { keyword, statement }) => {
            assert_eq!(keyword, "DROP");
            assert_eq!(statement, "DROP TABLE account;");
        }
        other => panic!("Expected UnsupportedOperation, got {:?}", other),
    }
}

#[test]
fn test_non_keyword_start() {
    assert!(matches!(
        parse("(SELECT a FROM b)"),
        Err(ParseError::UnsupportedOperation { keyword, .. }) if keyword.is_empty()
    ));
}

#[test]
fn test_empty_statement() {
    assert_eq!(parse(""), Err(ParseError::Empty));
    assert_eq!(parse("   \n "), Err(ParseError::Empty));
    assert_eq!(parse(";"), Err(ParseError::Empty));
}

#[test]
fn test_semicolon_optional() {
    assert_eq!(parse("SELECT a FROM b"), parse("SELECT a FROM b;"));
    assert_eq!(parse("  SELECT a FROM b ;  "), parse("SELECT a FROM b"));
}

#[test]
fn test_deterministic() {
    let text = "SELECT a, b FROM foo WHERE x = 1 ORDER BY y DESC LIMIT 3";
    assert_eq!(parse(text).unwrap(), parse(text).unwrap());
}

// ============================================================================
// SELECT
// ============================================================================

#[test]
fn test_select_all_clauses() {
    let q = select("SELECT a, b FROM foo WHERE x = 1 ORDER BY y LIMIT 10");
    assert_eq!(q.entity, "foo");
    assert_eq!(q.fields, vec!["a", "b"]);
    assert_eq!(q.filter.as_deref(), Some("x eq 1"));
    assert_eq!(q.order_by, Some(vec![OrderBy::new("y", Direction::Asc)]));
    assert_eq!(q.limit, Some(10));
}

#[test]
fn test_select_minimal() {
    let q = select("SELECT * FROM account");
    assert_eq!(q.fields, vec!["*"]);
    assert!(q.selects_all());
    assert_eq!(q.filter, None);
    assert_eq!(q.order_by, None);
    assert_eq!(q.limit, None);
}

#[test]
fn test_select_order_directions() {
    let q = select("SELECT a FROM b ORDER BY c DESC, d asc, e, f desc");
    assert_eq!(
        q.order_by.unwrap(),
        vec![
            OrderBy::new("c", Direction::Desc),
            OrderBy::new("d", Direction::Asc),
            OrderBy::new("e", Direction::Asc),
            OrderBy::new("f", Direction::Desc),
        ]
    );
}

#[test]
fn test_select_unknown_direction_is_ascending() {
    let q = select("SELECT a FROM b ORDER BY c DOWN");
    assert_eq!(q.order_by.unwrap(), vec![OrderBy::new("c", Direction::Asc)]);
}

#[test]
fn test_select_multiline() {
    let q = select("SELECT name,\n       revenue\nFROM account\nWHERE revenue >= 100\nLIMIT 5");
    assert_eq!(q.fields, vec!["name", "revenue"]);
    assert_eq!(q.filter.as_deref(), Some("revenue ge 100"));
    assert_eq!(q.limit, Some(5));
}

#[test]
fn test_select_where_with_literal_keywords() {
    let q = select("SELECT a FROM b WHERE note = 'x ORDER BY y' ORDER BY a");
    assert_eq!(q.filter.as_deref(), Some("note eq 'x ORDER BY y'"));
    assert_eq!(q.order_by.unwrap(), vec![OrderBy::new("a", Direction::Asc)]);
}

#[test]
fn test_select_where_with_unbalanced_quote() {
    let q = select("SELECT name FROM contact WHERE lastname = 'O'Brien'");
    assert_eq!(q.entity, "contact");
    assert_eq!(q.filter.as_deref(), Some("lastname eq 'O'Brien'"));
}

#[test]
fn test_delete_where_with_unbalanced_quote() {
    let q = delete("DELETE FROM contact WHERE note = 'it's' ");
    assert_eq!(q.filter.as_deref(), Some("note eq 'it's'"));
}

#[test]
fn test_select_limit_zero() {
    assert_eq!(select("SELECT a FROM b LIMIT 0").limit, Some(0));
}

#[test]
fn test_select_missing_fields() {
    assert_invalid("SELECT FROM foo", Operation::Select);
}

#[test]
fn test_select_missing_entity() {
    assert_invalid("SELECT a FROM", Operation::Select);
    assert_invalid("SELECT a", Operation::Select);
}

#[test]
fn test_select_invalid_entity() {
    assert_invalid("SELECT a FROM 1account", Operation::Select);
    assert_invalid("SELECT a FROM my-table", Operation::Select);
}

#[test]
fn test_select_bad_limit() {
    assert_invalid("SELECT a FROM b LIMIT -1", Operation::Select);
    assert_invalid("SELECT a FROM b LIMIT ten", Operation::Select);
    assert_invalid("SELECT a FROM b LIMIT 1.5", Operation::Select);
}

#[test]
fn test_select_empty_field() {
    assert_invalid("SELECT a,,b FROM c", Operation::Select);
    assert_invalid("SELECT a, FROM c", Operation::Select);
}

#[test]
fn test_select_wildcard_mixed() {
    assert_invalid("SELECT *, name FROM c", Operation::Select);
}

#[test]
fn test_select_bad_order_item() {
    assert_invalid("SELECT a FROM b ORDER BY c DESC extra", Operation::Select);
    assert_invalid("SELECT a FROM b ORDER BY c,", Operation::Select);
}

#[test]
fn test_error_carries_statement() {
    let err = parse("SELECT FROM foo").unwrap_err();
    assert_eq!(err.statement(), Some("SELECT FROM foo;"));
    assert!(err.to_string().starts_with("Invalid SELECT syntax"));
}

// ============================================================================
// INSERT
// ============================================================================

#[test]
fn test_insert_literal_typing() {
    let q = insert("INSERT INTO account (name, revenue, active) VALUES ('Acme', 1000, true)");
    assert_eq!(q.entity, "account");
    assert_eq!(q.values.len(), 3);
    assert_eq!(q.values["name"], Value::String("Acme".into()));
    assert_eq!(q.values["revenue"], Value::Integer(1000));
    assert_eq!(q.values["active"], Value::Boolean(true));
}

#[test]
fn test_insert_without_into() {
    let q = insert("INSERT account (name) VALUES ('Acme')");
    assert_eq!(q.entity, "account");
}

#[test]
fn test_insert_more_literals() {
    let q = insert("INSERT INTO t (a, b, c, d) VALUES (NULL, 2.5, Raw, 'x, y')");
    assert_eq!(q.values["a"], Value::Null);
    assert_eq!(q.values["b"], Value::Float(2.5));
    assert_eq!(q.values["c"], Value::String("Raw".into()));
    assert_eq!(q.values["d"], Value::String("x, y".into()));
}

#[test]
fn test_insert_value_with_parentheses() {
    let q = insert(
        "INSERT INTO contact (lastname, parentcustomerid_account@odata.bind) \
         VALUES ('Smith', '/accounts(42)')",
    );
    assert_eq!(
        q.values["parentcustomerid_account@odata.bind"],
        Value::String("/accounts(42)".into())
    );
}

#[test]
fn test_insert_extra_values_dropped() {
    let q = insert("INSERT INTO t (a) VALUES (1, 2, 3)");
    assert_eq!(q.values.len(), 1);
    assert_eq!(q.values["a"], Value::Integer(1));
}

#[test]
fn test_insert_missing_values_omitted() {
    let q = insert("INSERT INTO t (a, b, c) VALUES (1)");
    assert_eq!(q.values.len(), 1);
    assert!(!q.values.contains_key("b"));
}

#[test]
fn test_insert_strict_arity() {
    let parser = Parser::with_config(ParserConfig {
        strict_insert_arity: true,
        ..ParserConfig::default()
    });
    assert!(matches!(
        parser.parse("INSERT INTO t (a, b) VALUES (1)"),
        Err(ParseError::InvalidSyntax { operation: Operation::Insert, reason, .. })
            if reason == "2 columns but 1 values"
    ));
    assert!(parser.parse("INSERT INTO t (a, b) VALUES (1, 2)").is_ok());
}

#[test]
fn test_insert_no_values() {
    assert_invalid("INSERT INTO t (a) VALUES ()", Operation::Insert);
}

#[test]
fn test_insert_empty_column() {
    assert_invalid("INSERT INTO t () VALUES (1)", Operation::Insert);
    assert_invalid("INSERT INTO t (a,,b) VALUES (1, 2, 3)", Operation::Insert);
}

#[test]
fn test_insert_missing_entity() {
    assert_invalid("INSERT INTO (a) VALUES (1)", Operation::Insert);
}

#[test]
fn test_insert_malformed() {
    assert_invalid("INSERT INTO t VALUES (1)", Operation::Insert);
    assert_invalid("INSERT INTO t (a) (1)", Operation::Insert);
}

#[test]
fn test_insert_unterminated_literal() {
    assert!(matches!(
        parse("INSERT INTO t (a, b) VALUES ('x, 2)"),
        Err(ParseError::Lex { .. })
    ));
}

// ============================================================================
// UPDATE
// ============================================================================

#[test]
fn test_update_with_filter() {
    let q = update("UPDATE account SET name = 'X', revenue = 5 WHERE accountid = '{123}'");
    assert_eq!(q.entity, "account");
    assert_eq!(q.values["name"], Value::String("X".into()));
    assert_eq!(q.values["revenue"], Value::Integer(5));
    assert_eq!(q.filter.as_deref(), Some("accountid eq '{123}'"));
}

#[test]
fn test_update_odata_filter_untouched() {
    let q = update("UPDATE account SET name = 'X' WHERE accountid eq '{123}'");
    assert_eq!(q.filter.as_deref(), Some("accountid eq '{123}'"));
}

#[test]
fn test_update_splits_on_first_equals() {
    let q = update("UPDATE t SET formula = a=b WHERE x = 1");
    assert_eq!(q.values["formula"], Value::String("a=b".into()));
}

#[test]
fn test_update_value_with_comma() {
    let q = update("UPDATE t SET a = 'x, y', b = 2 WHERE tid = '1'");
    assert_eq!(q.values["a"], Value::String("x, y".into()));
    assert_eq!(q.values["b"], Value::Integer(2));
}

#[test]
fn test_update_without_where_parses() {
    let q = update("UPDATE account SET name = 'X'");
    assert_eq!(q.filter, None);
}

#[test]
fn test_update_require_filter() {
    let parser = Parser::with_config(ParserConfig::strict());
    assert!(matches!(
        parser.parse("UPDATE account SET name = 'X'"),
        Err(ParseError::MissingFilter { operation: Operation::Update, .. })
    ));
}

#[test]
fn test_update_bad_assignment() {
    assert_invalid("UPDATE t SET a WHERE x = 1", Operation::Update);
    assert_invalid("UPDATE t SET = 1", Operation::Update);
    assert_invalid("UPDATE t SET a =", Operation::Update);
    assert_invalid("UPDATE t SET a = 1,", Operation::Update);
}

#[test]
fn test_update_missing_set() {
    assert_invalid("UPDATE t a = 1", Operation::Update);
}

// ============================================================================
// DELETE
// ============================================================================

#[test]
fn test_delete_with_filter() {
    let q = delete("DELETE FROM contact WHERE lastname = 'Smith' AND age < 30");
    assert_eq!(q.entity, "contact");
    assert_eq!(q.filter.as_deref(), Some("lastname eq 'Smith' and age lt 30"));
}

#[test]
fn test_delete_without_from() {
    assert_eq!(delete("DELETE contact WHERE x = 1").entity, "contact");
}

#[test]
fn test_delete_without_where() {
    assert_eq!(delete("DELETE FROM contact").filter, None);
}

#[test]
fn test_delete_require_filter() {
    let parser = Parser::with_config(ParserConfig::strict());
    let err = parser.parse("DELETE FROM contact").unwrap_err();
    assert_eq!(err.to_string(), "DELETE requires a WHERE clause: DELETE FROM contact;");
}

#[test]
fn test_delete_missing_entity() {
    assert_invalid("DELETE FROM", Operation::Delete);
    assert_invalid("DELETE FROM WHERE x = 1", Operation::Delete);
}
