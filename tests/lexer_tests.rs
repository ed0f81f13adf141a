// tests/lexer_tests.rs

use sql_odata::ast::Token;
use sql_odata::lexer::{LexError, Lexer, Position, split_list};

// ============================================================================
// Tokens
// ============================================================================

#[test]
fn test_token_kinds() {
    let mut lexer = Lexer::new("name = 'Bob', 1");
    assert_eq!(lexer.next_token().unwrap(), Token::Text("name = ".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Quoted("'Bob'".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Comma);
    assert_eq!(lexer.next_token().unwrap(), Token::Text(" 1".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("");
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_quoted_contents_untouched() {
    let tokens = Lexer::new("'a, b = c'").tokenize().unwrap();
    assert_eq!(tokens, vec![Token::Quoted("'a, b = c'".to_string())]);
}

#[test]
fn test_empty_literal() {
    let tokens = Lexer::new("''").tokenize().unwrap();
    assert_eq!(tokens, vec![Token::Quoted("''".to_string())]);
}

#[test]
fn test_non_ascii_text() {
    let tokens = Lexer::new("'Zürich', café").tokenize().unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Quoted("'Zürich'".to_string()),
            Token::Comma,
            Token::Text(" café".to_string()),
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_literal() {
    let err = Lexer::new("a, 'open").tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedLiteral(Position { offset: 3 }));
    assert_eq!(err.to_string(), "unterminated string literal starting at offset 3");
}

// ============================================================================
// List splitting
// ============================================================================

#[test]
fn test_split_simple_list() {
    assert_eq!(split_list("a, b ,c").unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_split_empty_input() {
    assert!(split_list("").unwrap().is_empty());
    assert!(split_list("   ").unwrap().is_empty());
}

#[test]
fn test_split_keeps_empty_items() {
    assert_eq!(split_list("a,,b").unwrap(), vec!["a", "", "b"]);
    assert_eq!(split_list("a,").unwrap(), vec!["a", ""]);
}

#[test]
fn test_split_assignments() {
    let items = split_list("name = 'Smith, J', city = 'Leeds'").unwrap();
    assert_eq!(items, vec!["name = 'Smith, J'", "city = 'Leeds'"]);
}

#[test]
fn test_split_propagates_lex_error() {
    assert!(split_list("'a, b").is_err());
}
