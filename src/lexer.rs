use std::fmt;

use crate::ast::Token;

/// Character offset into the lexed input.
///
/// Counts `char`s, not bytes, so it is not a valid index for slicing the
/// input string once the text before it contains non-ASCII characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal starting at {0}")]
    UnterminatedLiteral(Position),
}

/// Splits text into quoted literals, unquoted runs and commas.
///
/// Single quotes open and close literals; there is no escape processing, so
/// `'O''Brien'` lexes as two adjacent literals and survives list splitting
/// intact.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_quoted(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::from('\'');
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            result.push(ch);
            self.advance();
            if ch == '\'' {
                return Ok(result);
            }
        }

        Err(LexError::UnterminatedLiteral(Position { offset: start }))
    }

    fn read_text(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\'' || ch == ',' {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.current_char() {
            None => Ok(Token::Eof),
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some('\'') => self.read_quoted().map(Token::Quoted),
            Some(_) => Ok(Token::Text(self.read_text())),
        }
    }

    /// Lex the whole input, without the trailing `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token()? {
                Token::Eof => return Ok(tokens),
                token => tokens.push(token),
            }
        }
    }
}

/// Split a comma-separated list, ignoring commas inside quoted literals.
///
/// Items are trimmed. Empty input yields an empty list; an empty item between
/// two commas is kept as `""` so callers can reject it.
pub fn split_list(input: &str) -> Result<Vec<String>, LexError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut current = String::new();
    for token in Lexer::new(input).tokenize()? {
        match token {
            Token::Comma => items.push(std::mem::take(&mut current).trim().to_string()),
            other => current.push_str(other.as_source()),
        }
    }
    items.push(current.trim().to_string());
    Ok(items)
}

/// Copy of `input` with the inside of every quoted literal blanked to `_`.
///
/// Byte offsets are preserved, so a match found in the masked text can be
/// sliced out of the original. Grammar patterns run on the masked text and
/// never see keywords, `;` or `)` that belong to a literal.
///
/// An unterminated literal is copied unmasked from its opening quote to the
/// end of the input.
pub fn mask_literals(input: &str) -> String {
    let mut masked = String::with_capacity(input.len());
    let mut lexer = Lexer::new(input);
    loop {
        match lexer.next_token() {
            Ok(Token::Eof) => return masked,
            Ok(Token::Quoted(literal)) => {
                let inner = literal.len() - 2;
                masked.push('\'');
                masked.extend(std::iter::repeat_n('_', inner));
                masked.push('\'');
            }
            Ok(other) => masked.push_str(other.as_source()),
            Err(LexError::UnterminatedLiteral(start)) => {
                masked.extend(input.chars().skip(start.offset));
                return masked;
            }
        }
    }
}

#[test]
fn test_mask_preserves_offsets() {
    let input = "a = 'x; ORDER BY é' AND b = 1";
    let masked = mask_literals(input);
    assert_eq!(masked.len(), input.len());
    assert!(!masked.contains("ORDER"));
    assert_eq!(&masked[..4], "a = ");
    assert!(masked.ends_with("' AND b = 1"));
}

#[test]
fn test_mask_keeps_unterminated_tail() {
    let input = "x = 'é' AND y = 'O'Brien';";
    let masked = mask_literals(input);
    assert_eq!(masked.len(), input.len());
    assert!(masked.starts_with("x = '__' AND y = '_'"));
    assert!(masked.ends_with("Brien';"));
}

#[test]
fn test_commas_inside_literals() {
    let items = split_list("'Smith, J', 42 , true").unwrap();
    assert_eq!(items, vec!["'Smith, J'", "42", "true"]);
}

#[test]
fn test_adjacent_literals() {
    let mut lexer = Lexer::new("'O''Brien'");
    assert_eq!(lexer.next_token().unwrap(), Token::Quoted("'O'".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Quoted("'Brien'".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_position_counts_chars() {
    let err = Lexer::new("é = 'x").tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedLiteral(Position { offset: 4 }));
}
