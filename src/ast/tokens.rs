/// Lexical token.
///
/// The lexer only needs to tell quoted literals apart from everything else:
/// list splitting and WHERE translation both work on unquoted text and must
/// leave literal contents alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Single-quoted literal, quotes included, contents untouched
    ///
    /// # Examples
    /// ```text
    /// 'Acme'
    /// 'Smith, J'
    /// '{6F9619FF-8B86-D011-B42D-00C04FC964FF}'
    /// ```
    Quoted(String),

    /// A run of unquoted text up to the next quote or comma
    ///
    /// # Examples
    /// ```text
    /// revenue > 1000 AND name
    /// true
    /// ```
    Text(String),

    /// `,`
    Comma,

    /// End of input
    Eof,
}

impl Token {
    /// Source text this token was read from.
    pub fn as_source(&self) -> &str {
        match self {
            Token::Quoted(s) | Token::Text(s) => s,
            Token::Comma => ",",
            Token::Eof => "",
        }
    }
}
