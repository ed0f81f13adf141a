use serde::Serialize;

/// Sort direction of an `ORDER BY` item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// `DESC` in any case is descending; every other word is ascending.
    pub fn from_keyword(word: &str) -> Self {
        if word.eq_ignore_ascii_case("DESC") {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }

    /// Lowercase form used in `$orderby`.
    pub fn as_odata(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One `ORDER BY` item.
///
/// # Example
/// ```text
/// createdon DESC
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        OrderBy {
            field: field.into(),
            direction,
        }
    }

    /// `field asc` / `field desc`
    pub fn to_odata(&self) -> String {
        format!("{} {}", self.field, self.direction.as_odata())
    }
}
