use serde::{Serialize, Serializer};

/// A scalar literal appearing in an INSERT value list or an UPDATE assignment.
///
/// The query language only ever writes scalars to the Web API, so unlike a
/// full JSON value there are no arrays or objects here. Integers and floats
/// are kept apart so that `1000` is sent as `1000` and not `1000.0`.
///
/// # Examples
///
/// ```
/// use sql_odata::Value;
///
/// let null = Value::Null;
/// let active = Value::Boolean(true);
/// let revenue = Value::Integer(1000);
/// let rate = Value::Float(0.25);
/// let name = Value::String("Acme".to_string());
///
/// assert_eq!(serde_json::to_string(&name).unwrap(), "\"Acme\"");
/// assert_eq!(serde_json::to_string(&revenue).unwrap(), "1000");
/// # let _ = (null, active, rate);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Quoted string literal, or an unquoted token kept verbatim
    String(String),
}

impl Value {
    /// Name of the JSON type this value encodes to
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Float(_) | Value::Integer(_) => "number",
            Value::String(_) => "string",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            // Non-finite floats have no JSON form; literal typing never yields them
            Value::Float(n) if !n.is_finite() => serializer.serialize_unit(),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_encoding() {
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Value::Boolean(false)).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Value::Float(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Value::Float(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Integer(1).type_name(), "number");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(true).type_name(), "boolean");
    }
}
