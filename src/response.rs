//! Reading OData Web API responses.

use serde_json::Value as Json;

/// Records of a response body: the `value` array of a collection response,
/// or the body itself for a single-entity response.
///
/// ```
/// use serde_json::json;
/// use sql_odata::response::records;
///
/// let body = json!({"@odata.context": "...", "value": [{"name": "a"}, {"name": "b"}]});
/// assert_eq!(records(&body).len(), 2);
/// ```
pub fn records(body: &Json) -> Vec<Json> {
    match body.get("value") {
        Some(Json::Array(items)) => items.clone(),
        _ if body.is_object() => vec![body.clone()],
        _ => Vec::new(),
    }
}

/// The `@odata.nextLink` of a paged collection response.
pub fn next_link(body: &Json) -> Option<&str> {
    body.get("@odata.nextLink").and_then(Json::as_str)
}

/// The id inside the trailing parentheses of an `OData-EntityId` header.
///
/// ```
/// use sql_odata::response::entity_id_from_header;
///
/// let header = "https://org.crm.dynamics.com/api/data/v9.2/accounts(00000000-0000-0000-0000-000000000001)";
/// assert_eq!(
///     entity_id_from_header(header).as_deref(),
///     Some("00000000-0000-0000-0000-000000000001")
/// );
/// ```
pub fn entity_id_from_header(value: &str) -> Option<String> {
    let value = value.trim().strip_suffix(')')?;
    let open = value.rfind('(')?;
    let id: String = value[open + 1..]
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '\''))
        .collect();
    (!id.is_empty()).then_some(id)
}

/// String form of a record's key field; numbers are rendered as written.
pub fn key_of(record: &Json, field: &str) -> Option<String> {
    match record.get(field)? {
        Json::String(s) if !s.is_empty() => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_entity_body() {
        let body = json!({"accountid": "1", "name": "Acme"});
        assert_eq!(records(&body), vec![body.clone()]);
    }

    #[test]
    fn test_non_object_body() {
        assert!(records(&json!([1, 2])).is_empty());
        assert!(records(&Json::Null).is_empty());
    }

    #[test]
    fn test_next_link() {
        let body = json!({"value": [], "@odata.nextLink": "https://x/next"});
        assert_eq!(next_link(&body), Some("https://x/next"));
        assert_eq!(next_link(&json!({"value": []})), None);
    }

    #[test]
    fn test_entity_id_variants() {
        assert_eq!(entity_id_from_header("/accounts({abc})").as_deref(), Some("abc"));
        assert_eq!(entity_id_from_header("/accounts('k1')").as_deref(), Some("k1"));
        assert_eq!(entity_id_from_header("/accounts"), None);
        assert_eq!(entity_id_from_header("/accounts()"), None);
    }

    #[test]
    fn test_key_of() {
        let record = json!({"accountid": "a-1", "num": 7, "empty": "", "flag": true});
        assert_eq!(key_of(&record, "accountid").as_deref(), Some("a-1"));
        assert_eq!(key_of(&record, "num").as_deref(), Some("7"));
        assert_eq!(key_of(&record, "empty"), None);
        assert_eq!(key_of(&record, "flag"), None);
        assert_eq!(key_of(&record, "missing"), None);
    }
}
