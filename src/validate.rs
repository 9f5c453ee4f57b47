use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ApiError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Parse a raw request body into a JSON object.
///
/// An empty or whitespace-only body reads as `{}` so that write endpoints can
/// report missing fields instead of a parse failure.
pub fn parse_json_body(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    let raw = std::str::from_utf8(body)
        .map_err(|_| ApiError::InvalidBody("Invalid JSON body."))?;
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|_| ApiError::InvalidBody("Invalid JSON body."))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::InvalidBody("JSON body must be an object.")),
    }
}

/// String form of a field, trimmed. Absent and `null` both read as empty;
/// non-string scalars are stringified first.
pub fn field_str(data: &Map<String, Value>, key: &str) -> String {
    match data.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// A field is missing when absent or blank after trimming.
pub fn require_fields(data: &Map<String, Value>, required: &[&str]) -> Result<(), ApiError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| field_str(data, key).is_empty())
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::MissingFields(missing))
    }
}

/// Strict `YYYY-MM-DD` calendar parse; `field` names the offending parameter
/// in the error.
pub fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ApiError::InvalidDate(field))
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn empty_body_reads_as_empty_object() {
        assert!(parse_json_body(b"").unwrap().is_empty());
        assert!(parse_json_body(b"   \n").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert!(matches!(
            parse_json_body(b"{not json"),
            Err(ApiError::InvalidBody("Invalid JSON body."))
        ));
        assert!(matches!(
            parse_json_body(&[0xff, 0xfe]),
            Err(ApiError::InvalidBody("Invalid JSON body."))
        ));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(matches!(
            parse_json_body(b"[1, 2, 3]"),
            Err(ApiError::InvalidBody("JSON body must be an object."))
        ));
        assert!(matches!(
            parse_json_body(b"\"hello\""),
            Err(ApiError::InvalidBody("JSON body must be an object."))
        ));
    }

    #[test]
    fn blank_and_null_fields_count_as_missing() {
        let data = obj(json!({
            "employee_id": "  ",
            "full_name": null,
            "email": "a@x.com",
            "department": 42
        }));
        let err = require_fields(&data, &["employee_id", "full_name", "email", "department"])
            .unwrap_err();
        match err {
            ApiError::MissingFields(missing) => {
                assert_eq!(missing, vec!["employee_id", "full_name"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn field_str_trims_and_stringifies() {
        let data = obj(json!({ "name": "  Ada  ", "n": 7 }));
        assert_eq!(field_str(&data, "name"), "Ada");
        assert_eq!(field_str(&data, "n"), "7");
        assert_eq!(field_str(&data, "absent"), "");
    }

    #[test]
    fn calendar_dates_parse_strictly() {
        assert_eq!(
            parse_date("2024-01-31", "date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert!(matches!(
            parse_date("2024-13-40", "date"),
            Err(ApiError::InvalidDate("date"))
        ));
        assert!(matches!(
            parse_date("31/01/2024", "date_from"),
            Err(ApiError::InvalidDate("date_from"))
        ));
    }

    #[test]
    fn email_syntax_check() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("a@b").is_err());
    }
}
