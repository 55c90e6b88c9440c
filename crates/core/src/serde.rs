//! Serde helper functions for lenient request deserialization.
//!
//! Request fields are optional at the serde level and checked for presence
//! afterwards. A field counts as absent when it is missing, `null`, an empty
//! string, or a value of the wrong JSON type. These helpers never fail so a
//! malformed field surfaces as a missing one instead of a parse error.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Deserialize an optional string, treating empty strings and non-strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Deserialize an optional JSON number, keeping its original representation.
pub fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(n),
        _ => None,
    })
}

/// Deserialize an optional JSON array of arbitrary values.
pub fn deserialize_optional_array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test struct that uses the deserializer functions
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_number")]
        number_field: Option<Number>,
        #[serde(default, deserialize_with = "deserialize_optional_array")]
        array_field: Option<Vec<Value>>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_optional_string_missing_or_null() {
        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.string_field, None);

        let result: TestStruct = serde_json::from_str(r#"{"string_field": null}"#).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_wrong_type() {
        let json = r#"{"string_field": 42}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_number_keeps_zero() {
        let json = r#"{"number_field": 0}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.number_field, Some(Number::from(0)));
    }

    #[test]
    fn test_deserialize_optional_number_from_string_is_absent() {
        let json = r#"{"number_field": "10"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.number_field, None);
    }

    #[test]
    fn test_deserialize_optional_array_value() {
        let json = r#"{"array_field": [{"sku": "A1", "qty": 2}, "gift-wrap"]}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        let items = result.array_field.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["sku"], "A1");
    }

    #[test]
    fn test_deserialize_optional_array_empty_is_present() {
        let json = r#"{"array_field": []}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.array_field, Some(vec![]));
    }

    #[test]
    fn test_deserialize_optional_array_wrong_type() {
        let json = r#"{"array_field": {"sku": "A1"}}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.array_field, None);
    }
}
