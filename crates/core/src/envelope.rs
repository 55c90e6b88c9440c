//! Request and response envelopes shared by every handler.
//!
//! A request is a flat JSON object carrying an `action` plus the
//! operation-specific fields. A response carries a numeric status code and a
//! body that is itself a serialized JSON document.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde::deserialize_optional_string;
use crate::validation::ValidationError;

/// Status codes a handler can return.
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_ERROR: u16 = 500;
}

/// Field names whose values are never written to logs.
const REDACTED_FIELDS: &[&str] = &["password"];

/// Inbound request: `{ "action": ..., ...fields }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RequestEnvelope {
    /// Creates an envelope for the given action with no fields.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            fields: Map::new(),
        }
    }

    /// Adds a field to the envelope.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Deserializes the operation-specific fields into a request payload.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Returns the envelope as JSON with sensitive fields masked, for logging.
    pub fn redacted(&self) -> Value {
        let mut fields = self.fields.clone();
        for name in REDACTED_FIELDS {
            if let Some(value) = fields.get_mut(*name) {
                *value = Value::String("***".to_string());
            }
        }
        if let Some(action) = &self.action {
            fields.insert("action".to_string(), Value::String(action.clone()));
        }
        Value::Object(fields)
    }
}

/// Outbound response: `{ "statusCode": ..., "body": "<json>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Serializes `body` into a response with the given status code.
    ///
    /// Falls back to a 500 message body if serialization fails.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status_code, body },
            Err(_) => Self::message(status::INTERNAL_ERROR, "Failed to serialize response"),
        }
    }

    /// Response whose body is `{ "message": ... }`.
    pub fn message(status_code: u16, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "message": message.into() });
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    /// 200 response with a JSON body.
    pub fn ok<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(status::OK, body)
    }

    /// 201 response with a JSON body.
    pub fn created<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(status::CREATED, body)
    }

    /// Parses the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
