//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types,
//! plus the update expressions used for partial updates.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use orderdesk_core::order::{Order, OrderPatch};
use orderdesk_core::storage::RepositoryError;
use orderdesk_core::user::{User, UserPatch};
use serde_json::{Map, Number, Value};

pub type Item = HashMap<String, AttributeValue>;

pub const ORDER_KEY: &str = "orderId";
pub const USER_KEY: &str = "userId";

// ============================================================================
// JSON conversions
// ============================================================================

/// Convert an arbitrary JSON value to its DynamoDB representation.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute back to JSON.
pub fn attribute_to_json(attribute: &AttributeValue) -> Result<Value, RepositoryError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_json(v)?)))
                .collect::<Result<Map<_, _>, RepositoryError>>()?,
        ),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        other => {
            return Err(RepositoryError::InvalidData(format!(
                "Unsupported attribute type: {:?}",
                other
            )))
        }
    };
    Ok(value)
}

fn parse_number(n: &str) -> Result<Number, RepositoryError> {
    serde_json::from_str(n)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", n, e)))
}

// ============================================================================
// Order conversions
// ============================================================================

/// Convert an Order to DynamoDB item.
pub fn order_to_item(order: &Order) -> Item {
    let mut item = HashMap::new();

    item.insert(
        ORDER_KEY.to_string(),
        AttributeValue::S(order.order_id.clone()),
    );
    item.insert(
        "customerId".to_string(),
        AttributeValue::S(order.customer_id.clone()),
    );
    item.insert(
        "items".to_string(),
        AttributeValue::L(order.items.iter().map(json_to_attribute).collect()),
    );
    item.insert(
        "totalAmount".to_string(),
        AttributeValue::N(order.total_amount.to_string()),
    );
    item.insert("status".to_string(), AttributeValue::S(order.status.clone()));
    item.insert(
        "shippingAddress".to_string(),
        AttributeValue::S(order.shipping_address.clone()),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(order.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(order.updated_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to Order.
pub fn item_to_order(item: &Item) -> Result<Order, RepositoryError> {
    Ok(Order {
        order_id: get_string(item, ORDER_KEY)?,
        customer_id: get_string(item, "customerId")?,
        items: get_list(item, "items")?,
        total_amount: get_number(item, "totalAmount")?,
        status: get_string(item, "status")?,
        shipping_address: get_string(item, "shippingAddress")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// User conversions
// ============================================================================

/// Convert a User to DynamoDB item.
pub fn user_to_item(user: &User) -> Item {
    let mut item = HashMap::new();

    item.insert(USER_KEY.to_string(), AttributeValue::S(user.user_id.clone()));
    item.insert("name".to_string(), AttributeValue::S(user.name.clone()));
    item.insert("email".to_string(), AttributeValue::S(user.email.clone()));
    item.insert(
        "password".to_string(),
        AttributeValue::S(user.password.clone()),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(user.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(user.updated_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to User.
pub fn item_to_user(item: &Item) -> Result<User, RepositoryError> {
    Ok(User {
        user_id: get_string(item, USER_KEY)?,
        name: get_string(item, "name")?,
        email: get_string(item, "email")?,
        password: get_string(item, "password")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Update expressions
// ============================================================================

/// A `SET` update expression guarded by the existence of the key attribute.
///
/// Attribute names and values are always passed through placeholders, so
/// reserved words such as `status` and `name` need no special handling.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    assignments: Vec<String>,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    /// Condition that makes the update fail instead of creating a new item.
    pub const KEY_EXISTS: &'static str = "attribute_exists(#pk)";

    fn new(key_attribute: &str) -> Self {
        Self {
            assignments: Vec::new(),
            names: HashMap::from([("#pk".to_string(), key_attribute.to_string())]),
            values: HashMap::new(),
        }
    }

    fn set(mut self, attribute: &str, value: AttributeValue) -> Self {
        let index = self.assignments.len();
        let name = format!("#a{index}");
        let placeholder = format!(":v{index}");

        self.assignments.push(format!("{name} = {placeholder}"));
        self.names.insert(name, attribute.to_string());
        self.values.insert(placeholder, value);
        self
    }

    fn set_optional(self, attribute: &str, value: Option<&String>) -> Self {
        match value {
            Some(value) => self.set(attribute, AttributeValue::S(value.clone())),
            None => self,
        }
    }

    /// The `UpdateExpression` string.
    pub fn expression(&self) -> String {
        format!("SET {}", self.assignments.join(", "))
    }
}

/// Update expression that applies an order patch.
pub fn order_patch_expression(patch: &OrderPatch) -> UpdateExpression {
    UpdateExpression::new(ORDER_KEY)
        .set_optional("status", patch.status.as_ref())
        .set_optional("shippingAddress", patch.shipping_address.as_ref())
        .set(
            "updatedAt",
            AttributeValue::S(patch.updated_at.to_rfc3339()),
        )
}

/// Update expression that applies a user patch.
pub fn user_patch_expression(patch: &UserPatch) -> UpdateExpression {
    UpdateExpression::new(USER_KEY)
        .set_optional("name", patch.name.as_ref())
        .set_optional("email", patch.email.as_ref())
        .set_optional("password", patch.password.as_ref())
        .set(
            "updatedAt",
            AttributeValue::S(patch.updated_at.to_rfc3339()),
        )
}

// ============================================================================
// Helper functions
// ============================================================================

fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

fn get_number(item: &Item, key: &str) -> Result<Number, RepositoryError> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;
    parse_number(n)
}

fn get_list(item: &Item, key: &str) -> Result<Vec<Value>, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_l().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?
        .iter()
        .map(attribute_to_json)
        .collect()
}

fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn sample_order() -> Order {
        Order {
            order_id: "o1".to_string(),
            customer_id: "c1".to_string(),
            items: vec![json!({ "sku": "A1", "qty": 2, "gift": false, "note": null })],
            total_amount: Number::from_f64(19.99).unwrap(),
            status: "pending".to_string(),
            shipping_address: "1 Main St".to_string(),
            created_at: ts("2024-01-15T10:30:00Z"),
            updated_at: ts("2024-01-15T10:30:00Z"),
        }
    }

    fn sample_user() -> User {
        User {
            user_id: "u1".to_string(),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
            created_at: ts("2024-01-15T10:30:00Z"),
            updated_at: ts("2024-01-16T08:00:00Z"),
        }
    }

    #[test]
    fn test_order_item_layout() {
        let item = order_to_item(&sample_order());

        assert_eq!(item.get("orderId").unwrap().as_s().unwrap(), "o1");
        assert_eq!(item.get("totalAmount").unwrap().as_n().unwrap(), "19.99");
        assert!(item.get("items").unwrap().as_l().is_ok());
        assert_eq!(
            item.get("createdAt").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn test_order_survives_item_conversion() {
        let order = sample_order();
        let restored = item_to_order(&order_to_item(&order)).unwrap();
        assert_eq!(restored, order);
    }

    #[test]
    fn test_user_item_keeps_password() {
        let user = sample_user();
        let item = user_to_item(&user);

        assert_eq!(item.get("password").unwrap().as_s().unwrap(), "p");
        assert_eq!(item_to_user(&item).unwrap(), user);
    }

    #[test]
    fn test_item_missing_field_is_invalid_data() {
        let mut item = order_to_item(&sample_order());
        item.remove("customerId");

        let result = item_to_order(&item);
        assert!(matches!(
            result,
            Err(RepositoryError::InvalidData(msg)) if msg.contains("customerId")
        ));
    }

    #[test]
    fn test_item_with_bad_timestamp_is_invalid_data() {
        let mut item = user_to_item(&sample_user());
        item.insert(
            "updatedAt".to_string(),
            AttributeValue::S("yesterday".to_string()),
        );

        assert!(matches!(
            item_to_user(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_string_sets_read_as_arrays() {
        let value = attribute_to_json(&AttributeValue::Ss(vec![
            "a".to_string(),
            "b".to_string(),
        ]))
        .unwrap();
        assert_eq!(value, json!(["a", "b"]));
    }

    #[test]
    fn test_binary_attribute_is_rejected() {
        let blob = aws_sdk_dynamodb::primitives::Blob::new(vec![1, 2, 3]);
        assert!(attribute_to_json(&AttributeValue::B(blob)).is_err());
    }

    #[test]
    fn test_order_patch_expression_sets_only_supplied_fields() {
        let patch = OrderPatch::touch(ts("2024-02-01T00:00:00Z")).with_status("shipped");
        let update = order_patch_expression(&patch);

        assert_eq!(update.expression(), "SET #a0 = :v0, #a1 = :v1");
        assert_eq!(update.names.get("#pk").unwrap(), "orderId");
        assert_eq!(update.names.get("#a0").unwrap(), "status");
        assert_eq!(update.names.get("#a1").unwrap(), "updatedAt");
        assert_eq!(
            update.values.get(":v0").unwrap().as_s().unwrap(),
            "shipped"
        );
        assert!(!update.names.values().any(|n| n == "shippingAddress"));
    }

    #[test]
    fn test_user_patch_expression_with_all_fields() {
        let patch = UserPatch::touch(ts("2024-02-01T00:00:00Z"))
            .with_name("Bea")
            .with_email("b@x.com")
            .with_password("q");
        let update = user_patch_expression(&patch);

        assert_eq!(
            update.expression(),
            "SET #a0 = :v0, #a1 = :v1, #a2 = :v2, #a3 = :v3"
        );
        assert_eq!(update.names.get("#pk").unwrap(), "userId");
        assert_eq!(update.values.len(), 4);
    }
}
