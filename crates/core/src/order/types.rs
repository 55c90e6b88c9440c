use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A customer order as stored in the Orders table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    /// Line items, kept exactly as the client sent them.
    pub items: Vec<Value>,
    pub total_amount: Number,
    /// Free-form status such as `pending` or `shipped`.
    pub status: String,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied over a stored order.
///
/// Only `Some` fields overwrite; `updated_at` is always refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPatch {
    pub status: Option<String>,
    pub shipping_address: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl OrderPatch {
    /// Creates a patch that only refreshes the update timestamp.
    pub fn touch(updated_at: DateTime<Utc>) -> Self {
        Self {
            status: None,
            shipping_address: None,
            updated_at,
        }
    }

    /// Sets the new status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the new shipping address.
    pub fn with_shipping_address(mut self, shipping_address: impl Into<String>) -> Self {
        self.shipping_address = Some(shipping_address.into());
        self
    }

    /// Merges the patch into an existing order.
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(status) = &self.status {
            order.status = status.clone();
        }
        if let Some(shipping_address) = &self.shipping_address {
            order.shipping_address = shipping_address.clone();
        }
        order.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_order() -> Order {
        let created = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Order {
            order_id: "o1".to_string(),
            customer_id: "c1".to_string(),
            items: vec![serde_json::json!({ "sku": "A1", "qty": 1 })],
            total_amount: Number::from(10),
            status: "pending".to_string(),
            shipping_address: "1 Main St".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_patch_status_only_preserves_address() {
        let mut order = sample_order();
        let later = order.updated_at + Duration::minutes(5);

        OrderPatch::touch(later)
            .with_status("shipped")
            .apply_to(&mut order);

        assert_eq!(order.status, "shipped");
        assert_eq!(order.shipping_address, "1 Main St");
        assert_eq!(order.updated_at, later);
    }

    #[test]
    fn test_patch_never_changes_identity_or_creation_time() {
        let mut order = sample_order();
        let original = order.clone();

        OrderPatch::touch(original.updated_at + Duration::seconds(1))
            .with_status("cancelled")
            .with_shipping_address("2 Side St")
            .apply_to(&mut order);

        assert_eq!(order.order_id, original.order_id);
        assert_eq!(order.customer_id, original.customer_id);
        assert_eq!(order.created_at, original.created_at);
    }

    #[test]
    fn test_applying_same_patch_twice_is_stable() {
        let mut order = sample_order();
        let patch = OrderPatch::touch(order.updated_at + Duration::seconds(1)).with_status("paid");

        patch.apply_to(&mut order);
        let once = order.clone();
        patch.apply_to(&mut order);

        assert_eq!(order, once);
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let json = serde_json::to_value(sample_order()).unwrap();

        assert_eq!(json["orderId"], "o1");
        assert_eq!(json["customerId"], "c1");
        assert_eq!(json["totalAmount"], 10);
        assert_eq!(json["shippingAddress"], "1 Main St");
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-03-01T12:00:00"));
    }
}
