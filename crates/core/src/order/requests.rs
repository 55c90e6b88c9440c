//! Request payloads for order operations.
//!
//! Every field is optional at the serde level; the conversion methods perform
//! the presence checks and report all missing fields at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::serde::{
    deserialize_optional_array, deserialize_optional_number, deserialize_optional_string,
};
use crate::validation::ValidationError;

use super::types::{Order, OrderPatch};

/// Payload for `createOrder`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_array")]
    pub items: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub total_amount: Option<Number>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub shipping_address: Option<String>,
    /// Recipient for the confirmation email. Not required to create the order.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
}

impl CreateOrderRequest {
    /// Validates presence of the required fields and builds the order.
    ///
    /// Both timestamps are set to `now`.
    pub fn into_order(self, now: DateTime<Utc>) -> Result<Order, ValidationError> {
        match (
            self.order_id,
            self.customer_id,
            self.items,
            self.total_amount,
            self.status,
            self.shipping_address,
        ) {
            (
                Some(order_id),
                Some(customer_id),
                Some(items),
                Some(total_amount),
                Some(status),
                Some(shipping_address),
            ) => Ok(Order {
                order_id,
                customer_id,
                items,
                total_amount,
                status,
                shipping_address,
                created_at: now,
                updated_at: now,
            }),
            (order_id, customer_id, items, total_amount, status, shipping_address) => {
                Err(ValidationError::missing([
                    ("orderId", order_id.is_none()),
                    ("customerId", customer_id.is_none()),
                    ("items", items.is_none()),
                    ("totalAmount", total_amount.is_none()),
                    ("status", status.is_none()),
                    ("shippingAddress", shipping_address.is_none()),
                ]))
            }
        }
    }
}

/// Payload for `updateOrder`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub shipping_address: Option<String>,
}

impl UpdateOrderRequest {
    /// Splits the request into the target key and the patch to merge.
    pub fn into_patch(self, now: DateTime<Utc>) -> Result<(String, OrderPatch), ValidationError> {
        let order_id = self
            .order_id
            .ok_or(ValidationError::MissingFields(vec!["orderId"]))?;

        Ok((
            order_id,
            OrderPatch {
                status: self.status,
                shipping_address: self.shipping_address,
                updated_at: now,
            },
        ))
    }
}

/// Payload for `getOrder`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderKeyRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub order_id: Option<String>,
}

impl OrderKeyRequest {
    /// Returns the order ID or a validation error.
    pub fn into_key(self) -> Result<String, ValidationError> {
        self.order_id
            .ok_or(ValidationError::MissingFields(vec!["orderId"]))
    }
}

/// Payload for `sendOrderConfirmation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendConfirmationRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
}

impl SendConfirmationRequest {
    /// Creates a request for the given order and recipient.
    pub fn new(order_id: Option<String>, email: Option<String>) -> Self {
        Self { order_id, email }
    }

    /// Returns `(order_id, email)` or a validation error naming what is missing.
    pub fn into_parts(self) -> Result<(String, String), ValidationError> {
        match (self.order_id, self.email) {
            (Some(order_id), Some(email)) => Ok((order_id, email)),
            (order_id, email) => Err(ValidationError::missing([
                ("orderId", order_id.is_none()),
                ("email", email.is_none()),
            ])),
        }
    }
}
