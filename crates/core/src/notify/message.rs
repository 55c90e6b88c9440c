use serde::{Deserialize, Serialize};

/// Subject line of the order confirmation email.
pub const ORDER_CONFIRMATION_SUBJECT: &str = "Order Confirmation";

/// A plain-text email ready to hand to a [`Notifier`](super::Notifier).
///
/// The sender address belongs to the transport, not the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// The fixed "order received" confirmation for `order_id`.
    pub fn order_confirmation(order_id: &str, to: impl Into<String>) -> Self {
        Self::new(
            to,
            ORDER_CONFIRMATION_SUBJECT,
            format!(
                "Thank you for your purchase! Your order with ID {order_id} has been received and is being processed."
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_confirmation_template() {
        let message = EmailMessage::order_confirmation("o1", "a@x.com");

        assert_eq!(message.to, "a@x.com");
        assert_eq!(message.subject, "Order Confirmation");
        assert!(message.body.contains("order with ID o1 has been received"));
    }
}
