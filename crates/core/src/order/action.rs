use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Operations routed by the order handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    CreateOrder,
    UpdateOrder,
    GetOrder,
    ListOrders,
    SendOrderConfirmation,
}

impl OrderAction {
    pub const ALL: [OrderAction; 5] = [
        OrderAction::CreateOrder,
        OrderAction::UpdateOrder,
        OrderAction::GetOrder,
        OrderAction::ListOrders,
        OrderAction::SendOrderConfirmation,
    ];

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::CreateOrder => "createOrder",
            OrderAction::UpdateOrder => "updateOrder",
            OrderAction::GetOrder => "getOrder",
            OrderAction::ListOrders => "listOrders",
            OrderAction::SendOrderConfirmation => "sendOrderConfirmation",
        }
    }

    /// Message returned to the caller when a collaborator fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            OrderAction::CreateOrder => "Error creating order",
            OrderAction::UpdateOrder => "Error updating order",
            OrderAction::GetOrder => "Error retrieving order",
            OrderAction::ListOrders => "Error listing orders",
            OrderAction::SendOrderConfirmation => "Error sending order confirmation",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_parses_from_its_name() {
        for action in OrderAction::ALL {
            assert_eq!(action.as_str().parse::<OrderAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_action_names_are_case_sensitive() {
        assert!("CreateOrder".parse::<OrderAction>().is_err());
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            "deleteOrder".parse::<OrderAction>(),
            Err(ValidationError::UnknownAction("deleteOrder".to_string()))
        );
    }

    #[test]
    fn test_user_actions_are_not_order_actions() {
        assert!("registerUser".parse::<OrderAction>().is_err());
    }
}
