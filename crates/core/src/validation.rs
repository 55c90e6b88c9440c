use thiserror::Error;

/// Errors produced while validating an inbound request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Missing action")]
    MissingAction,
    #[error("Invalid action: {0}")]
    UnknownAction(String),
    #[error("Malformed request: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Builds a `MissingFields` error from `(field, is_missing)` pairs.
    ///
    /// Field order is preserved so the message lists fields the way the
    /// request type declares them.
    pub fn missing<const N: usize>(checks: [(&'static str, bool); N]) -> Self {
        let fields = checks
            .into_iter()
            .filter_map(|(field, is_missing)| is_missing.then_some(field))
            .collect();
        ValidationError::MissingFields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keeps_only_absent_fields_in_order() {
        let error = ValidationError::missing([("orderId", false), ("status", true), ("items", true)]);
        assert_eq!(
            error,
            ValidationError::MissingFields(vec!["status", "items"])
        );
    }

    #[test]
    fn test_missing_fields_display() {
        let error = ValidationError::MissingFields(vec!["orderId", "customerId"]);
        assert_eq!(
            error.to_string(),
            "Missing required parameters: orderId, customerId"
        );
    }

    #[test]
    fn test_unknown_action_display() {
        let error = ValidationError::UnknownAction("deleteOrder".to_string());
        assert_eq!(error.to_string(), "Invalid action: deleteOrder");
    }

    #[test]
    fn test_missing_action_display() {
        assert_eq!(ValidationError::MissingAction.to_string(), "Missing action");
    }
}
