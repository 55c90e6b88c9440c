use thiserror::Error;

/// Errors that can occur when sending a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
    #[error("Failed to build message: {0}")]
    MessageBuild(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("No mail transport configured")]
    NotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_error_display() {
        assert_eq!(
            NotifyError::InvalidAddress("not-an-email".to_string()).to_string(),
            "Invalid email address: not-an-email"
        );
        assert_eq!(
            NotifyError::Transport("connection refused".to_string()).to_string(),
            "Transport error: connection refused"
        );
        assert_eq!(
            NotifyError::NotConfigured.to_string(),
            "No mail transport configured"
        );
    }
}
