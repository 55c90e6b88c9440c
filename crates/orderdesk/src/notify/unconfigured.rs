use async_trait::async_trait;

use orderdesk_core::notify::{EmailMessage, Notifier, NotifyError};

/// Notifier used when no mail transport is configured.
///
/// Logs each message and fails with [`NotifyError::NotConfigured`], so callers
/// never report an undelivered email as sent. Keeps no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredNotifier;

#[async_trait]
impl Notifier for UnconfiguredNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "No mail transport configured, email not delivered"
        );
        Err(NotifyError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_reports_not_configured() {
        let result = UnconfiguredNotifier
            .send(&EmailMessage::order_confirmation("o1", "a@x.com"))
            .await;

        assert_eq!(result, Err(NotifyError::NotConfigured));
    }
}
