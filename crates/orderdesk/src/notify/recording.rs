use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use orderdesk_core::notify::{EmailMessage, Notifier, NotifyError};

/// Test notifier that keeps every message it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, oldest first.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier_keeps_messages_in_order() {
        let notifier = RecordingNotifier::new();

        notifier
            .send(&EmailMessage::order_confirmation("o1", "a@x.com"))
            .await
            .unwrap();
        notifier
            .send(&EmailMessage::order_confirmation("o2", "b@x.com"))
            .await
            .unwrap();

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@x.com");
        assert_eq!(sent[1].to, "b@x.com");
    }

    #[tokio::test]
    async fn test_clones_share_the_outbox() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();

        clone
            .send(&EmailMessage::new("a@x.com", "Hi", "Body"))
            .await
            .unwrap();

        assert_eq!(notifier.sent().await.len(), 1);
    }
}
