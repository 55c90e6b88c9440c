use async_trait::async_trait;

use super::{EmailMessage, NotifyError};

/// Transactional email sender.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a single message. No retries are performed.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}
