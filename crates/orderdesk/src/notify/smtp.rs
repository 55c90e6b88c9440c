//! SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use orderdesk_core::notify::{EmailMessage, Notifier, NotifyError};

use crate::config::SmtpConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

impl From<EmailError> for NotifyError {
    fn from(error: EmailError) -> Self {
        match error {
            EmailError::Smtp(e) => NotifyError::Transport(e.to_string()),
            EmailError::MessageBuild(e) => NotifyError::MessageBuild(e.to_string()),
            EmailError::InvalidAddress(address) => NotifyError::InvalidAddress(address),
        }
    }
}

/// Notifier that relays plain-text mail through an SMTP server (STARTTLS).
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Create a new notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay address cannot be resolved into a transport.
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            from_address: config.from_address.clone(),
        })
    }

    fn build_message(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(message.to.clone()))?)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        Ok(email)
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let email = self.build_message(message)?;
        self.mailer.send(email).await?;

        tracing::info!(to = %message.to, subject = %message.subject, "Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        self.deliver(message).await.map_err(NotifyError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 2525,
            username: None,
            password: None,
            from_address: "no-reply@orderdesk.local".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_message_rejects_invalid_recipient() {
        let notifier = SmtpNotifier::new(&config()).unwrap();
        let message = EmailMessage::order_confirmation("o1", "not-an-email");

        let result = notifier.build_message(&message);
        assert!(matches!(result, Err(EmailError::InvalidAddress(a)) if a == "not-an-email"));
    }

    #[tokio::test]
    async fn test_build_message_accepts_valid_addresses() {
        let notifier = SmtpNotifier::new(&config()).unwrap();
        let message = EmailMessage::order_confirmation("o1", "a@x.com");

        assert!(notifier.build_message(&message).is_ok());
    }

    #[test]
    fn test_email_error_maps_to_notify_error() {
        let error: NotifyError = EmailError::InvalidAddress("bad".to_string()).into();
        assert_eq!(error, NotifyError::InvalidAddress("bad".to_string()));
    }
}
