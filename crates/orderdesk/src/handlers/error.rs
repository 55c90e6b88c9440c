use thiserror::Error;

use orderdesk_core::envelope::{status, HandlerResponse, RequestEnvelope};
use orderdesk_core::notify::NotifyError;
use orderdesk_core::storage::{repository_error_to_status_code, RepositoryError};
use orderdesk_core::validation::ValidationError;

/// Everything that can go wrong inside a handler invocation.
///
/// Converted into a [`HandlerResponse`] at the handler boundary; nothing
/// propagates past it.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity_type} not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

pub type HandlerResult<T> = Result<T, HandlerError>;

impl From<RepositoryError> for HandlerError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { entity_type, id } => {
                HandlerError::NotFound { entity_type, id }
            }
            other => HandlerError::Repository(other),
        }
    }
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::Validation(_) => status::BAD_REQUEST,
            HandlerError::NotFound { .. } => status::NOT_FOUND,
            HandlerError::Repository(e) => repository_error_to_status_code(e),
            HandlerError::Notify(_) => status::INTERNAL_ERROR,
        }
    }

    /// Logs the error together with the (redacted) event and renders it as a
    /// response.
    ///
    /// Client errors carry their own message. Server errors only ever expose
    /// `failure_message`. `event` is `None` only when the input never parsed
    /// into an envelope.
    pub fn into_response(
        self,
        failure_message: &str,
        event: Option<&RequestEnvelope>,
    ) -> HandlerResponse {
        let status_code = self.status_code();
        let event = event
            .map(|envelope| envelope.redacted().to_string())
            .unwrap_or_default();

        match &self {
            HandlerError::NotFound { entity_type, id } => {
                tracing::warn!(entity_type, id = %id, event = %event, "Record not found");
            }
            _ if status_code >= status::INTERNAL_ERROR => {
                tracing::error!(error = %self, event = %event, "{failure_message}");
                return HandlerResponse::message(status_code, failure_message);
            }
            _ => {
                tracing::warn!(
                    status = status_code,
                    error = %self,
                    event = %event,
                    "Rejected request"
                );
            }
        }

        HandlerResponse::message(status_code, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_repository_not_found_becomes_not_found() {
        let error: HandlerError = RepositoryError::NotFound {
            entity_type: "Order",
            id: "o1".to_string(),
        }
        .into();

        assert!(matches!(error, HandlerError::NotFound { id, .. } if id == "o1"));
    }

    #[test]
    fn test_status_codes() {
        let validation: HandlerError = ValidationError::MissingFields(vec!["orderId"]).into();
        let repository: HandlerError = RepositoryError::QueryFailed("boom".to_string()).into();
        let notify: HandlerError = NotifyError::Transport("refused".to_string()).into();

        assert_eq!(validation.status_code(), 400);
        assert_eq!(repository.status_code(), 500);
        assert_eq!(notify.status_code(), 500);
    }

    #[test]
    fn test_validation_response_carries_reason() {
        let error: HandlerError = ValidationError::MissingFields(vec!["orderId", "status"]).into();
        let response = error.into_response("Error creating order", None);

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body_json().unwrap()["message"],
            "Missing required parameters: orderId, status"
        );
    }

    #[test]
    fn test_not_found_response() {
        let error = HandlerError::NotFound {
            entity_type: "User",
            id: "u9".to_string(),
        };
        let response = error.into_response("Error retrieving user", None);

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body_json().unwrap()["message"], "User not found");
    }

    #[test]
    fn test_server_error_hides_detail() {
        let error: HandlerError =
            RepositoryError::ConnectionFailed("secret-host:8000 refused".to_string()).into();
        let response = error.into_response("Error listing orders", None);

        assert_eq!(response.status_code, 500);
        assert!(!response.body.contains("secret-host"));
        assert_eq!(
            response.body_json().unwrap()["message"],
            "Error listing orders"
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_error_log_carries_redacted_event_at_warn_level() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let envelope = RequestEnvelope::new("registerUser")
            .with_field("userId", "u1")
            .with_field("password", "hunter2");
        let error: HandlerError = RepositoryError::QueryFailed("boom".to_string()).into();

        let response = tracing::subscriber::with_default(subscriber, || {
            error.into_response("Error registering user", Some(&envelope))
        });

        assert_eq!(response.status_code, 500);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Error registering user"));
        assert!(output.contains("u1"));
        assert!(!output.contains("hunter2"));
    }
}
