//! Application state shared by every handler invocation.
//!
//! Holds the two table repositories and the notifier as trait objects so the
//! handlers stay independent of the backend chosen at compile time.

use std::sync::Arc;

use orderdesk_core::notify::Notifier;
use orderdesk_core::storage::{OrderRepository, UserRepository};

use crate::config::Config;
use crate::notify::UnconfiguredNotifier;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Cannot enable both 'dynamodb' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// Cloned into each request; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Orders table.
    pub order_repo: Arc<dyn OrderRepository>,
    /// Users table.
    pub user_repo: Arc<dyn UserRepository>,
    /// Outbound email.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Creates a new AppState from its collaborators.
    pub fn build(
        order_repo: Arc<dyn OrderRepository>,
        user_repo: Arc<dyn UserRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            order_repo,
            user_repo,
            notifier,
        }
    }
}

/// Selects the notifier: SMTP when compiled in and configured, otherwise one
/// that logs and reports every email as undelivered.
fn notifier_from_config(config: &Config) -> Result<Arc<dyn Notifier>, anyhow::Error> {
    #[cfg(feature = "smtp")]
    if let Some(smtp) = &config.smtp {
        let notifier = crate::notify::SmtpNotifier::new(smtp)?;
        tracing::info!(host = %smtp.host, port = smtp.port, "Using SMTP notifier");
        return Ok(Arc::new(notifier));
    }

    #[cfg(not(feature = "smtp"))]
    if config.smtp.is_some() {
        tracing::warn!("SMTP_HOST is set but the 'smtp' feature is disabled; emails will not be delivered");
    }

    tracing::warn!("No mail transport configured; confirmation emails will not be delivered");
    Ok(Arc::new(UnconfiguredNotifier))
}

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Data lives for the lifetime of the process.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            tracing::info!("Using in-memory storage");

            Ok(Self::build(
                repo.clone(),
                repo,
                notifier_from_config(config)?,
            ))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(DynamoDbRepository::from_config(config).await);
            tracing::info!(
                orders_table = %config.orders_table,
                users_table = %config.users_table,
                "Using DynamoDB storage"
            );

            Ok(Self::build(
                repo.clone(),
                repo,
                notifier_from_config(config)?,
            ))
        }
    }
}

// ============================================================================
// Test support - fakes shared by handler and router tests
// ============================================================================
