//! Pure functions for mapping repository errors to response status codes.

use crate::envelope::status;

use super::RepositoryError;

/// Maps a [`RepositoryError`] to a response status code.
///
/// - `NotFound` -> 404
/// - everything else -> 500
///
/// # Examples
///
/// ```
/// use orderdesk_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Order",
///     id: "o1".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => status::NOT_FOUND,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::InvalidData(_) => status::INTERNAL_ERROR,
    }
}
