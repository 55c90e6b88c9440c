//! Request payloads for user operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;
use crate::validation::ValidationError;

use super::types::{User, UserPatch};

/// Payload for `registerUser`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub password: Option<String>,
}

impl RegisterUserRequest {
    /// Validates presence of every field and builds the user.
    pub fn into_user(self, now: DateTime<Utc>) -> Result<User, ValidationError> {
        match (self.user_id, self.name, self.email, self.password) {
            (Some(user_id), Some(name), Some(email), Some(password)) => Ok(User {
                user_id,
                name,
                email,
                password,
                created_at: now,
                updated_at: now,
            }),
            (user_id, name, email, password) => Err(ValidationError::missing([
                ("userId", user_id.is_none()),
                ("name", name.is_none()),
                ("email", email.is_none()),
                ("password", password.is_none()),
            ])),
        }
    }
}

/// Payload for `updateUser`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Splits the request into the target key and the patch to merge.
    pub fn into_patch(self, now: DateTime<Utc>) -> Result<(String, UserPatch), ValidationError> {
        let user_id = self
            .user_id
            .ok_or(ValidationError::MissingFields(vec!["userId"]))?;

        Ok((
            user_id,
            UserPatch {
                name: self.name,
                email: self.email,
                password: self.password,
                updated_at: now,
            },
        ))
    }
}

/// Payload for `getUser`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKeyRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
}

impl UserKeyRequest {
    /// Returns the user ID or a validation error.
    pub fn into_key(self) -> Result<String, ValidationError> {
        self.user_id
            .ok_or(ValidationError::MissingFields(vec!["userId"]))
    }
}
