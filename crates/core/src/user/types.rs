use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as stored in the Users table.
///
/// The password is stored exactly as supplied. It never leaves the handler:
/// responses use [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, returned in response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Partial update applied over a stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserPatch {
    /// Creates a patch that only refreshes the update timestamp.
    pub fn touch(updated_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            email: None,
            password: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Merges the patch into an existing user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        user.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        let created = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        User {
            user_id: "u1".to_string(),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_profile_omits_password() {
        let json = serde_json::to_value(UserProfile::from(sample_user())).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["name"], "Ann");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_patch_merges_only_supplied_fields() {
        let mut user = sample_user();
        let later = user.updated_at + Duration::minutes(1);

        UserPatch::touch(later).with_email("ann@y.com").apply_to(&mut user);

        assert_eq!(user.email, "ann@y.com");
        assert_eq!(user.name, "Ann");
        assert_eq!(user.password, "p");
        assert_eq!(user.updated_at, later);
    }

    #[test]
    fn test_patch_keeps_identity() {
        let mut user = sample_user();
        let original = user.clone();

        UserPatch::touch(original.updated_at)
            .with_name("Bea")
            .with_password("q")
            .apply_to(&mut user);

        assert_eq!(user.user_id, original.user_id);
        assert_eq!(user.created_at, original.created_at);
        assert_eq!(user.password, "q");
    }
}
