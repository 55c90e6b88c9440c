use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Operations routed by the user handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    RegisterUser,
    GetUser,
    UpdateUser,
    ListUsers,
}

impl UserAction {
    pub const ALL: [UserAction; 4] = [
        UserAction::RegisterUser,
        UserAction::GetUser,
        UserAction::UpdateUser,
        UserAction::ListUsers,
    ];

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAction::RegisterUser => "registerUser",
            UserAction::GetUser => "getUser",
            UserAction::UpdateUser => "updateUser",
            UserAction::ListUsers => "listUsers",
        }
    }

    /// Message returned to the caller when a collaborator fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            UserAction::RegisterUser => "Error registering user",
            UserAction::GetUser => "Error retrieving user",
            UserAction::UpdateUser => "Error updating user",
            UserAction::ListUsers => "Error listing users",
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_parses_from_its_name() {
        for action in UserAction::ALL {
            assert_eq!(action.as_str().parse::<UserAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            "createOrder".parse::<UserAction>(),
            Err(ValidationError::UnknownAction("createOrder".to_string()))
        );
    }
}
