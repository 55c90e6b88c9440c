//! User handler: register, fetch, update and list users.
//!
//! Passwords are stored as received but never leave the handler; every user
//! in a response body is a [`UserProfile`].

use chrono::Utc;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use orderdesk_core::envelope::{HandlerResponse, RequestEnvelope};
use orderdesk_core::user::{
    RegisterUserRequest, UpdateUserRequest, UserAction, UserKeyRequest, UserProfile,
};

use super::{parse_action, HandlerError, HandlerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRegistered<'a> {
    message: &'static str,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserUpdated {
    message: &'static str,
    updated_user: UserProfile,
}

/// Runs one user event to completion.
pub async fn handle(state: &AppState, envelope: RequestEnvelope) -> HandlerResponse {
    let span = tracing::info_span!(
        "invocation",
        handler = "users",
        action = envelope.action.as_deref().unwrap_or_default(),
        request_id = %Uuid::new_v4(),
    );

    dispatch(state, &envelope).instrument(span).await
}

async fn dispatch(state: &AppState, envelope: &RequestEnvelope) -> HandlerResponse {
    tracing::info!(event = %envelope.redacted(), "Received event");

    let action: UserAction = match parse_action(envelope) {
        Ok(action) => action,
        Err(e) => return HandlerError::from(e).into_response("Invalid action", Some(envelope)),
    };

    let result = match action {
        UserAction::RegisterUser => register_user(state, envelope).await,
        UserAction::GetUser => get_user(state, envelope).await,
        UserAction::UpdateUser => update_user(state, envelope).await,
        UserAction::ListUsers => list_users(state).await,
    };

    result.unwrap_or_else(|e| e.into_response(action.failure_message(), Some(envelope)))
}

async fn register_user(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> HandlerResult<HandlerResponse> {
    let user = envelope
        .payload::<RegisterUserRequest>()?
        .into_user(Utc::now())?;

    state.user_repo.put_user(&user).await?;
    tracing::info!(user_id = %user.user_id, "User registered");

    Ok(HandlerResponse::created(&UserRegistered {
        message: "User registered successfully",
        user_id: &user.user_id,
    }))
}

async fn get_user(state: &AppState, envelope: &RequestEnvelope) -> HandlerResult<HandlerResponse> {
    let user_id = envelope.payload::<UserKeyRequest>()?.into_key()?;
    let user = state.user_repo.get_user(&user_id).await?;

    match user {
        Some(user) => Ok(HandlerResponse::ok(&UserProfile::from(user))),
        None => Err(HandlerError::NotFound {
            entity_type: "User",
            id: user_id,
        }),
    }
}

async fn update_user(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> HandlerResult<HandlerResponse> {
    let (user_id, patch) = envelope
        .payload::<UpdateUserRequest>()?
        .into_patch(Utc::now())?;

    if state.user_repo.get_user(&user_id).await?.is_none() {
        return Err(HandlerError::NotFound {
            entity_type: "User",
            id: user_id,
        });
    }

    let updated = state.user_repo.update_user(&user_id, &patch).await?;
    tracing::info!(user_id = %user_id, "User updated");

    Ok(HandlerResponse::ok(&UserUpdated {
        message: "User updated successfully",
        updated_user: updated.into(),
    }))
}

async fn list_users(state: &AppState) -> HandlerResult<HandlerResponse> {
    let users: Vec<UserProfile> = state
        .user_repo
        .list_users()
        .await?
        .into_iter()
        .map(UserProfile::from)
        .collect();
    tracing::debug!(count = users.len(), "Listed users");

    Ok(HandlerResponse::ok(&users))
}
