//! Action-dispatched handlers for the orders and users tables.
//!
//! Each handler takes a [`RequestEnvelope`], runs exactly one operation and
//! always answers with a [`HandlerResponse`].

use std::fmt::Display;
use std::str::FromStr;

use orderdesk_core::envelope::{HandlerResponse, RequestEnvelope};
use orderdesk_core::validation::ValidationError;

pub mod error;
pub mod orders;
pub mod users;

pub use error::{HandlerError, HandlerResult};

/// Parses the envelope's `action` into a handler's action enum.
fn parse_action<A>(envelope: &RequestEnvelope) -> Result<A, ValidationError>
where
    A: FromStr<Err = ValidationError>,
{
    envelope
        .action
        .as_deref()
        .ok_or(ValidationError::MissingAction)?
        .parse()
}

/// Response for an event that is not a JSON object.
pub fn malformed_request(detail: impl Display) -> HandlerResponse {
    HandlerError::from(ValidationError::Malformed(detail.to_string()))
        .into_response("Malformed request", None)
}
