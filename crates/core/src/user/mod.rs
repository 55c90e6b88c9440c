mod action;
mod requests;
mod types;

pub use action::UserAction;
pub use requests::{RegisterUserRequest, UpdateUserRequest, UserKeyRequest};
pub use types::{User, UserPatch, UserProfile};
