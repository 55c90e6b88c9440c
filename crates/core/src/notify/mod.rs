mod error;
mod message;
mod traits;

pub use error::NotifyError;
pub use message::{EmailMessage, ORDER_CONFIRMATION_SUBJECT};
pub use traits::Notifier;
