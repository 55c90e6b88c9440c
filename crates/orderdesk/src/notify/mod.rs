//! Notifier adapters.
//!
//! Without a configured SMTP relay the unconfigured notifier is used, which
//! logs the message and reports it as undelivered. The SMTP notifier sits
//! behind the `smtp` feature.

#[cfg(test)]
mod recording;
#[cfg(feature = "smtp")]
mod smtp;
mod unconfigured;

#[cfg(test)]
pub use recording::RecordingNotifier;
#[cfg(feature = "smtp")]
pub use smtp::SmtpNotifier;
pub use unconfigured::UnconfiguredNotifier;
