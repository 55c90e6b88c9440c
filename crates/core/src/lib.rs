//! Functional core for orderdesk.
//!
//! Pure data types, request validation and the collaborator contracts
//! (record stores and notifiers). Nothing in this crate performs I/O.

pub mod envelope;
pub mod notify;
pub mod order;
pub mod serde;
pub mod storage;
pub mod user;
pub mod validation;
