//! DynamoDB storage backend implementation.
//!
//! One table per entity: the Orders table keyed by `orderId` and the Users
//! table keyed by `userId`, both hash-key only. Attribute names match the
//! JSON field names of the records.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
