//! Storage adapters for the orders and users tables.
//!
//! The in-memory backend is the default build and the test fake; DynamoDB is
//! enabled with the `dynamodb` feature.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;
