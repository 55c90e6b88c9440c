use async_trait::async_trait;

use crate::order::{Order, OrderPatch};
use crate::user::{User, UserPatch};

use super::Result;

/// Repository for the Orders table.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Gets an order by its ID.
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>>;

    /// Stores an order, replacing any record with the same ID.
    async fn put_order(&self, order: &Order) -> Result<()>;

    /// Merges a patch over an existing order and returns the stored result.
    ///
    /// Fails with `NotFound` if no order has this ID.
    async fn update_order(&self, order_id: &str, patch: &OrderPatch) -> Result<Order>;

    /// Returns every order in the table, in no particular order.
    async fn list_orders(&self) -> Result<Vec<Order>>;
}

/// Repository for the Users table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Stores a user, replacing any record with the same ID.
    async fn put_user(&self, user: &User) -> Result<()>;

    /// Merges a patch over an existing user and returns the stored result.
    ///
    /// Fails with `NotFound` if no user has this ID.
    async fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<User>;

    /// Returns every user in the table, in no particular order.
    async fn list_users(&self) -> Result<Vec<User>>;
}
