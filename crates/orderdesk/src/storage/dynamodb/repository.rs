//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `orderdesk_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use orderdesk_core::order::{Order, OrderPatch};
use orderdesk_core::storage::{OrderRepository, RepositoryError, Result, UserRepository};
use orderdesk_core::user::{User, UserPatch};

use super::conversions::{
    item_to_order, item_to_user, order_patch_expression, order_to_item, user_patch_expression,
    user_to_item, Item, UpdateExpression, ORDER_KEY, USER_KEY,
};
use super::error::{map_get_item_error, map_put_item_error, map_scan_error, map_update_item_error};
use crate::config::Config;

/// DynamoDB-based repository implementation.
///
/// Provides async access to the Orders and Users tables.
pub struct DynamoDbRepository {
    client: Client,
    orders_table: String,
    users_table: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table names.
    pub fn new(
        client: Client,
        orders_table: impl Into<String>,
        users_table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            orders_table: orders_table.into(),
            users_table: users_table.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region
    /// and, when set, a custom endpoint such as a local DynamoDB container.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(
            Client::new(&sdk_config),
            config.orders_table.clone(),
            config.users_table.clone(),
        )
    }

    async fn get_item(&self, table: &str, key: &str, id: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(key, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    /// Applies a conditional `SET` and returns the full item after the update.
    async fn update_item(
        &self,
        table: &str,
        key: &str,
        id: &str,
        update: UpdateExpression,
        entity_type: &'static str,
    ) -> Result<Item> {
        let result = self
            .client
            .update_item()
            .table_name(table)
            .key(key, AttributeValue::S(id.to_string()))
            .update_expression(update.expression())
            .condition_expression(UpdateExpression::KEY_EXISTS)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, entity_type, id))?;

        result.attributes.ok_or_else(|| {
            RepositoryError::InvalidData(format!("UpdateItem returned no attributes for {id}"))
        })
    }

    /// Reads every page of a table scan.
    async fn scan_all(&self, table: &str) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let page = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            items.extend(page.items.unwrap_or_default());

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(table, count = items.len(), "Scanned table");
        Ok(items)
    }
}

// ============================================================================
// OrderRepository implementation
// ============================================================================

#[async_trait]
impl OrderRepository for DynamoDbRepository {
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>> {
        self.get_item(&self.orders_table, ORDER_KEY, order_id)
            .await?
            .map(|item| item_to_order(&item))
            .transpose()
    }

    async fn put_order(&self, order: &Order) -> Result<()> {
        self.put_item(&self.orders_table, order_to_item(order)).await
    }

    async fn update_order(&self, order_id: &str, patch: &OrderPatch) -> Result<Order> {
        let item = self
            .update_item(
                &self.orders_table,
                ORDER_KEY,
                order_id,
                order_patch_expression(patch),
                "Order",
            )
            .await?;

        item_to_order(&item)
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.scan_all(&self.orders_table)
            .await?
            .iter()
            .map(item_to_order)
            .collect()
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.get_item(&self.users_table, USER_KEY, user_id)
            .await?
            .map(|item| item_to_user(&item))
            .transpose()
    }

    async fn put_user(&self, user: &User) -> Result<()> {
        self.put_item(&self.users_table, user_to_item(user)).await
    }

    async fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<User> {
        let item = self
            .update_item(
                &self.users_table,
                USER_KEY,
                user_id,
                user_patch_expression(patch),
                "User",
            )
            .await?;

        item_to_user(&item)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.scan_all(&self.users_table)
            .await?
            .iter()
            .map(item_to_user)
            .collect()
    }
}
