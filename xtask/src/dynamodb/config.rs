//! Table configuration types (Functional Core - pure data).

/// Schema of one single-key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    /// String hash key; the tables have no sort key and no secondary indexes.
    pub hash_key: String,
}

impl TableConfig {
    fn new(table_name: &str, hash_key: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            hash_key: hash_key.to_string(),
        }
    }
}

/// Returns the table configurations for orderdesk, orders first.
/// This is a pure function - no I/O.
pub fn orderdesk_tables(orders_table: &str, users_table: &str) -> Vec<TableConfig> {
    vec![
        TableConfig::new(orders_table, "orderId"),
        TableConfig::new(users_table, "userId"),
    ]
}
