//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
    /// Hash key attribute reported by DescribeTable.
    pub hash_key: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned change for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChange {
    /// Table doesn't exist, needs to be created.
    Create { config: TableConfig },
    /// Table exists with the expected key.
    Unchanged { table_name: String },
    /// Table exists with a different key; it cannot be fixed in place.
    KeyMismatch {
        table_name: String,
        expected: String,
        actual: String,
    },
}

/// Plan for destroying one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableDeletion {
    /// Table exists and will be deleted.
    Delete { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what is needed to bring one table to the desired state.
pub fn plan_table(current: Option<&TableState>, desired: &TableConfig) -> TableChange {
    match current {
        None => TableChange::Create {
            config: desired.clone(),
        },
        Some(state) => match state.hash_key.as_deref() {
            Some(actual) if actual != desired.hash_key => TableChange::KeyMismatch {
                table_name: desired.table_name.clone(),
                expected: desired.hash_key.clone(),
                actual: actual.to_string(),
            },
            _ => TableChange::Unchanged {
                table_name: desired.table_name.clone(),
            },
        },
    }
}

/// Pure function: Calculate the destroy step for one table.
pub fn plan_table_deletion(current: Option<&TableState>, table_name: &str) -> TableDeletion {
    match current {
        Some(_) => TableDeletion::Delete {
            table_name: table_name.to_string(),
        },
        None => TableDeletion::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// True when at least one table needs to be created.
pub fn has_changes(plan: &[TableChange]) -> bool {
    plan.iter()
        .any(|change| matches!(change, TableChange::Create { .. }))
}

/// True when at least one table will be deleted.
pub fn has_deletions(plan: &[TableDeletion]) -> bool {
    plan.iter()
        .any(|deletion| matches!(deletion, TableDeletion::Delete { .. }))
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &[TableChange]) -> Vec<String> {
    let mut lines = Vec::new();
    for change in plan {
        match change {
            TableChange::Create { config } => {
                lines.push(format!("+ Create table: {}", config.table_name));
                lines.push(format!("  Partition key: {} (S)", config.hash_key));
                lines.push("  Billing: PAY_PER_REQUEST".to_string());
            }
            TableChange::Unchanged { table_name } => {
                lines.push(format!("= Table '{}' is up to date", table_name));
            }
            TableChange::KeyMismatch {
                table_name,
                expected,
                actual,
            } => {
                lines.push(format!(
                    "! Table '{}' is keyed by '{}', expected '{}'",
                    table_name, actual, expected
                ));
            }
        }
    }
    lines
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &[TableDeletion]) -> Vec<String> {
    plan.iter()
        .map(|deletion| match deletion {
            TableDeletion::Delete { table_name } => {
                format!("- Delete table: {} (ALL DATA WILL BE LOST)", table_name)
            }
            TableDeletion::AlreadyGone { table_name } => {
                format!("= Table '{}' does not exist", table_name)
            }
        })
        .collect()
}
