use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{FabricId, TransactionId};

use crate::department::Department;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Add,
    Dispatch,
}

/// Immutable record of a single stock movement.
///
/// Transactions are append-only facts: once recorded they are never mutated or
/// deleted, and the full history folds back to the current inventory
/// quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub fabric_id: FabricId,
    pub department: Department,
    pub qty: u64,
    #[serde(rename = "date")]
    pub occurred_at: DateTime<Utc>,
}
