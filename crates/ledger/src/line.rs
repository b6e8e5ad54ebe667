use serde::{Deserialize, Serialize};

use stockbook_core::{FabricId, LineId};

use crate::department::Department;

/// Current stock quantity for one (fabric, department) pair.
///
/// At most one line exists per pair; [`crate::Ledger`] enforces this by
/// find-or-create on every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLine {
    pub id: LineId,
    pub fabric_id: FabricId,
    pub department: Department,
    pub qty: u64,
}
