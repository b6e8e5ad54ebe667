use serde::{Deserialize, Serialize};

use stockbook_core::FabricId;

/// Catalog entry: one fabric and its composition.
///
/// The catalog is static for the application's lifetime; ledger operations
/// read it but never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fabric {
    pub id: FabricId,
    pub name: String,
    pub composition: String,
}
