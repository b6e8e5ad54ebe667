//! Fixed first-run dataset.
//!
//! Used when no persisted state exists yet, and as the fallback when the
//! persisted state cannot be read.

use stockbook_core::{FabricId, LineId};

use crate::department::Department;
use crate::fabric::Fabric;
use crate::line::InventoryLine;

/// Fabric catalog seeded on first run.
pub fn seed_fabrics() -> Vec<Fabric> {
    vec![
        fabric("f1", "Egyptian Cotton", "100% Cotton"),
        fabric("f2", "Silk Charmeuse", "100% Silk"),
        fabric("f3", "Wool Tweed", "80% Wool 20% Poly"),
    ]
}

/// Opening inventory matching the seed catalog.
pub fn seed_inventory() -> Vec<InventoryLine> {
    vec![
        line("i1", "f1", Department::Tl, 120),
        line("i2", "f2", Department::Tl, 80),
        line("i3", "f1", Department::Swatches, 200),
    ]
}

fn fabric(id: &str, name: &str, composition: &str) -> Fabric {
    Fabric {
        id: FabricId::new(id),
        name: name.to_string(),
        composition: composition.to_string(),
    }
}

fn line(id: &str, fabric_id: &str, department: Department, qty: u64) -> InventoryLine {
    InventoryLine {
        id: LineId::new(id),
        fabric_id: FabricId::new(fabric_id),
        department,
        qty,
    }
}
