//! Whole-collection persistence for the ledger.

use serde::Serialize;
use serde::de::DeserializeOwned;

use stockbook_ledger::{Fabric, InventoryLine, Ledger, StockTransaction, seed};

use crate::kv::{KeyValueStore, StoreError};

/// Fixed keys for the three persisted collections.
pub const FABRICS_KEY: &str = "fabrics";
pub const INVENTORY_KEY: &str = "inventory";
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Loads and saves the ledger's collections against a key-value store.
///
/// Each save serializes the entire collection and overwrites the stored
/// document; there is no diffing. Reads that fail or decode garbage fall back
/// to the seed dataset so a corrupt store never blocks a session.
#[derive(Debug)]
pub struct LedgerRepository<S> {
    store: S,
}

impl<S> LedgerRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the full ledger, seeding any collection that is missing or
    /// unreadable (transactions seed to an empty history).
    pub fn load(&self) -> Ledger {
        let fabrics: Vec<Fabric> = self
            .load_collection(FABRICS_KEY)
            .unwrap_or_else(seed::seed_fabrics);
        let inventory: Vec<InventoryLine> = self
            .load_collection(INVENTORY_KEY)
            .unwrap_or_else(seed::seed_inventory);
        let transactions: Vec<StockTransaction> = self
            .load_collection(TRANSACTIONS_KEY)
            .unwrap_or_default();

        Ledger::new(fabrics, inventory, transactions)
    }

    pub fn save_fabrics(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.save_collection(FABRICS_KEY, ledger.fabrics())
    }

    pub fn save_inventory(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.save_collection(INVENTORY_KEY, ledger.inventory())
    }

    pub fn save_transactions(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.save_collection(TRANSACTIONS_KEY, ledger.transactions())
    }

    fn load_collection<T>(&self, key: &str) -> Option<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "store read failed; falling back to seed data");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(values) => Some(values),
            Err(err) => {
                tracing::warn!(key, error = %err, "persisted collection is corrupt; falling back to seed data");
                None
            }
        }
    }

    fn save_collection<T>(&self, key: &str, values: &[T]) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(values)?;
        self.store.put(key, &raw)
    }
}
