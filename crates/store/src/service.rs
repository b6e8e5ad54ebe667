//! Stock operations over a persistent ledger: parse, execute, persist, log.

use chrono::Utc;
use thiserror::Error;

use stockbook_core::{DomainError, FabricId};
use stockbook_ledger::{Department, Ledger, Quantity, StockTransaction};

use crate::kv::{KeyValueStore, StoreError};
use crate::repository::LedgerRepository;

/// Stock operation error.
///
/// Domain failures are deterministic rejections (bad input, insufficient
/// stock); store failures mean the mutation was applied in memory but could
/// not be persisted.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),
}

/// Application service over the ledger.
///
/// Accepts the raw form inputs (fabric id and quantity as text), validates
/// them into domain types, executes the ledger operation, persists every
/// mutated collection in full and logs the outcome. Failures come back as
/// typed errors; callers decide how to present them.
#[derive(Debug)]
pub struct StockService<S> {
    ledger: Ledger,
    repository: LedgerRepository<S>,
}

impl<S> StockService<S>
where
    S: KeyValueStore,
{
    /// Open the service against a store, loading persisted state (or the seed
    /// dataset on first run / unreadable state).
    ///
    /// The loaded state is written back immediately so a first run leaves the
    /// store populated; a failure here is logged, not fatal, since every later
    /// mutation re-persists the full collections.
    pub fn open(store: S) -> Self {
        let repository = LedgerRepository::new(store);
        let ledger = repository.load();
        let service = Self { ledger, repository };

        if let Err(err) = service.persist_all() {
            tracing::warn!(error = %err, "failed to write loaded state back to the store");
        }
        service
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Name of a catalog fabric, or `None` for unknown/blank ids.
    pub fn fabric_name(&self, fabric_id: &str) -> Option<&str> {
        let fabric_id: FabricId = fabric_id.parse().ok()?;
        self.ledger.fabric_name(&fabric_id)
    }

    /// Record newly received stock for a (fabric, department) pair.
    pub fn add_stock(
        &mut self,
        fabric_id: &str,
        department: Department,
        qty_input: &str,
    ) -> Result<StockTransaction, ServiceError> {
        let fabric_id: FabricId = fabric_id.parse()?;
        let qty: Quantity = qty_input.parse()?;

        let txn = self
            .ledger
            .add_stock(fabric_id, department, qty, Utc::now())?;
        self.persist_movement()?;

        tracing::info!(
            fabric_id = %txn.fabric_id,
            department = %txn.department,
            qty = txn.qty,
            "stock added"
        );
        Ok(txn)
    }

    /// Dispatch stock out of a department.
    ///
    /// Insufficient stock (including a missing line) comes back as a typed
    /// error and leaves all state unchanged.
    pub fn dispatch_stock(
        &mut self,
        fabric_id: &str,
        department: Department,
        qty_input: &str,
    ) -> Result<StockTransaction, ServiceError> {
        let fabric_id: FabricId = fabric_id.parse()?;
        let qty: Quantity = qty_input.parse()?;

        match self
            .ledger
            .dispatch_stock(fabric_id, department, qty, Utc::now())
        {
            Ok(txn) => {
                self.persist_movement()?;
                tracing::info!(
                    fabric_id = %txn.fabric_id,
                    department = %txn.department,
                    qty = txn.qty,
                    "stock dispatched"
                );
                Ok(txn)
            }
            Err(err) => {
                tracing::warn!(department = %department, error = %err, "dispatch rejected");
                Err(err.into())
            }
        }
    }

    /// Persist the collections a stock movement mutates.
    fn persist_movement(&self) -> Result<(), StoreError> {
        self.repository.save_inventory(&self.ledger)?;
        self.repository.save_transactions(&self.ledger)
    }

    fn persist_all(&self) -> Result<(), StoreError> {
        self.repository.save_fabrics(&self.ledger)?;
        self.persist_movement()
    }
}
