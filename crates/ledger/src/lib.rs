//! Inventory ledger domain (pure, deterministic).
//!
//! This crate contains the business rules for fabric stock: quantity mutation
//! guarded by availability, with an append-only transaction history. No IO, no
//! storage concerns.

pub mod department;
pub mod fabric;
pub mod ledger;
pub mod line;
pub mod quantity;
pub mod seed;
pub mod transaction;

pub use department::Department;
pub use fabric::Fabric;
pub use ledger::Ledger;
pub use line::InventoryLine;
pub use quantity::Quantity;
pub use transaction::{StockTransaction, TransactionKind};
