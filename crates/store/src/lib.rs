//! Persistence and application services for the stock ledger.
//!
//! Storage backends are injected behind the [`kv::KeyValueStore`] trait;
//! domain logic stays in `stockbook-ledger`.

pub mod json_file;
pub mod kv;
pub mod repository;
pub mod service;


pub use json_file::JsonFileStore;
pub use kv::{InMemoryKeyValueStore, KeyValueStore, StoreError};
pub use repository::LedgerRepository;
pub use service::{ServiceError, StockService};
