//! Offline shell policy (pure, no IO).
//!
//! Models the decisions the PWA shell makes around the ledger: how fetches are
//! routed between cache and network, which caches survive an upgrade, and what
//! a stock push notification carries. Actually touching caches, the network or
//! the notification tray is the host shell's job.

pub mod alert;
pub mod strategy;

pub use alert::StockAlert;
pub use strategy::{Destination, FetchRequest, FetchStrategy, strategy_for};
