//! Service layer for Finbot
//!
//! Business logic on top of the storage layer: ledger mutations with
//! locking and audit records.

pub mod ledger;

pub use ledger::LedgerService;
