//! Storage layer for Finbot
//!
//! JSON file storage with atomic writes, one ledger file per user and a
//! per-user lock around every read-modify-write.

pub mod file_io;
pub mod ledger;
pub mod locks;

pub use file_io::{read_json, write_json_atomic};
pub use ledger::{LedgerStore, Updated};
pub use locks::UserLocks;
