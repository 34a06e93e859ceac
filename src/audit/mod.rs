//! Audit logging system for Finbot
//!
//! Records every ledger mutation with before/after snapshots in an
//! append-only log.
//!
//! - `AuditEntry`: timestamp, operation, the ledger part touched, the owning
//!   user and optional snapshots.
//! - `AuditLogger`: appends entries to a line-delimited JSON file (JSONL).
//! - `ledger_diff`: one-line summary of what changed between two ledgers.

mod diff;
mod entry;
mod logger;

pub use diff::ledger_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
