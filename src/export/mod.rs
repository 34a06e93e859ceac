//! Export module for Finbot
//!
//! Dumps a single user's ledger:
//! - CSV: expenses with their budget limits (spreadsheet-compatible)
//! - JSON: machine-readable ledger with metadata
//! - YAML: human-readable ledger with metadata

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_expenses_csv, write_expenses_csv};
pub use json::{export_ledger_json, import_from_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_ledger_yaml, import_from_yaml};
