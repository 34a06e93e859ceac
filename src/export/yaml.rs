//! YAML Export functionality
//!
//! Human-readable variant of the JSON export.

use crate::error::{FinbotError, FinbotResult};
use crate::export::json::LedgerExport;
use crate::models::UserId;
use crate::storage::LedgerStore;
use std::io::Write;

fn export_err(e: impl std::fmt::Display) -> FinbotError {
    FinbotError::Export(e.to_string())
}

/// Write a user's ledger as YAML with a header comment
pub fn export_ledger_yaml<W: Write>(
    store: &LedgerStore,
    user: UserId,
    writer: &mut W,
) -> FinbotResult<()> {
    let export = LedgerExport::from_store(store, user)?;

    writeln!(writer, "# Finbot Ledger Export").map_err(export_err)?;
    writeln!(writer, "# User: {}", export.user).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FinbotResult<LedgerExport> {
    let export: LedgerExport = serde_yaml::from_str(yaml_str).map_err(export_err)?;
    export.validate().map_err(FinbotError::Export)?;
    Ok(export)
}
