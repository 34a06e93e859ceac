//! JSON Export functionality
//!
//! Exports one user's ledger with schema versioning and summary metadata.

use crate::error::{FinbotError, FinbotResult};
use crate::models::{Ledger, Money, UserId};
use crate::storage::LedgerStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported ledger with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Whose ledger this is
    pub user: UserId,

    pub ledger: Ledger,

    pub metadata: ExportMetadata,
}

/// Derived figures, for readers of the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub budget_count: usize,
    pub expense_count: usize,
    pub total_budgeted: Money,
    pub total_expenses: Money,
    pub balance: Money,
}

impl LedgerExport {
    pub fn new(user: UserId, ledger: Ledger) -> Self {
        let total_expenses = ledger.total_expenses();
        let metadata = ExportMetadata {
            budget_count: ledger.budgets.len(),
            expense_count: ledger.expenses.len(),
            total_budgeted: ledger.budgets.total(),
            total_expenses,
            balance: ledger.income - total_expenses,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user,
            ledger,
            metadata,
        }
    }

    /// Export of the user's stored ledger
    pub fn from_store(store: &LedgerStore, user: UserId) -> FinbotResult<Self> {
        Ok(Self::new(user, store.load(user)?))
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.metadata.expense_count != self.ledger.expenses.len() {
            return Err(format!(
                "Metadata lists {} expenses but the ledger has {}",
                self.metadata.expense_count,
                self.ledger.expenses.len()
            ));
        }
        Ok(())
    }
}

/// Write a user's ledger as JSON
pub fn export_ledger_json<W: Write>(
    store: &LedgerStore,
    user: UserId,
    writer: &mut W,
    pretty: bool,
) -> FinbotResult<()> {
    let export = LedgerExport::from_store(store, user)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
            .map_err(|e| FinbotError::Export(e.to_string()))?;
    } else {
        serde_json::to_writer(writer, &export).map_err(|e| FinbotError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> FinbotResult<LedgerExport> {
    let export: LedgerExport =
        serde_json::from_str(json_str).map_err(|e| FinbotError::Export(e.to_string()))?;
    export.validate().map_err(FinbotError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BotPaths;
    use crate::models::Budgets;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BotPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, LedgerStore::new(paths))
    }

    fn sample_ledger() -> Ledger {
        let budgets: Budgets = [("food", Money::from_units(200))].into_iter().collect();
        let mut ledger = Ledger::configured(Money::from_units(1000), budgets);
        ledger.add_expense("food", Money::from_cents(1250)).unwrap();
        ledger
    }

    #[test]
    fn test_json_export() {
        let (_temp_dir, store) = create_test_store();
        let user = UserId::new(42);
        store.save(user, &sample_ledger()).unwrap();

        let mut output = Vec::new();
        export_ledger_json(&store, user, &mut output, true).unwrap();
        let json_str = String::from_utf8(output).unwrap();

        assert!(json_str.contains("\"schema_version\""));
        assert!(json_str.contains("\"food\": 200"));

        let imported = import_from_json(&json_str).unwrap();
        assert_eq!(imported.user, user);
        assert_eq!(imported.ledger, sample_ledger());
        assert_eq!(imported.metadata.balance, Money::from_cents(98750));
    }

    #[test]
    fn test_export_of_unknown_user_is_empty_ledger() {
        let (_temp_dir, store) = create_test_store();
        let export = LedgerExport::from_store(&store, UserId::new(1)).unwrap();
        assert_eq!(export.ledger, Ledger::empty());
        assert_eq!(export.metadata.expense_count, 0);
    }

    #[test]
    fn test_validate_rejects_other_schema() {
        let mut export = LedgerExport::new(UserId::new(1), Ledger::empty());
        export.schema_version = "0.1.0".to_string();
        assert!(export.validate().is_err());
    }
}
