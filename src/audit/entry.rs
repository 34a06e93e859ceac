//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserId;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Something was added to a ledger
    Create,
    /// Ledger contents were replaced or adjusted
    Update,
    /// Ledger was wiped
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// The part of a ledger an operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Ledger,
    Income,
    Expense,
    Budgets,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Ledger => write!(f, "Ledger"),
            EntityType::Income => write!(f, "Income"),
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Budgets => write!(f, "Budgets"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Owner of the ledger that changed
    pub user: UserId,

    /// Free-form context, e.g. the conversation that produced the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Ledger snapshot before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Ledger snapshot after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for something appended to a ledger
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        user: UserId,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            user,
            context: None,
            before: None,
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Entry for a ledger whose contents were changed in place
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        user: UserId,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            user,
            context: None,
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Entry for a wiped ledger
    pub fn delete<T: Serialize>(entity_type: EntityType, user: UserId, before: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            user,
            context: None,
            before: serde_json::to_value(before).ok(),
            after: None,
            diff_summary: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} user {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.user
        );

        if let Some(context) = &self.context {
            output.push_str(&format!(" ({})", context));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ledger, Money};

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_update_entry_carries_snapshots() {
        let before = Ledger::empty();
        let mut after = before.clone();
        after.add_income(Money::from_units(10)).unwrap();

        let entry = AuditEntry::update(EntityType::Income, UserId::new(5), &before, &after, None);
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before.unwrap()["income"], 0);
        assert_eq!(entry.after.unwrap()["income"], 10);
    }

    #[test]
    fn test_delete_entry_has_no_after() {
        let entry = AuditEntry::delete(EntityType::Ledger, UserId::new(5), &Ledger::empty());
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::delete(EntityType::Ledger, UserId::new(42), &Ledger::empty())
            .with_context("reset confirmed");
        let text = entry.format_human_readable();
        assert!(text.contains("DELETE Ledger user 42 (reset confirmed)"));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let entry = AuditEntry::delete(EntityType::Ledger, UserId::new(1), &Ledger::empty());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"after\""));
        assert!(!json.contains("\"context\""));
        assert!(json.contains("\"operation\":\"delete\""));
    }
}
