//! Diff summaries for audit logging
//!
//! Describes what changed between two ledger snapshots in one line.

use crate::models::Ledger;

/// Summarise the changes between two ledger states
///
/// Returns `None` when the ledgers are identical.
pub fn ledger_diff(before: &Ledger, after: &Ledger) -> Option<String> {
    let mut changes = Vec::new();

    if before.income != after.income {
        changes.push(format!("income: {} -> {}", before.income, after.income));
    }

    if before.budgets != after.budgets {
        for (category, limit) in after.budgets.iter() {
            match before.budgets.get(category) {
                Some(old) if old == limit => {}
                Some(old) => changes.push(format!("budget {}: {} -> {}", category, old, limit)),
                None => changes.push(format!("budget {}: (added) -> {}", category, limit)),
            }
        }
        for (category, limit) in before.budgets.iter() {
            if !after.budgets.contains(category) {
                changes.push(format!("budget {}: {} -> (removed)", category, limit));
            }
        }
    }

    if before.expenses != after.expenses {
        let appended = after.expenses.len() > before.expenses.len()
            && after.expenses.starts_with(&before.expenses);
        if appended {
            for expense in &after.expenses[before.expenses.len()..] {
                changes.push(format!("expense {}: (added) {}", expense.category, expense.amount));
            }
        } else {
            changes.push(format!(
                "expenses: [{} items] -> [{} items]",
                before.expenses.len(),
                after.expenses.len()
            ));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}
