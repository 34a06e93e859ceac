//! CLI commands for inspecting stored ledgers

use crate::audit::AuditLogger;
use crate::config::settings::Settings;
use crate::display::{render_budget_table, render_summary, Markup};
use crate::error::FinbotResult;
use crate::models::UserId;
use crate::storage::LedgerStore;

/// Print a user's budget summary
pub fn handle_summary(
    store: &LedgerStore,
    settings: &Settings,
    user: UserId,
    table: bool,
) -> FinbotResult<()> {
    let ledger = store.load(user)?;
    if table {
        println!("{}", render_budget_table(&ledger, &settings.currency_symbol));
    } else {
        println!(
            "{}",
            render_summary(&ledger, &settings.currency_symbol, Markup::Plain)
        );
    }
    Ok(())
}

/// List every user with a stored ledger
pub fn handle_users(store: &LedgerStore, settings: &Settings) -> FinbotResult<()> {
    let users = store.list_users()?;
    if users.is_empty() {
        println!("No ledgers stored.");
        return Ok(());
    }

    println!("{:>12}  {:>14}  {:>8}  {:>8}", "User", "Income", "Budgets", "Expenses");
    for user in users {
        let ledger = store.load(user)?;
        println!(
            "{:>12}  {:>14}  {:>8}  {:>8}",
            user,
            ledger.income.format_with_symbol(&settings.currency_symbol),
            ledger.budgets.len(),
            ledger.expenses.len()
        );
    }
    Ok(())
}

/// Print the most recent audit entries for a user
pub fn handle_history(audit: &AuditLogger, user: UserId, limit: usize) -> FinbotResult<()> {
    if !audit.is_enabled() {
        println!("Audit logging is disabled.");
        return Ok(());
    }

    let entries = audit.read_recent_for(user, limit)?;
    if entries.is_empty() {
        println!("No history for user {}.", user);
        return Ok(());
    }
    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

/// Remove a user's ledger file
pub fn handle_delete(store: &LedgerStore, user: UserId) -> FinbotResult<()> {
    if store.delete(user)? {
        println!("Deleted ledger for user {}.", user);
    } else {
        println!("No ledger stored for user {}.", user);
    }
    Ok(())
}
