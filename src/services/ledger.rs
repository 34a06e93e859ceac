//! Ledger service
//!
//! Business operations on a user's ledger. Every mutation runs inside the
//! store's per-user lock and is recorded in the audit log. Incremental
//! entries are rejected with a validation error, and nothing is written,
//! when a total would leave the representable range.

use tracing::{info, warn};

use crate::audit::{ledger_diff, AuditEntry, AuditLogger, EntityType};
use crate::display::{render_summary, Markup};
use crate::error::FinbotResult;
use crate::models::{Budgets, Ledger, Money, SessionId, UserId};
use crate::storage::LedgerStore;

/// Service for ledger management
pub struct LedgerService<'a> {
    store: &'a LedgerStore,
    audit: &'a AuditLogger,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a LedgerStore, audit: &'a AuditLogger) -> Self {
        Self { store, audit }
    }

    /// Current ledger for a user (zero-value if none is stored)
    pub fn ledger(&self, user: UserId) -> FinbotResult<Ledger> {
        self.store.load(user)
    }

    /// Add to the user's income accumulator
    pub fn record_income(&self, user: UserId, amount: Money) -> FinbotResult<Ledger> {
        let updated = self.store.update(user, |ledger| ledger.add_income(amount))?;

        info!(user = %user, amount = %amount, "income recorded");
        self.record(AuditEntry::update(
            EntityType::Income,
            user,
            &updated.before,
            &updated.after,
            ledger_diff(&updated.before, &updated.after),
        ));

        Ok(updated.after)
    }

    /// Append an expense to the user's history
    pub fn record_expense(
        &self,
        user: UserId,
        category: &str,
        amount: Money,
    ) -> FinbotResult<Ledger> {
        let updated = self
            .store
            .update(user, |ledger| ledger.add_expense(category, amount))?;

        info!(user = %user, category, amount = %amount, "expense recorded");
        self.record(AuditEntry::create(
            EntityType::Expense,
            user,
            &updated.after,
            ledger_diff(&updated.before, &updated.after),
        ));

        Ok(updated.after)
    }

    /// Replace the ledger with a freshly configured one
    ///
    /// Prior expense history is discarded. The old record is not needed,
    /// so a stored file that no longer parses is simply overwritten.
    pub fn commit_configuration(
        &self,
        user: UserId,
        session: SessionId,
        income: Money,
        budgets: Budgets,
    ) -> FinbotResult<Ledger> {
        let configured = Ledger::configured(income, budgets);
        let previous = self.store.replace(user, &configured)?;

        if let Some(discarded) = previous.as_ref().map(|p| p.expenses.len()).filter(|n| *n > 0) {
            info!(user = %user, discarded, "configuration replaced expense history");
        }
        info!(
            user = %user,
            session = %session,
            budgets = configured.budgets.len(),
            "configuration committed"
        );
        let entry = match &previous {
            Some(before) => AuditEntry::update(
                EntityType::Budgets,
                user,
                before,
                &configured,
                ledger_diff(before, &configured),
            ),
            None => AuditEntry::create(EntityType::Budgets, user, &configured, None),
        };
        self.record(entry.with_context(format!("config {}", session)));

        Ok(configured)
    }

    /// Overwrite the ledger with the zero-value record
    ///
    /// Returns the old record, or `None` if it could not be read.
    pub fn reset(&self, user: UserId) -> FinbotResult<Option<Ledger>> {
        let previous = self.store.replace(user, &Ledger::empty())?;

        info!(user = %user, "ledger reset");
        let context = match previous {
            Some(_) => "reset confirmed",
            None => "reset confirmed, previous record unreadable",
        };
        self.record(AuditEntry::delete(EntityType::Ledger, user, &previous).with_context(context));

        Ok(previous)
    }

    /// Render the summary message for a user
    pub fn summary(
        &self,
        user: UserId,
        currency_symbol: &str,
        markup: Markup,
    ) -> FinbotResult<String> {
        let ledger = self.store.load(user)?;
        Ok(render_summary(&ledger, currency_symbol, markup))
    }

    fn record(&self, entry: AuditEntry) {
        // The ledger is already saved; a failing audit write must not undo the reply
        if let Err(e) = self.audit.log(&entry) {
            warn!(user = %entry.user, error = %e, "failed to write audit entry");
        }
    }
}
