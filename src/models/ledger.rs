//! Per-user ledger model
//!
//! A ledger is the whole persisted record of one user: an income
//! accumulator, per-category budget limits and the expense history.
//!
//! On disk:
//!
//! ```json
//! { "income": 1000, "budgets": { "food": 200 }, "expenses": [ { "category": "food", "amount": 12.5 } ] }
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::money::Money;
use crate::error::{FinbotError, FinbotResult};

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub category: String,
    pub amount: Money,
}

impl Expense {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// Budget limits keyed by category, kept in insertion order
///
/// Category names are case-sensitive. Re-inserting an existing category
/// replaces its limit without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Budgets {
    entries: Vec<(String, Money)>,
}

impl Budgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limit for a category, returning the previous limit if any
    pub fn insert(&mut self, category: impl Into<String>, limit: Money) -> Option<Money> {
        let category = category.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => Some(std::mem::replace(existing, limit)),
            None => {
                self.entries.push((category, limit));
                None
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, limit)| *limit)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.entries.iter().map(|(name, limit)| (name.as_str(), *limit))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all limits
    pub fn total(&self) -> Money {
        self.entries.iter().map(|(_, limit)| *limit).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Money)> for Budgets {
    fn from_iter<I: IntoIterator<Item = (S, Money)>>(iter: I) -> Self {
        let mut budgets = Budgets::new();
        for (category, limit) in iter {
            budgets.insert(category, limit);
        }
        budgets
    }
}

impl Serialize for Budgets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, limit) in &self.entries {
            map.serialize_entry(category, limit)?;
        }
        map.end()
    }
}

struct BudgetsVisitor;

impl<'de> Visitor<'de> for BudgetsVisitor {
    type Value = Budgets;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of category names to budget limits")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Budgets, A::Error> {
        let mut budgets = Budgets::new();
        while let Some((category, limit)) = access.next_entry::<String, Money>()? {
            budgets.insert(category, limit);
        }
        Ok(budgets)
    }
}

impl<'de> Deserialize<'de> for Budgets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BudgetsVisitor)
    }
}

/// The persisted financial record of one user
///
/// Missing keys default, so a partially written or older record still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub income: Money,

    #[serde(default)]
    pub budgets: Budgets,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Ledger {
    /// The zero-value ledger every user starts from
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ledger produced by a completed configuration: expense history is dropped
    pub fn configured(income: Money, budgets: Budgets) -> Self {
        Self {
            income,
            budgets,
            expenses: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_zero() && self.budgets.is_empty() && self.expenses.is_empty()
    }

    /// Add to the income accumulator
    ///
    /// Fails without changing the ledger if the new total does not fit.
    pub fn add_income(&mut self, amount: Money) -> FinbotResult<()> {
        self.income = self.income.checked_add(amount).ok_or_else(|| {
            FinbotError::Validation(format!(
                "income total {} plus {} is out of range",
                self.income, amount
            ))
        })?;
        Ok(())
    }

    /// Append an expense, provided the running expense total stays representable
    pub fn add_expense(&mut self, category: impl Into<String>, amount: Money) -> FinbotResult<()> {
        self.expenses
            .iter()
            .try_fold(amount, |total, e| total.checked_add(e.amount))
            .ok_or_else(|| {
                FinbotError::Validation(format!("expense total plus {} is out of range", amount))
            })?;
        self.expenses.push(Expense::new(category, amount));
        Ok(())
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Expense totals per category, in order of first appearance
    pub fn spent_by_category(&self) -> Vec<(String, Money)> {
        let mut totals: Vec<(String, Money)> = Vec::new();
        for expense in &self.expenses {
            match totals.iter_mut().find(|(name, _)| *name == expense.category) {
                Some((_, total)) => *total += expense.amount,
                None => totals.push((expense.category.clone(), expense.amount)),
            }
        }
        totals
    }

    /// Total spent in a single category
    pub fn spent_in(&self, category: &str) -> Money {
        self.expenses
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum()
    }
}
