//! CSV Export functionality
//!
//! One row per expense, with the category's budget limit alongside.

use crate::error::{FinbotError, FinbotResult};
use crate::models::{Ledger, UserId};
use crate::storage::LedgerStore;
use std::io::Write;

const HEADER: [&str; 3] = ["category", "amount", "budget"];

/// Write a user's expenses as CSV
///
/// Returns the number of rows written, header excluded.
pub fn export_expenses_csv<W: Write>(
    store: &LedgerStore,
    user: UserId,
    writer: &mut W,
) -> FinbotResult<usize> {
    let ledger = store.load(user)?;
    write_expenses_csv(&ledger, writer)
}

/// Write a ledger's expenses as CSV
pub fn write_expenses_csv<W: Write>(ledger: &Ledger, writer: &mut W) -> FinbotResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .map_err(|e| FinbotError::Export(e.to_string()))?;

    for expense in &ledger.expenses {
        let budget = ledger
            .budgets
            .get(&expense.category)
            .map(|limit| format!("{:.2}", limit.as_f64()))
            .unwrap_or_default();
        let amount = format!("{:.2}", expense.amount.as_f64());
        csv_writer
            .write_record([expense.category.as_str(), amount.as_str(), budget.as_str()])
            .map_err(|e| FinbotError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinbotError::Export(e.to_string()))?;
    Ok(ledger.expenses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budgets, Money};

    #[test]
    fn test_csv_rows() {
        let budgets: Budgets = [("food", Money::from_units(200))].into_iter().collect();
        let mut ledger = Ledger::configured(Money::from_units(1000), budgets);
        ledger.add_expense("food", Money::from_cents(1250)).unwrap();
        ledger.add_expense("eating, out", Money::from_units(30)).unwrap();

        let mut output = Vec::new();
        let rows = write_expenses_csv(&ledger, &mut output).unwrap();
        let csv_str = String::from_utf8(output).unwrap();

        assert_eq!(rows, 2);
        let lines: Vec<&str> = csv_str.lines().collect();
        assert_eq!(lines[0], "category,amount,budget");
        assert_eq!(lines[1], "food,12.50,200.00");
        assert_eq!(lines[2], "\"eating, out\",30.00,");
    }

    #[test]
    fn test_csv_empty_ledger_has_header_only() {
        let mut output = Vec::new();
        let rows = write_expenses_csv(&Ledger::empty(), &mut output).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(output).unwrap(), "category,amount,budget\n");
    }
}
