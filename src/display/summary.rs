//! Budget summary rendering
//!
//! Pure functions from a [`Ledger`] to the text sent back for `/summary`.

use crate::models::{Ledger, Money};

use super::report::{format_percentage, progress_bar};

const NO_BUDGETS: &str = "No budgets set.";
const NO_OTHER_EXPENSES: &str = "None.";

/// Output flavour for the summary headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// `*bold*` headings for chat transports
    Markdown,
    /// Undecorated headings for terminals and files
    Plain,
}

/// Spending against one budget category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    pub category: String,
    pub spent: Money,
    pub limit: Money,
}

impl BudgetLine {
    pub fn bar(&self) -> String {
        progress_bar(self.spent, self.limit)
    }

    /// Share of the limit already spent, `None` for a zero limit
    pub fn percent_used(&self) -> Option<f64> {
        if self.limit.is_zero() {
            None
        } else {
            Some(self.spent.as_f64() / self.limit.as_f64() * 100.0)
        }
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }
}

/// Computed view of a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub income: Money,
    pub total_expenses: Money,
    /// One line per budget, in budget insertion order
    pub budget_lines: Vec<BudgetLine>,
    /// Spending in categories without a budget, in first-seen order
    pub uncategorized: Vec<(String, Money)>,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let budget_lines = ledger
            .budgets
            .iter()
            .map(|(category, limit)| BudgetLine {
                category: category.to_string(),
                spent: ledger.spent_in(category),
                limit,
            })
            .collect();

        let uncategorized = ledger
            .spent_by_category()
            .into_iter()
            .filter(|(category, _)| !ledger.budgets.contains(category))
            .collect();

        Self {
            income: ledger.income,
            total_expenses: ledger.total_expenses(),
            budget_lines,
            uncategorized,
        }
    }

    /// Income left after all expenses
    pub fn balance(&self) -> Money {
        self.income - self.total_expenses
    }
}

/// Render the summary message for a ledger
pub fn render_summary(ledger: &Ledger, currency_symbol: &str, markup: Markup) -> String {
    let summary = LedgerSummary::from_ledger(ledger);
    let money = |m: Money| m.format_with_symbol(currency_symbol);
    let heading = |text: &str| match markup {
        Markup::Markdown => format!("*{}*", text),
        Markup::Plain => text.to_string(),
    };

    let mut budget_lines: Vec<String> = summary
        .budget_lines
        .iter()
        .map(|line| {
            format!(
                "{}: {}/{} [{}]",
                line.category,
                money(line.spent),
                money(line.limit),
                line.bar()
            )
        })
        .collect();
    if budget_lines.is_empty() {
        budget_lines.push(NO_BUDGETS.to_string());
    }

    let mut other_lines: Vec<String> = summary
        .uncategorized
        .iter()
        .map(|(category, amount)| format!("{}: {}", category, money(*amount)))
        .collect();
    if other_lines.is_empty() {
        other_lines.push(NO_OTHER_EXPENSES.to_string());
    }

    format!(
        "📊 {}\nTotal Income: {}\nTotal Expenses: {}\n\n💼 {}\n{}\n\n🧾 {}\n{}",
        heading("Budget Summary"),
        money(summary.income),
        money(summary.total_expenses),
        heading("Budgets:"),
        budget_lines.join("\n"),
        heading("Other Expenses:"),
        other_lines.join("\n"),
    )
}

/// Column report of budget usage for terminal output
pub fn render_budget_table(ledger: &Ledger, currency_symbol: &str) -> String {
    let summary = LedgerSummary::from_ledger(ledger);
    if summary.budget_lines.is_empty() {
        return NO_BUDGETS.to_string();
    }

    let name_width = summary
        .budget_lines
        .iter()
        .map(|l| l.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>6}\n",
        "Category",
        "Spent",
        "Limit",
        "Used",
        name_width = name_width,
    );
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:->6}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for line in &summary.budget_lines {
        let used = line
            .percent_used()
            .map(format_percentage)
            .unwrap_or_else(|| "-".to_string());
        let marker = if line.is_over() { " over" } else { "" };
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>6}{}\n",
            line.category,
            line.spent.format_with_symbol(currency_symbol),
            line.limit.format_with_symbol(currency_symbol),
            used,
            marker,
            name_width = name_width,
        ));
    }

    output.push_str(&format!(
        "\nBalance: {}",
        summary.balance().format_with_symbol(currency_symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::empty();
        ledger.add_income(Money::from_units(1000)).unwrap();
        ledger.budgets.insert("food", Money::from_units(200));
        ledger.budgets.insert("rent", Money::from_units(800));
        ledger.add_expense("food", Money::from_units(50)).unwrap();
        ledger.add_expense("taxi", Money::from_units(15)).unwrap();
        ledger.add_expense("food", Money::from_units(50)).unwrap();
        ledger
    }

    #[test]
    fn test_empty_ledger_placeholders() {
        let text = render_summary(&Ledger::empty(), "$", Markup::Markdown);
        assert_eq!(
            text,
            "📊 *Budget Summary*\nTotal Income: $0.00\nTotal Expenses: $0.00\n\n\
             💼 *Budgets:*\nNo budgets set.\n\n🧾 *Other Expenses:*\nNone."
        );
    }

    #[test]
    fn test_budget_and_uncategorized_lines() {
        let text = render_summary(&sample_ledger(), "$", Markup::Plain);
        assert!(text.contains("Total Income: $1000.00"));
        assert!(text.contains("Total Expenses: $115.00"));
        assert!(text.contains("food: $100.00/$200.00 [█████░░░░░]"));
        assert!(text.contains("rent: $0.00/$800.00 [░░░░░░░░░░]"));
        assert!(text.contains("taxi: $15.00"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn test_budget_lines_follow_insertion_order() {
        let summary = LedgerSummary::from_ledger(&sample_ledger());
        let names: Vec<&str> = summary.budget_lines.iter().map(|l| l.category.as_str()).collect();
        assert_eq!(names, vec!["food", "rent"]);
        assert_eq!(summary.uncategorized, vec![("taxi".to_string(), Money::from_units(15))]);
        assert_eq!(summary.balance(), Money::from_units(885));
    }

    #[test]
    fn test_expense_is_budgeted_or_uncategorized() {
        let mut without_budget = Ledger::empty();
        without_budget.add_expense("food", Money::from_units(30)).unwrap();
        let summary = LedgerSummary::from_ledger(&without_budget);
        assert_eq!(summary.uncategorized, vec![("food".to_string(), Money::from_units(30))]);
        assert!(summary.budget_lines.is_empty());

        let mut with_budget = without_budget.clone();
        with_budget.budgets.insert("food", Money::from_units(100));
        let summary = LedgerSummary::from_ledger(&with_budget);
        assert!(summary.uncategorized.is_empty());
        assert_eq!(summary.budget_lines[0].spent, Money::from_units(30));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let ledger = sample_ledger();
        assert_eq!(
            render_summary(&ledger, "$", Markup::Markdown),
            render_summary(&ledger, "$", Markup::Markdown)
        );
    }

    #[test]
    fn test_custom_currency_symbol() {
        let text = render_summary(&sample_ledger(), "€", Markup::Plain);
        assert!(text.contains("Total Income: €1000.00"));
    }

    #[test]
    fn test_budget_table() {
        let table = render_budget_table(&sample_ledger(), "$");
        assert!(table.contains("Category"));
        assert!(table.contains("50%"));
        assert!(table.contains("Balance: $885.00"));
        assert_eq!(render_budget_table(&Ledger::empty(), "$"), "No budgets set.");
    }
}
