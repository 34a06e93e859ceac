//! Reply texts

use crate::error::ParseError;

use super::commands::COMMANDS;
use super::parse::LogEntry;

pub const WELCOME: &str = "👋 Welcome to Finance Bot! Use /help to see available commands.";

pub const ASK_INCOME: &str = "💵 Please enter your monthly income:";
pub const INCOME_SAVED: &str =
    "✅ Income saved. Now enter budgets (e.g., food 200). Type 'done' to finish.";
pub const INVALID_INCOME: &str = "❌ Please enter a valid number for income.";
pub const BUDGET_FORMAT: &str = "❌ Use format: category amount (e.g., food 200)";
pub const CONFIG_SAVED: &str = "✅ Budget configuration saved.";
pub const CONFIG_CANCELLED: &str = "🚫 Configuration cancelled. Nothing was saved.";
pub const NOTHING_TO_CANCEL: &str = "Nothing to cancel.";

pub const LOG_PROMPT: &str =
    "💰 Please enter your income or expense (e.g., income 500 or expense 200 food).";
pub const LOG_USAGE: &str = "❌ Please use the format: 'income/expense amount category' \
(e.g., income 500 or expense 200 food).";
pub const NEGATIVE_AMOUNT: &str = "❌ Amounts must not be negative.";

pub const RESET_PROMPT: &str =
    "⚠️ Are you sure you want to reset all your data? Type 'YES' to confirm.";
pub const RESET_DONE: &str = "✅ All your data has been reset.";
pub const RESET_CANCELLED: &str = "❌ Reset cancelled.";

pub const NOTIFY_ON: &str = "🔔 Reminders enabled!";
pub const NOTIFY_OFF: &str = "🔕 Reminders disabled!";

pub const UNKNOWN_COMMAND: &str = "❓ Unknown command. Use /help to see available commands.";
pub const OUT_OF_RANGE: &str =
    "❌ That amount would push your totals out of range. Nothing was recorded.";

pub const INTERNAL_ERROR: &str = "⚠️ Something went wrong while saving your data. Please try again.";

/// `/help` body, one line per registered command
pub fn help() -> String {
    let mut text = String::from("Available commands:\n");
    for command in COMMANDS {
        text.push_str(&format!("/{} - {}\n", command.name, command.description));
    }
    text
}

pub fn budget_added(category: &str, limit: &str) -> String {
    format!(
        "Added budget: {} - {}. Type 'done' when finished.",
        category, limit
    )
}

pub fn entry_logged(entry: &LogEntry, amount: &str) -> String {
    format!(
        "✅ {} of {} logged under {}.",
        entry.kind.label(),
        amount,
        entry.category
    )
}

/// Usage reply for a rejected shorthand entry
pub fn log_rejected(error: &ParseError) -> &'static str {
    match error {
        ParseError::NegativeAmount(_) => NEGATIVE_AMOUNT,
        _ => LOG_USAGE,
    }
}

/// Reply for a rejected income during `/config`
pub fn income_rejected(error: &ParseError) -> &'static str {
    match error {
        ParseError::NegativeAmount(_) => NEGATIVE_AMOUNT,
        _ => INVALID_INCOME,
    }
}

/// Reply for a rejected budget line during `/config`
pub fn budget_rejected(error: &ParseError) -> &'static str {
    match error {
        ParseError::NegativeAmount(_) => NEGATIVE_AMOUNT,
        _ => BUDGET_FORMAT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::parse::EntryKind;
    use crate::models::Money;

    #[test]
    fn test_help_lists_every_command() {
        let text = help();
        assert!(text.starts_with("Available commands:"));
        for command in COMMANDS {
            assert!(text.contains(&format!("/{} - ", command.name)));
        }
    }

    #[test]
    fn test_entry_logged() {
        let entry = LogEntry {
            kind: EntryKind::Expense,
            amount: Money::from_units(200),
            category: "food".into(),
        };
        assert_eq!(
            entry_logged(&entry, "$200.00"),
            "✅ Expense of $200.00 logged under food."
        );
    }

    #[test]
    fn test_rejections_pick_negative_reply() {
        let negative = ParseError::NegativeAmount("-1".into());
        let invalid = ParseError::InvalidAmount("x".into());
        assert_eq!(log_rejected(&negative), NEGATIVE_AMOUNT);
        assert_eq!(log_rejected(&invalid), LOG_USAGE);
        assert_eq!(income_rejected(&invalid), INVALID_INCOME);
        assert_eq!(budget_rejected(&ParseError::Empty), BUDGET_FORMAT);
    }
}
