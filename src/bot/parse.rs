//! Parsers for free-text chat input
//!
//! - amounts (`"12.50"`)
//! - budget lines (`"food 200"`)
//! - shorthand log entries (`"expense 12.50 food"`, `"income 500"`)

use crate::error::ParseError;
use crate::models::Money;

/// Which side of the ledger a shorthand entry goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }
}

/// A parsed `"<income|expense> <amount> [category]"` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub amount: Money,
    pub category: String,
}

/// Parse a single amount token
pub fn parse_amount(token: &str, allow_negative: bool) -> Result<Money, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }
    let amount =
        Money::parse(token).map_err(|_| ParseError::InvalidAmount(token.to_string()))?;
    if amount.is_negative() && !allow_negative {
        return Err(ParseError::NegativeAmount(token.to_string()));
    }
    Ok(amount)
}

/// Parse `"<category> <amount>"`: exactly two tokens
pub fn parse_budget_line(text: &str, allow_negative: bool) -> Result<(String, Money), ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(ParseError::Empty),
        [category, amount] => Ok((category.to_string(), parse_amount(amount, allow_negative)?)),
        _ => Err(ParseError::WrongTokenCount {
            expected: "2",
            found: tokens.len(),
        }),
    }
}

/// Parse the logging shorthand
///
/// The entry type is case-insensitive; the category keeps its case and
/// falls back to `default_category` when omitted.
pub fn parse_log_entry(
    text: &str,
    default_category: &str,
    allow_negative: bool,
) -> Result<LogEntry, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (kind, amount, category) = match tokens.as_slice() {
        [] => return Err(ParseError::Empty),
        [kind, amount] => (*kind, *amount, default_category),
        [kind, amount, category] => (*kind, *amount, *category),
        _ => {
            return Err(ParseError::WrongTokenCount {
                expected: "2 or 3",
                found: tokens.len(),
            })
        }
    };

    let kind = match kind.to_lowercase().as_str() {
        "income" => EntryKind::Income,
        "expense" => EntryKind::Expense,
        _ => return Err(ParseError::UnknownEntryType(kind.to_string())),
    };

    Ok(LogEntry {
        kind,
        amount: parse_amount(amount, allow_negative)?,
        category: category.to_string(),
    })
}

/// Whether a message ends budget entry (contains the token `done`, any case)
pub fn is_done(text: &str) -> bool {
    text.split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("done"))
}

/// Whether a message confirms a pending reset
pub fn is_reset_confirmation(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("yes")
}
