//! The `/config` conversation
//!
//! ```text
//! IDLE --/config--> AWAITING_INCOME --number--> AWAITING_BUDGETS --"done"--> IDLE
//!                     ^        |                  ^          |
//!                     +-error--+                  +-line/err-+
//! ```
//!
//! Transitions are pure: [`Conversation::advance`] consumes the current
//! state and returns either the next state or the values to commit. The
//! caller owns persistence.

use crate::error::ParseError;
use crate::models::{Budgets, Money};

use super::parse::{is_done, parse_amount, parse_budget_line};

/// Where a user is inside the configuration flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversation {
    AwaitingIncome,
    AwaitingBudgets { income: Money, budgets: Budgets },
}

/// What a single step produced, for the reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    IncomeAccepted(Money),
    IncomeRejected(ParseError),
    BudgetAdded { category: String, limit: Money },
    BudgetRejected(ParseError),
}

/// Result of feeding one message to the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Conversation goes on in the given state
    Continue(Conversation, Outcome),
    /// User finished; these values replace the ledger
    Complete { income: Money, budgets: Budgets },
}

impl Conversation {
    /// Entry state after `/config`
    pub fn start() -> Self {
        Conversation::AwaitingIncome
    }

    /// Stable state name for logs
    pub fn state_name(&self) -> &'static str {
        match self {
            Conversation::AwaitingIncome => "awaiting_income",
            Conversation::AwaitingBudgets { .. } => "awaiting_budgets",
        }
    }

    /// Feed one message to the conversation
    pub fn advance(self, text: &str, allow_negative: bool) -> Step {
        match self {
            Conversation::AwaitingIncome => match parse_amount(text, allow_negative) {
                Ok(income) => Step::Continue(
                    Conversation::AwaitingBudgets {
                        income,
                        budgets: Budgets::new(),
                    },
                    Outcome::IncomeAccepted(income),
                ),
                Err(e) => Step::Continue(Conversation::AwaitingIncome, Outcome::IncomeRejected(e)),
            },

            Conversation::AwaitingBudgets {
                income,
                mut budgets,
            } => {
                if is_done(text) {
                    return Step::Complete { income, budgets };
                }
                match parse_budget_line(text, allow_negative) {
                    Ok((category, limit)) => {
                        budgets.insert(category.clone(), limit);
                        Step::Continue(
                            Conversation::AwaitingBudgets { income, budgets },
                            Outcome::BudgetAdded { category, limit },
                        )
                    }
                    Err(e) => Step::Continue(
                        Conversation::AwaitingBudgets { income, budgets },
                        Outcome::BudgetRejected(e),
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_continue(step: Step) -> (Conversation, Outcome) {
        match step {
            Step::Continue(state, outcome) => (state, outcome),
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_income_keeps_state() {
        let (state, outcome) = expect_continue(Conversation::start().advance("lots", false));
        assert_eq!(state, Conversation::AwaitingIncome);
        assert!(matches!(outcome, Outcome::IncomeRejected(ParseError::InvalidAmount(_))));
    }

    #[test]
    fn test_income_moves_to_budgets() {
        let (state, outcome) = expect_continue(Conversation::start().advance("1000", false));
        assert_eq!(outcome, Outcome::IncomeAccepted(Money::from_units(1000)));
        assert_eq!(
            state,
            Conversation::AwaitingBudgets {
                income: Money::from_units(1000),
                budgets: Budgets::new(),
            }
        );
        assert_eq!(state.state_name(), "awaiting_budgets");
    }

    #[test]
    fn test_full_flow_completes() {
        let (state, _) = expect_continue(Conversation::start().advance("1000", false));
        let (state, outcome) = expect_continue(state.advance("food 200", false));
        assert_eq!(
            outcome,
            Outcome::BudgetAdded {
                category: "food".into(),
                limit: Money::from_units(200),
            }
        );
        let (state, _) = expect_continue(state.advance("food 250", false));

        match state.advance("Done", false) {
            Step::Complete { income, budgets } => {
                assert_eq!(income, Money::from_units(1000));
                assert_eq!(budgets.len(), 1);
                assert_eq!(budgets.get("food"), Some(Money::from_units(250)));
            }
            other => panic!("expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_budget_keeps_pending_values() {
        let (state, _) = expect_continue(Conversation::start().advance("500", false));
        let (state, _) = expect_continue(state.advance("rent 300", false));
        let (state, outcome) = expect_continue(state.advance("groceries", false));

        assert!(matches!(outcome, Outcome::BudgetRejected(_)));
        match state {
            Conversation::AwaitingBudgets { income, budgets } => {
                assert_eq!(income, Money::from_units(500));
                assert_eq!(budgets.get("rent"), Some(Money::from_units(300)));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_negative_income_rejected_unless_allowed() {
        let (_, outcome) = expect_continue(Conversation::start().advance("-10", false));
        assert!(matches!(outcome, Outcome::IncomeRejected(ParseError::NegativeAmount(_))));

        let (_, outcome) = expect_continue(Conversation::start().advance("-10", true));
        assert_eq!(outcome, Outcome::IncomeAccepted(Money::from_units(-10)));
    }
}
