//! Core data models for Finbot
//!
//! The ledger record persisted per user, the money type it is built on,
//! and the identifiers used to key users and conversations.

pub mod ids;
pub mod ledger;
pub mod money;

pub use ids::{SessionId, UserId};
pub use ledger::{Budgets, Expense, Ledger};
pub use money::{Money, MoneyParseError};
