//! Finbot - chat-driven personal finance assistant
//!
//! Each chat user owns a small ledger: a monthly income, named budget
//! limits and a list of expenses. Users set up income and budgets through
//! a short `/config` conversation, log entries with shorthand messages
//! such as `expense 12.50 food`, and ask for a `/summary` with progress
//! bars per budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and settings
//! - `error`: Custom error types
//! - `models`: Money, identifiers and the ledger record
//! - `storage`: One JSON file per user, atomic writes, per-user locking
//! - `audit`: Audit logging of ledger changes
//! - `services`: Ledger operations on top of storage and audit
//! - `display`: Summary rendering
//! - `bot`: Command parsing, the `/config` conversation and dispatch
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Handlers for the `finbot` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finbot::bot::Bot;
//! use finbot::config::{paths::BotPaths, settings::Settings};
//! use finbot::models::UserId;
//!
//! let paths = BotPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let bot = Bot::new(paths, settings);
//! let reply = bot.handle(UserId::new(42), "expense 12.50 food");
//! ```

pub mod audit;
pub mod bot;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinbotError, FinbotResult};
