//! CLI command handlers
//!
//! Bridges the clap argument parsing in the binary with the bot and
//! storage layers.

pub mod chat;
pub mod export;
pub mod ledger;

pub use chat::{handle_chat, handle_send};
pub use export::{handle_export_command, ExportFormat};
pub use ledger::{handle_delete, handle_history, handle_summary, handle_users};
