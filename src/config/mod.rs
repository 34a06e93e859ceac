//! Configuration module for Finbot
//!
//! - XDG-compliant path resolution
//! - Bot settings persistence
//! - Transport credential lookup

pub mod paths;
pub mod settings;

pub use paths::BotPaths;
pub use settings::{BotToken, Settings};
