//! User settings for Finbot
//!
//! Manages bot preferences: currency symbol, default expense category,
//! conversation timeout and audit logging. The transport credential is
//! read from the environment and never written to disk.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::BotPaths;
use crate::error::FinbotError;

/// Environment variables consulted (in order) for the transport token
pub const TOKEN_ENV_VARS: [&str; 2] = ["FINBOT_TOKEN", "TELEGRAM_TOKEN"];

/// Settings for Finbot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Category assigned to shorthand expenses that omit one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Idle seconds before a conversation is discarded (0 = never)
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,

    /// Whether ledger mutations are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Accept negative amounts in income, expenses and budgets
    #[serde(default)]
    pub allow_negative_amounts: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_category() -> String {
    "unspecified".to_string()
}

fn default_session_timeout() -> u64 {
    30 * 60
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_category: default_category(),
            session_timeout_secs: default_session_timeout(),
            audit_enabled: true,
            allow_negative_amounts: false,
        }
    }
}

impl Settings {
    /// Conversation idle timeout, `None` when expiry is disabled
    pub fn session_timeout(&self) -> Option<Duration> {
        if self.session_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.session_timeout_secs))
        }
    }

    /// Transport token from the environment, if any
    pub fn bot_token() -> Option<BotToken> {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|t| !t.trim().is_empty())
            .map(BotToken)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BotPaths) -> Result<Self, FinbotError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinbotError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinbotError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BotPaths) -> Result<(), FinbotError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinbotError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinbotError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

/// Transport credential; `Debug` and `Display` never show the secret
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for handing to the transport
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form showing only the last four characters
    pub fn redacted(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BotToken").field(&self.redacted()).finish()
    }
}

impl fmt::Display for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
