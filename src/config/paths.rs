//! Path management for Finbot
//!
//! ## Path Resolution Order
//!
//! 1. `FINBOT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finbot` or `~/.config/finbot`
//! 3. Windows: `%APPDATA%\finbot`

use std::path::PathBuf;

use crate::error::FinbotError;
use crate::models::UserId;

/// Manages all paths used by Finbot
#[derive(Debug, Clone)]
pub struct BotPaths {
    /// Base directory for all Finbot data
    base_dir: PathBuf,
}

impl BotPaths {
    /// Create a new BotPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FinbotError> {
        let base_dir = if let Ok(custom) = std::env::var("FINBOT_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BotPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/finbot/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one ledger file per user
    pub fn ledger_dir(&self) -> PathBuf {
        self.base_dir.join("ledgers")
    }

    /// Ledger file for a single user (`ledgers/user_<id>.json`)
    pub fn ledger_file(&self, user: UserId) -> PathBuf {
        self.ledger_dir().join(format!("user_{}.json", user))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and ledger directories exist
    pub fn ensure_directories(&self) -> Result<(), FinbotError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinbotError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.ledger_dir())
            .map_err(|e| FinbotError::Io(format!("Failed to create ledger directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinbotError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| FinbotError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("finbot"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinbotError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinbotError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finbot"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BotPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_dir(), temp_dir.path().join("ledgers"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ledger_file_per_user() {
        let paths = BotPaths::with_base_dir(PathBuf::from("/tmp/finbot"));
        assert_eq!(
            paths.ledger_file(UserId::new(42)),
            PathBuf::from("/tmp/finbot/ledgers/user_42.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BotPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.ledger_dir().exists());
    }
}
