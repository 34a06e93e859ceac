//! Per-user ledger repository
//!
//! One JSON file per user. Reads of a missing file yield the zero-value
//! ledger. Mutations go through [`LedgerStore::update`], which holds a
//! per-user lock across load, mutate and save so concurrent messages from
//! the same user cannot lose each other's writes. Whole-record overwrites
//! use [`LedgerStore::replace`], which never depends on the old file being
//! readable.

use std::fs;

use tracing::{debug, warn};

use crate::config::paths::BotPaths;
use crate::error::FinbotError;
use crate::models::{Ledger, UserId};

use super::file_io::{read_json, remove_json, write_json_atomic};
use super::locks::UserLocks;

/// Ledger snapshots around a mutation, plus whatever the mutation returned
#[derive(Debug, Clone)]
pub struct Updated<T> {
    pub before: Ledger,
    pub after: Ledger,
    pub output: T,
}

/// Repository for per-user ledger persistence
pub struct LedgerStore {
    paths: BotPaths,
    locks: UserLocks,
}

impl LedgerStore {
    /// Create a new ledger store rooted at the given paths
    pub fn new(paths: BotPaths) -> Self {
        Self {
            paths,
            locks: UserLocks::new(),
        }
    }

    pub fn paths(&self) -> &BotPaths {
        &self.paths
    }

    /// Load a user's ledger, or the zero-value ledger if none is stored
    pub fn load(&self, user: UserId) -> Result<Ledger, FinbotError> {
        read_json(self.paths.ledger_file(user))
    }

    /// Overwrite a user's ledger with the given record
    pub fn save(&self, user: UserId, ledger: &Ledger) -> Result<(), FinbotError> {
        write_json_atomic(self.paths.ledger_file(user), ledger)?;
        debug!(user = %user, expenses = ledger.expenses.len(), "ledger saved");
        Ok(())
    }

    /// Load, mutate and save a ledger while holding the user's lock
    ///
    /// Nothing is written if loading fails or the closure returns an error.
    /// The closure's value is passed back in [`Updated::output`].
    pub fn update<T, F>(&self, user: UserId, mutate: F) -> Result<Updated<T>, FinbotError>
    where
        F: FnOnce(&mut Ledger) -> Result<T, FinbotError>,
    {
        self.locks.with(user, || {
            let before = self.load(user)?;
            let mut after = before.clone();
            let output = mutate(&mut after)?;
            self.save(user, &after)?;

            Ok(Updated {
                before,
                after,
                output,
            })
        })
    }

    /// Overwrite a user's ledger while holding the user's lock
    ///
    /// Returns the previous record when it could be read. A stored record
    /// that fails to parse is logged and overwritten.
    pub fn replace(&self, user: UserId, ledger: &Ledger) -> Result<Option<Ledger>, FinbotError> {
        self.locks.with(user, || {
            let previous = match self.load(user) {
                Ok(previous) => Some(previous),
                Err(e) => {
                    warn!(user = %user, error = %e, "previous ledger unreadable, overwriting");
                    None
                }
            };
            self.save(user, ledger)?;
            Ok(previous)
        })
    }

    /// Check whether a ledger file exists for the user
    pub fn exists(&self, user: UserId) -> bool {
        self.paths.ledger_file(user).exists()
    }

    /// Delete a user's ledger file, returning whether one existed
    pub fn delete(&self, user: UserId) -> Result<bool, FinbotError> {
        self.locks.with(user, || remove_json(self.paths.ledger_file(user)))
    }

    /// All users with a stored ledger, sorted by id
    pub fn list_users(&self) -> Result<Vec<UserId>, FinbotError> {
        let dir = self.paths.ledger_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| FinbotError::Storage(format!("Failed to read {}: {}", dir.display(), e)))?;

        let mut users = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FinbotError::Storage(e.to_string()))?;
            let name = entry.file_name();
            let parsed = name
                .to_str()
                .and_then(|n| n.strip_prefix("user_"))
                .and_then(|n| n.strip_suffix(".json"))
                .and_then(|id| id.parse::<UserId>().ok());
            if let Some(user) = parsed {
                users.push(user);
            }
        }
        users.sort();
        Ok(users)
    }
}
