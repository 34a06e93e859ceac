//! Audit logger for append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinbotError, FinbotResult};
use crate::models::UserId;

use super::entry::AuditEntry;

/// Writes audit entries to a JSONL file
///
/// A disabled logger accepts entries and drops them.
pub struct AuditLogger {
    log_path: Option<PathBuf>,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path: Some(log_path),
        }
    }

    /// A logger that records nothing
    pub fn disabled() -> Self {
        Self { log_path: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.log_path.is_some()
    }

    /// Append an entry to the log
    pub fn log(&self, entry: &AuditEntry) -> FinbotResult<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FinbotError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| FinbotError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| FinbotError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| FinbotError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> FinbotResult<Vec<AuditEntry>> {
        let Some(path) = self.log_path.as_deref().filter(|p| p.exists()) else {
            return Ok(Vec::new());
        };

        let file = File::open(path)
            .map_err(|e| FinbotError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                FinbotError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                FinbotError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries for one user, oldest first
    pub fn read_recent_for(&self, user: UserId, count: usize) -> FinbotResult<Vec<AuditEntry>> {
        let entries: Vec<AuditEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.user == user)
            .collect();
        let start = entries.len().saturating_sub(count);
        Ok(entries[start..].to_vec())
    }

    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}
