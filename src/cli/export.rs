//! CLI command for data export

use crate::error::{FinbotError, FinbotResult};
use crate::export::{csv, json, yaml};
use crate::models::UserId;
use crate::storage::LedgerStore;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

/// Export a user's ledger to a file, or stdout when no path is given
pub fn handle_export_command(
    store: &LedgerStore,
    user: UserId,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> FinbotResult<()> {
    let mut writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinbotError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv => {
            let rows = csv::export_expenses_csv(store, user, &mut writer)?;
            if let Some(path) = &output {
                println!("Exported {} expenses to: {}", rows, path.display());
            }
        }
        ExportFormat::Json => {
            json::export_ledger_json(store, user, &mut writer, pretty)?;
            writeln!(writer)?;
            if let Some(path) = &output {
                println!("Ledger exported to: {}", path.display());
            }
        }
        ExportFormat::Yaml => {
            yaml::export_ledger_yaml(store, user, &mut writer)?;
            if let Some(path) = &output {
                println!("Ledger exported to: {}", path.display());
            }
        }
    }

    writer.flush()?;
    Ok(())
}
