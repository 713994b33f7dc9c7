//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON-lines per l'uso
//! programmatico (`--json`): un oggetto per riga su stdout.
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del batch
//! - `file_complete`: Fine elaborazione di un file
//! - `complete`: Fine batch con totali
//! - `error`: Errore fatale (input non valido)

use crate::{config::Config, progress::BatchTotals, quality::QualityTier, result::CompressionResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage<'a> {
    /// Inizio del batch
    Start {
        input: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Fine elaborazione di un file specifico
    FileComplete {
        #[serde(flatten)]
        result: &'a CompressionResult,
        strategy: String,
    },

    /// Batch completato
    Complete {
        dry_run: bool,
        files_scanned: usize,
        #[serde(flatten)]
        totals: &'a BatchTotals,
        bytes_saved: u64,
        percent_saved: f64,
    },

    /// Errore fatale
    Error { message: String },
}

/// Sottoinsieme della configurazione riportato nel messaggio `start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonConfig {
    pub quality: QualityTier,
    pub overwrite: bool,
    pub recursive: bool,
    pub dry_run: bool,
    pub fallback_enabled: bool,
}

impl From<&Config> for JsonConfig {
    fn from(config: &Config) -> Self {
        Self {
            quality: config.quality,
            overwrite: config.overwrite,
            recursive: config.recursive,
            dry_run: config.dry_run,
            fallback_enabled: config.fallback_enabled,
        }
    }
}

impl<'a> JsonMessage<'a> {
    pub fn file_complete(result: &'a CompressionResult) -> Self {
        Self::FileComplete {
            result,
            strategy: result.strategy_used().to_string(),
        }
    }

    pub fn complete(totals: &'a BatchTotals, files_scanned: usize, dry_run: bool) -> Self {
        Self::Complete {
            dry_run,
            files_scanned,
            totals,
            bytes_saved: totals.bytes_saved(),
            percent_saved: totals.overall_reduction_percent(),
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"type":"error","message":"{}"}}"#, e))
    }

    /// Print as a single JSON line on stdout
    pub fn emit(&self) {
        println!("{}", self.to_line());
    }
}
