//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e i totali di un batch.
//!
//! ## Componenti principali:
//! - `ProgressManager`: progress bar `indicatif` per le cartelle
//! - `BatchTotals`: accumulatore dei risultati, creato all'inizio del batch,
//!   aggiornato una volta per file e letto una volta per il riepilogo
//!
//! ## Regole di aggregazione:
//! - **committed**: contribuisce a `total_before`, `total_after`, `count_saved`
//! - **failed** (nessuna strategia ha prodotto un candidato): `count_failed`
//! - tutto il resto (non più piccolo, output esistente, errore di scrittura): `count_skipped`
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:12] [=========>------------------------------] 3/12 (25%) report.pdf
//! ```

use crate::{file_manager::FileManager, result::CompressionResult};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Progress bar for folder runs
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Run `f` with the bar cleared, so stdout lines don't get mangled
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    #[cfg(test)]
    pub(crate) fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and remove the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Running totals for one batch
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BatchTotals {
    /// Sum of original sizes of committed files
    pub total_before: u64,
    /// Sum of compressed sizes of committed files
    pub total_after: u64,
    pub count_saved: usize,
    pub count_skipped: usize,
    pub count_failed: usize,
}

impl BatchTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's result into the totals
    pub fn record(&mut self, result: &CompressionResult) {
        if result.is_committed() {
            self.count_saved += 1;
            self.total_before += result.bytes_before();
            self.total_after += result.bytes_after();
        } else if result.is_failed() {
            self.count_failed += 1;
        } else {
            self.count_skipped += 1;
        }
    }

    pub fn bytes_saved(&self) -> u64 {
        self.total_before.saturating_sub(self.total_after)
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.total_before, self.total_after)
    }

    pub fn format_summary(&self) -> String {
        if self.count_saved == 0 {
            return "Summary: no files were compressed (all skipped/failed).".to_string();
        }

        format!(
            "Summary: saved={}, skipped={}, failed={} | total: {} -> {} (saved {}, {:.2}%)",
            self.count_saved,
            self.count_skipped,
            self.count_failed,
            FileManager::format_size(self.total_before),
            FileManager::format_size(self.total_after),
            FileManager::format_size(self.bytes_saved()),
            self.overall_reduction_percent()
        )
    }
}
