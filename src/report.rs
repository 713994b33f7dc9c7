//! # Reporting Sink
//!
//! Il `Reporter` viene passato esplicitamente a `BatchRunner` e a
//! `CompressionOrchestrator`: nessuno dei due scrive direttamente su stdout.
//!
//! - `ConsoleReporter`: righe `[OK]`/`[SKIP]` su stdout, messaggi e warning via `tracing`
//! - `JsonReporter`: un oggetto JSON per evento su stdout

use crate::{
    config::Config,
    json_output::{JsonConfig, JsonMessage},
    progress::{BatchTotals, ProgressManager},
    result::CompressionResult,
};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Receives progress and results of a batch
pub trait Reporter: Send + Sync {
    /// Called once before the first file
    fn batch_started(&self, _input: &Path, _config: &Config, _total_files: usize) {}

    /// A strategy failed but processing of the file continues
    fn strategy_failed(&self, source: &Path, strategy: &str, reason: &str);

    fn file_finished(&self, result: &CompressionResult);

    /// Called once after the last file
    fn batch_finished(&self, totals: &BatchTotals, files_scanned: usize, dry_run: bool);

    /// Fatal, invocation-level error
    fn fatal(&self, message: &str);
}

/// Human-readable console output
#[derive(Default)]
pub struct ConsoleReporter {
    progress: OnceLock<ProgressManager>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the progress bar (if any) cleared from the terminal
    fn suspended<R>(&self, f: impl FnOnce() -> R) -> R {
        match self.progress.get() {
            Some(progress) => progress.suspend(f),
            None => f(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn batch_started(&self, input: &Path, config: &Config, total_files: usize) {
        info!(
            "Compressing {} PDF file(s) from {} into {} (quality: {})",
            total_files,
            input.display(),
            config.output_dir.display(),
            config.quality
        );

        if total_files > 1 {
            let _ = self.progress.set(ProgressManager::new(total_files as u64));
        }
    }

    fn strategy_failed(&self, source: &Path, strategy: &str, reason: &str) {
        let name = source.file_name().unwrap_or_default().to_string_lossy();
        self.suspended(|| warn!("{} unavailable/failed for {}: {}", strategy, name, reason));
    }

    fn file_finished(&self, result: &CompressionResult) {
        let name = result.source().file_name().unwrap_or_default().to_string_lossy();
        self.suspended(|| {
            println!("{}", result.summary_line());
            info!("{}: {}", name, result.message());
        });

        if let Some(progress) = self.progress.get() {
            progress.update(&name);
        }
    }

    fn batch_finished(&self, totals: &BatchTotals, files_scanned: usize, dry_run: bool) {
        if let Some(progress) = self.progress.get() {
            progress.finish();
        }

        if dry_run {
            info!("Dry run complete. Files scanned: {}", files_scanned);
        } else {
            info!("{}", totals.format_summary());
        }
    }

    fn fatal(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// JSON-lines output for programmatic consumers
#[derive(Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for JsonReporter {
    fn batch_started(&self, input: &Path, config: &Config, total_files: usize) {
        JsonMessage::Start {
            input: input.to_path_buf(),
            output_dir: config.output_dir.clone(),
            total_files,
            config: JsonConfig::from(config),
        }
        .emit();
    }

    fn strategy_failed(&self, source: &Path, strategy: &str, reason: &str) {
        warn!("{} failed for {}: {}", strategy, source.display(), reason);
    }

    fn file_finished(&self, result: &CompressionResult) {
        JsonMessage::file_complete(result).emit();
    }

    fn batch_finished(&self, totals: &BatchTotals, files_scanned: usize, dry_run: bool) {
        JsonMessage::complete(totals, files_scanned, dry_run).emit();
    }

    fn fatal(&self, message: &str) {
        JsonMessage::Error {
            message: message.to_string(),
        }
        .emit();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every event for assertions
    #[derive(Default)]
    pub struct RecordingReporter {
        pub started: Mutex<Option<usize>>,
        pub warnings: Mutex<Vec<String>>,
        pub results: Mutex<Vec<CompressionResult>>,
        pub finished: Mutex<Option<(BatchTotals, usize, bool)>>,
    }

    impl Reporter for RecordingReporter {
        fn batch_started(&self, _input: &Path, _config: &Config, total_files: usize) {
            *self.started.lock().unwrap() = Some(total_files);
        }

        fn strategy_failed(&self, _source: &Path, strategy: &str, reason: &str) {
            self.warnings.lock().unwrap().push(format!("{}: {}", strategy, reason));
        }

        fn file_finished(&self, result: &CompressionResult) {
            self.results.lock().unwrap().push(result.clone());
        }

        fn batch_finished(&self, totals: &BatchTotals, files_scanned: usize, dry_run: bool) {
            *self.finished.lock().unwrap() = Some((totals.clone(), files_scanned, dry_run));
        }

        fn fatal(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }
    }
}
