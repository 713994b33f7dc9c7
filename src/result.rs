//! # Compression Result Module
//!
//! Value object prodotto una volta per ogni file processato.
//! Immutabile dopo la costruzione: i campi derivati (`bytes_saved`,
//! `percent_saved`) vengono calcolati nel costruttore.

use crate::quality::QualityTier;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which strategy produced (or failed to produce) the candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyUsed {
    None,
    Primary { tool: String, quality: QualityTier },
    Fallback { tool: String },
    DryRun,
    Failed,
}

impl fmt::Display for StrategyUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Primary { tool, quality } => write!(f, "{}({})", tool, quality),
            Self::Fallback { tool } => write!(f, "{}(optimize)", tool),
            Self::DryRun => f.write_str("dry-run"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Outcome of processing one source file
#[derive(Debug, Clone, Serialize)]
pub struct CompressionResult {
    source: PathBuf,
    destination: PathBuf,
    strategy_used: StrategyUsed,
    bytes_before: u64,
    bytes_after: u64,
    bytes_saved: u64,
    percent_saved: f64,
    skipped: bool,
    message: String,
}

impl CompressionResult {
    fn build(
        source: &Path,
        destination: &Path,
        strategy_used: StrategyUsed,
        bytes_before: u64,
        bytes_after: u64,
        skipped: bool,
        message: String,
    ) -> Self {
        let bytes_saved = bytes_before.saturating_sub(bytes_after);
        let percent_saved = crate::file_manager::FileManager::calculate_reduction(bytes_before, bytes_after);

        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            strategy_used,
            bytes_before,
            bytes_after,
            bytes_saved,
            percent_saved,
            skipped,
            message,
        }
    }

    /// Candidate written at `destination`
    pub fn committed(
        source: &Path,
        destination: &Path,
        strategy_used: StrategyUsed,
        bytes_before: u64,
        bytes_after: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::build(source, destination, strategy_used, bytes_before, bytes_after, false, message.into())
    }

    /// Candidate produced but not written (rejected for size or commit failed)
    pub fn not_committed(
        source: &Path,
        destination: &Path,
        strategy_used: StrategyUsed,
        bytes_before: u64,
        bytes_after: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::build(source, destination, strategy_used, bytes_before, bytes_after, true, message.into())
    }

    /// No candidate could be produced
    pub fn failed(source: &Path, destination: &Path, bytes_before: u64, message: impl Into<String>) -> Self {
        Self::build(source, destination, StrategyUsed::Failed, bytes_before, bytes_before, true, message.into())
    }

    pub fn dry_run(source: &Path, destination: &Path, bytes_before: u64) -> Self {
        Self::build(
            source,
            destination,
            StrategyUsed::DryRun,
            bytes_before,
            bytes_before,
            true,
            "Dry run: no file written.".to_string(),
        )
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn strategy_used(&self) -> &StrategyUsed {
        &self.strategy_used
    }

    pub fn bytes_before(&self) -> u64 {
        self.bytes_before
    }

    pub fn bytes_after(&self) -> u64 {
        self.bytes_after
    }

    pub fn bytes_saved(&self) -> u64 {
        self.bytes_saved
    }

    pub fn percent_saved(&self) -> f64 {
        self.percent_saved
    }

    pub fn skipped(&self) -> bool {
        self.skipped
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_committed(&self) -> bool {
        !self.skipped
    }

    pub fn is_failed(&self) -> bool {
        self.strategy_used == StrategyUsed::Failed
    }

    /// Single stdout line: `[OK] a.pdf -> a.pdf | ghostscript(ebook) | 1.00 MB -> 400.00 KB | saved: ...`
    pub fn summary_line(&self) -> String {
        use crate::file_manager::FileManager;

        let status = if self.skipped { "SKIP" } else { "OK" };
        format!(
            "[{}] {} -> {} | {} | {} -> {} | saved: {} ({:.2}%)",
            status,
            display_name(&self.source),
            display_name(&self.destination),
            self.strategy_used,
            FileManager::format_size(self.bytes_before),
            FileManager::format_size(self.bytes_after),
            FileManager::format_size(self.bytes_saved),
            self.percent_saved,
        )
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
