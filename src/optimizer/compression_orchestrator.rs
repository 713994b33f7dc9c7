//! # Compression Orchestrator
//!
//! Macchina a stati per un singolo file:
//!
//! ```text
//! Start → primario → fallback? → candidato → controllo dimensione → commit → Done
//!            │           │            │               │                │
//!            └───────────┴──► Failed  └──► Failed     └──► Skipped     └──► Skipped
//! ```
//!
//! ## Regole:
//! - Dry run: nessun I/O, `skipped = true`, `bytes_after = bytes_before`
//! - Il fallback viene tentato solo se il primario fallisce, e solo se disponibile
//! - Nessun retry: ogni fallimento è terminale per quel file
//! - Il candidato viene accettato solo se strettamente più piccolo dell'originale
//! - Directory temporanea per file, rimossa su ogni percorso di uscita (drop di `TempDir`)
//! - Il commit è un rename atomico nella destinazione; mai sovrascrive senza `overwrite`
//!
//! Ogni errore viene convertito in un `CompressionResult` con `skipped = true`.

use crate::{
    config::Config,
    error::CompressError,
    file_manager::FileManager,
    report::Reporter,
    result::{CompressionResult, StrategyUsed},
    strategy::{CompressionStrategy, GhostscriptCompressor, LopdfOptimizer},
    tool_resolver::ToolPathResolver,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Runs the strategies for one file and commits the accepted candidate
pub struct CompressionOrchestrator {
    primary: Box<dyn CompressionStrategy>,
    fallback: Box<dyn CompressionStrategy>,
    config: Config,
}

impl CompressionOrchestrator {
    /// Ghostscript as primary, lopdf as fallback
    pub fn new(config: Config) -> Self {
        let timeout = config.tool_timeout_secs.map(Duration::from_secs);
        let primary = GhostscriptCompressor::new(ToolPathResolver::new()).with_timeout(timeout);
        let fallback = LopdfOptimizer::new(config.fallback_enabled);

        Self::with_strategies(config, Box::new(primary), Box::new(fallback))
    }

    pub fn with_strategies(
        config: Config,
        primary: Box<dyn CompressionStrategy>,
        fallback: Box<dyn CompressionStrategy>,
    ) -> Self {
        Self {
            primary,
            fallback,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process one source file into `destination`
    pub async fn compress_one(&self, source: &Path, destination: &Path, reporter: &dyn Reporter) -> CompressionResult {
        let bytes_before = match FileManager::get_file_size(source).await {
            Ok(size) => size,
            Err(e) => {
                return CompressionResult::failed(source, destination, 0, format!("Cannot read source file: {}", e))
            }
        };

        if self.config.dry_run {
            return CompressionResult::dry_run(source, destination, bytes_before);
        }

        let work_dir = match tempfile::Builder::new().prefix("pdfcompress_").tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                return CompressionResult::failed(
                    source,
                    destination,
                    bytes_before,
                    format!("Cannot create temporary directory: {}", e),
                )
            }
        };
        let candidate = work_dir.path().join(Self::candidate_name(source));

        let (strategy_used, message) = match self.produce_candidate(source, &candidate, reporter).await {
            Ok(produced) => produced,
            Err(reason) => return CompressionResult::failed(source, destination, bytes_before, reason),
        };

        let bytes_after = match fs::metadata(&candidate).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                return CompressionResult::failed(
                    source,
                    destination,
                    bytes_before,
                    CompressError::NoOutputProduced.to_string(),
                )
            }
        };
        debug!(
            "Candidate for {}: {} -> {}",
            source.display(),
            FileManager::format_size(bytes_before),
            FileManager::format_size(bytes_after)
        );

        if bytes_after >= bytes_before {
            let reason = CompressError::NotSmallerThanSource {
                before: FileManager::format_size(bytes_before),
                after: FileManager::format_size(bytes_after),
            };
            return CompressionResult::not_committed(
                source,
                destination,
                strategy_used,
                bytes_before,
                bytes_after,
                format!("Skipped: {}. {}", reason, message),
            );
        }

        match Self::commit(&candidate, destination, self.config.overwrite).await {
            Ok(()) => CompressionResult::committed(source, destination, strategy_used, bytes_before, bytes_after, message),
            Err(e) => {
                CompressionResult::not_committed(source, destination, strategy_used, bytes_before, bytes_after, e.to_string())
            }
        }
    }

    fn candidate_name(source: &Path) -> String {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        format!("{}.compressed.pdf", stem)
    }

    /// Try primary then fallback; `Err` carries both failure reasons
    async fn produce_candidate(
        &self,
        source: &Path,
        candidate: &Path,
        reporter: &dyn Reporter,
    ) -> Result<(StrategyUsed, String), String> {
        let quality = self.config.quality;

        let primary_error = match self.primary.compress(source, candidate, quality).await {
            Ok(message) => {
                let used = StrategyUsed::Primary {
                    tool: self.primary.name().to_string(),
                    quality,
                };
                return Ok((used, message));
            }
            Err(e) => e,
        };
        reporter.strategy_failed(source, self.primary.name(), &primary_error.to_string());

        // A failed run may leave a partial file behind.
        let _ = fs::remove_file(candidate).await;

        let fallback_result = if self.fallback.is_available() {
            self.fallback.compress(source, candidate, quality).await
        } else {
            Err(CompressError::FallbackUnavailable(self.fallback.name().to_string()))
        };

        match fallback_result {
            Ok(message) => {
                let used = StrategyUsed::Fallback {
                    tool: self.fallback.name().to_string(),
                };
                Ok((used, message))
            }
            Err(fallback_error) => Err(format!(
                "Compression failed. {}: {} | Fallback ({}): {}",
                self.primary.name(),
                primary_error,
                self.fallback.name(),
                fallback_error
            )),
        }
    }

    /// Move the accepted candidate to `destination`
    async fn commit(candidate: &Path, destination: &Path, overwrite: bool) -> Result<(), CompressError> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CompressError::WriteFailed(format!("cannot create {}: {}", parent.display(), e)))?;
        }

        if !overwrite && fs::symlink_metadata(destination).await.is_ok() {
            return Err(CompressError::DestinationExists(destination.to_path_buf()));
        }

        if fs::rename(candidate, destination).await.is_ok() {
            return Ok(());
        }

        // Rename fails across filesystems: stage a copy next to the destination.
        let partial = Self::partial_path(destination);
        if let Err(e) = fs::copy(candidate, &partial).await {
            let _ = fs::remove_file(&partial).await;
            return Err(CompressError::WriteFailed(e.to_string()));
        }
        if let Err(e) = fs::rename(&partial, destination).await {
            let _ = fs::remove_file(&partial).await;
            return Err(CompressError::WriteFailed(e.to_string()));
        }

        Ok(())
    }

    fn partial_path(destination: &Path) -> PathBuf {
        let name = destination.file_name().unwrap_or_default().to_string_lossy();
        destination.with_file_name(format!(".{}.part", name))
    }
}
