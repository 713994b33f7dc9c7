//! # Batch Runner
//!
//! Enumera i file sorgente (file singolo o scansione di una cartella),
//! guida l'orchestratore un file alla volta in ordine di path e aggrega i
//! totali in `BatchTotals`.
//!
//! ## Validazione input (errore fatale, exit code 2):
//! - File singolo: deve esistere ed avere estensione `.pdf` (case-insensitive)
//! - Cartella: deve esistere ed essere una directory
//!
//! ## Elaborazione:
//! - Sequenziale, nessuna sovrapposizione tra file
//! - Una riga per file tramite il `Reporter`
//! - In dry run si conta solo il numero di file scansionati

use crate::{
    error::CompressError,
    file_manager::FileManager,
    optimizer::{compression_orchestrator::CompressionOrchestrator, path_resolver::PathResolver},
    progress::BatchTotals,
    report::Reporter,
    result::CompressionResult,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a folder run
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub totals: BatchTotals,
    pub files_scanned: usize,
    pub dry_run: bool,
}

/// Drives the orchestrator over one batch
pub struct BatchRunner {
    orchestrator: CompressionOrchestrator,
    reporter: Arc<dyn Reporter>,
}

impl BatchRunner {
    pub fn new(orchestrator: CompressionOrchestrator, reporter: Arc<dyn Reporter>) -> Self {
        Self { orchestrator, reporter }
    }

    fn output_dir(&self) -> &Path {
        &self.orchestrator.config().output_dir
    }

    /// Validate a `--file` argument
    pub fn validate_file(source: &Path) -> Result<(), CompressError> {
        if !source.exists() {
            return Err(CompressError::InvalidInput(format!("File not found: {}", source.display())));
        }
        if !source.is_file() || !FileManager::is_pdf(source) {
            return Err(CompressError::InvalidInput(format!("Not a PDF: {}", source.display())));
        }
        Ok(())
    }

    /// Validate a `--folder` argument
    pub fn validate_folder(folder: &Path) -> Result<(), CompressError> {
        if !folder.is_dir() {
            return Err(CompressError::InvalidInput(format!(
                "Folder not found or not a directory: {}",
                folder.display()
            )));
        }
        Ok(())
    }

    /// Compress a single file into the output root
    pub async fn run_file(&self, source: &Path) -> Result<CompressionResult, CompressError> {
        Self::validate_file(source)?;

        let config = self.orchestrator.config();
        self.reporter.batch_started(source, config, 1);

        let destination = PathResolver::get_output_path(source, None, self.output_dir());
        let result = self
            .orchestrator
            .compress_one(source, &destination, self.reporter.as_ref())
            .await;
        self.reporter.file_finished(&result);

        Ok(result)
    }

    /// Compress every PDF under `folder`, preserving relative paths
    pub async fn run_folder(&self, folder: &Path) -> Result<BatchReport, CompressError> {
        Self::validate_folder(folder)?;

        let config = self.orchestrator.config();
        let files = self.enumerate(folder)?;
        let dry_run = config.dry_run;

        if files.is_empty() {
            warn!("No PDF files found in: {}", folder.display());
        }

        self.reporter.batch_started(folder, config, files.len());

        let mut totals = BatchTotals::new();
        for source in &files {
            let destination = PathResolver::get_output_path(source, Some(folder), self.output_dir());
            debug!("{} -> {}", source.display(), destination.display());

            let result = self
                .orchestrator
                .compress_one(source, &destination, self.reporter.as_ref())
                .await;
            self.reporter.file_finished(&result);

            if !dry_run {
                totals.record(&result);
            }
        }

        self.reporter.batch_finished(&totals, files.len(), dry_run);

        Ok(BatchReport {
            totals,
            files_scanned: files.len(),
            dry_run,
        })
    }

    fn enumerate(&self, folder: &Path) -> Result<Vec<PathBuf>, CompressError> {
        let config = self.orchestrator.config();

        // Never pick up our own outputs when they live inside the scanned tree.
        let exclude = self
            .output_dir()
            .canonicalize()
            .ok()
            .filter(|out| out.starts_with(folder) && out.as_path() != folder);

        FileManager::find_pdf_files(folder, config.recursive, exclude.as_deref())
            .map_err(|e| CompressError::InvalidInput(format!("Cannot scan {}: {}", folder.display(), e)))
    }
}
