//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `CompressError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi, mostrati così come sono all'utente
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `ToolNotFound` / `ToolExecutionFailed` / `ToolTimedOut`: compressore esterno (Ghostscript)
//! - `FallbackUnavailable` / `FallbackExecutionFailed`: ottimizzatore in-process (lopdf)
//! - `NoOutputProduced`: una strategia ha dichiarato successo senza scrivere il file
//! - `NotSmallerThanSource`: il candidato non è più piccolo dell'originale
//! - `DestinationExists` / `WriteFailed`: fallimenti del commit
//! - `InvalidInput`: argomenti `--file`/`--folder` non validi (unico errore fatale)
//!
//! Tutti gli errori per singolo file vengono convertiti in un `CompressionResult`
//! con `skipped = true`: non interrompono mai il batch.

use std::path::PathBuf;

/// Custom error types for PDF compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    ToolNotFound(String),

    #[error("{0}")]
    ToolExecutionFailed(String),

    #[error("{tool} did not finish within {seconds}s and was terminated")]
    ToolTimedOut { tool: String, seconds: u64 },

    #[error("{0} is not available (fallback unavailable)")]
    FallbackUnavailable(String),

    #[error("{0}")]
    FallbackExecutionFailed(String),

    #[error("Compression produced no output file.")]
    NoOutputProduced,

    #[error("output not smaller ({after} >= {before})")]
    NotSmallerThanSource { before: String, after: String },

    #[error("Output exists (use --overwrite): {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Failed to save output: {0}")]
    WriteFailed(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl CompressError {
    /// Whether this error should abort the whole invocation (exit code 2)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
