//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery dei PDF.
//!
//! ## Responsabilità:
//! - Discovery di file PDF in una directory (shallow o ricorsiva)
//! - Controllo estensione `.pdf` case-insensitive
//! - Deduplicazione per path canonico (filesystem case-insensitive, symlink)
//! - Utilità per dimensioni e percentuali
//! - Formattazione human-readable delle dimensioni
//!
//! ## Operazioni sui file:
//! - `find_pdf_files()`: Trova tutti i PDF in una directory, ordinati per path
//! - `is_pdf()`: Determina se un path ha estensione PDF
//! - `get_file_size()`: Dimensione del file in byte
//!
//! ## Utilità:
//! - `format_size()`: Converte bytes in formato leggibile (KB, MB, GB)
//! - `calculate_reduction()`: Calcola percentuale di riduzione
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::find_pdf_files(Path::new("/path/to/docs"), true, None)?;
//! for file in files {
//!     // compress file
//! }
//! ```

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Get the size of a file in bytes
    pub async fn get_file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path).await?;
        Ok(metadata.len())
    }

    /// Find all PDF files in a directory, sorted by path.
    ///
    /// `exclude` prunes a subtree from the walk (the output directory when it
    /// lives inside the scanned folder).
    pub fn find_pdf_files(folder: &Path, recursive: bool, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut walker = WalkDir::new(folder).follow_links(true);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || exclude.map_or(true, |ex| !e.path().starts_with(ex)))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !Self::is_pdf(path) {
                continue;
            }

            let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            if seen.insert(key) {
                files.push(path.to_path_buf());
            } else {
                debug!("Skipping duplicate entry: {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if a path has a `.pdf` extension (any case)
    pub fn is_pdf(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction (never negative)
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            (original_size.saturating_sub(new_size) as f64 / original_size as f64) * 100.0
        }
    }
}
