//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di compressione
//! - Fornisce validazione dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//! - Espande i path che iniziano con `~`
//! - Prepara la directory di output (non creata in dry run)
//!
//! ## Parametri di configurazione:
//! - `quality`: Preset Ghostscript (screen|ebook|printer|prepress, default: ebook)
//! - `output_dir`: Directory di output (obbligatoria)
//! - `overwrite`: Sovrascrive file di output esistenti (default: false)
//! - `recursive`: Scansione ricorsiva delle sottocartelle (default: false)
//! - `dry_run`: Simulazione senza scrivere file (default: false)
//! - `fallback_enabled`: Abilita l'ottimizzatore lopdf (default: true)
//! - `tool_timeout_secs`: Tempo massimo per Ghostscript (default: None = nessun limite)
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     quality: QualityTier::Screen,
//!     output_dir: PathBuf::from("/tmp/out"),
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::quality::QualityTier;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration for PDF compression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ghostscript quality preset
    pub quality: QualityTier,
    /// Output directory for compressed files
    pub output_dir: PathBuf,
    /// Overwrite existing output files
    pub overwrite: bool,
    /// Recursively scan subfolders (folder mode only)
    pub recursive: bool,
    /// Dry run - don't write anything
    pub dry_run: bool,
    /// Allow the in-process lopdf optimizer when Ghostscript fails
    pub fallback_enabled: bool,
    /// Kill Ghostscript after this many seconds (None = wait indefinitely)
    pub tool_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: QualityTier::default(),
            output_dir: PathBuf::from("compressed"),
            overwrite: false,
            recursive: false,
            dry_run: false,
            fallback_enabled: true,
            tool_timeout_secs: None,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Output directory must not be empty"));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            ));
        }

        if self.tool_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("Tool timeout must be greater than 0 seconds"));
        }

        Ok(())
    }
}

/// Resolve the output directory to an absolute path, creating it unless `dry_run`
pub fn prepare_output_dir(path: &Path, dry_run: bool) -> Result<PathBuf> {
    let path = expand_home(path);
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };

    if !dry_run && !path.exists() {
        std::fs::create_dir_all(&path)?;
        info!("Created output directory: {}", path.display());
    }

    Ok(path.canonicalize().unwrap_or(path))
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.quality, QualityTier::Ebook);
        assert!(!config.overwrite);
        assert!(!config.recursive);
        assert!(!config.dry_run);
        assert!(config.fallback_enabled);
        assert_eq!(config.tool_timeout_secs, None);
    }

    #[test]
    fn test_config_validation() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config {
            output_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.tool_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.tool_timeout_secs = Some(30);
        assert!(config.validate().is_ok());

        let file_path = temp_dir.path().join("not_a_dir.pdf");
        std::fs::write(&file_path, b"%PDF").unwrap();
        config.output_dir = file_path;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prepare_output_dir_dry_run_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("a").join("b");

        let resolved = prepare_output_dir(&out, true).unwrap();
        assert_eq!(resolved, out);
        assert!(!temp_dir.path().join("a").exists());

        let resolved = prepare_output_dir(&out, false).unwrap();
        assert!(out.is_dir());
        assert_eq!(resolved, out.canonicalize().unwrap());
    }

    #[test]
    fn test_expand_home() {
        let plain = PathBuf::from("/data/in");
        assert_eq!(expand_home(&plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/docs")), home.join("docs"));
        }
    }
}
