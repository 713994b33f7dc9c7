//! # Ghostscript Compressor
//!
//! Compressore primario: rielabora il PDF con il device `pdfwrite` di
//! Ghostscript usando un set di flag fisso, parametrizzato solo da preset di
//! qualità e path di input/output.
//!
//! ## Flag utilizzati:
//! - `-dCompatibilityLevel=1.4`: baseline stabile
//! - `-dPDFSETTINGS=/<quality>`: preset di compressione
//! - `-dDetectDuplicateImages=true`, `-dCompressFonts=true`, `-dSubsetFonts=true`
//! - `-dNOPAUSE -dBATCH -dSAFER`: esecuzione non interattiva e sandboxed
//!
//! ## Modalità di fallimento:
//! - Tool non trovato nel PATH → `ToolNotFound`
//! - Exit code non zero → `ToolExecutionFailed` con stderr (o stdout)
//! - Errore di avvio processo → `ToolExecutionFailed`
//! - Timeout opzionale scaduto → processo terminato, `ToolTimedOut`

use super::CompressionStrategy;
use crate::{args, error::CompressError, quality::QualityTier, tool_resolver::ToolPathResolver};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

/// Where the Ghostscript executable comes from
#[derive(Debug, Clone)]
enum Binary {
    Resolver(ToolPathResolver),
    Fixed(PathBuf),
}

/// External high-quality compressor backed by Ghostscript
#[derive(Debug, Clone)]
pub struct GhostscriptCompressor {
    binary: Binary,
    timeout: Option<Duration>,
}

impl GhostscriptCompressor {
    /// Locate Ghostscript through `resolver` at each invocation
    pub fn new(resolver: ToolPathResolver) -> Self {
        Self {
            binary: Binary::Resolver(resolver),
            timeout: None,
        }
    }

    /// Use an explicit executable path
    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: Binary::Fixed(path.into()),
            timeout: None,
        }
    }

    /// Terminate the child process after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn locate(&self) -> Result<PathBuf, CompressError> {
        match &self.binary {
            Binary::Fixed(path) if path.is_file() => Ok(path.clone()),
            Binary::Fixed(path) => Err(CompressError::ToolNotFound(format!(
                "Ghostscript not found at {}",
                path.display()
            ))),
            Binary::Resolver(resolver) => resolver.check_ghostscript().map_err(CompressError::ToolNotFound),
        }
    }

    /// Fixed argument list for one invocation
    pub fn build_args(source: &Path, output: &Path, quality: QualityTier) -> Vec<String> {
        args![
            "-sDEVICE=pdfwrite",
            "-dCompatibilityLevel=1.4",
            "-dNOPAUSE",
            "-dBATCH",
            "-dSAFER",
            format!("-dPDFSETTINGS={}", quality.pdf_settings()),
            "-dDetectDuplicateImages=true",
            "-dCompressFonts=true",
            "-dSubsetFonts=true",
            format!("-sOutputFile={}", output.display()),
            source.display(),
        ]
    }

    /// Diagnostic text from a failed run: stderr first, then stdout
    fn diagnostic(output: &std::process::Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);

        let diagnostic = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Ghostscript failed ({}).", output.status));
        diagnostic
    }
}

#[async_trait]
impl CompressionStrategy for GhostscriptCompressor {
    fn name(&self) -> &str {
        "ghostscript"
    }

    async fn compress(&self, source: &Path, output: &Path, quality: QualityTier) -> Result<String, CompressError> {
        let gs = self.locate()?;
        let args = Self::build_args(source, output, quality);
        debug!("Running {} {:?}", gs.display(), args);

        let mut cmd = Command::new(&gs);
        cmd.args(&args).kill_on_drop(true);

        let start_time = Instant::now();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| CompressError::ToolTimedOut {
                    tool: "Ghostscript".to_string(),
                    seconds: limit.as_secs(),
                })?,
            None => cmd.output().await,
        };

        let output_data = result
            .map_err(|e| CompressError::ToolExecutionFailed(format!("Ghostscript execution error: {}", e)))?;
        debug!("Ghostscript finished in {:?} ({})", start_time.elapsed(), output_data.status);

        if !output_data.status.success() {
            return Err(CompressError::ToolExecutionFailed(Self::diagnostic(&output_data)));
        }

        Ok("Compressed with Ghostscript.".to_string())
    }
}
