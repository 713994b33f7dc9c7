//! # lopdf Structural Optimizer
//!
//! Fallback in-process: apre il documento, elimina gli oggetti non
//! referenziati e gli stream vuoti, comprime gli stream con Flate e risalva
//! (senza linearizzazione). Non ricampiona immagini, quindi il risparmio è
//! tipicamente molto inferiore a Ghostscript.
//!
//! La disponibilità è un flag di capability: falso se la crate è stata
//! compilata senza la feature `fallback` oppure se disabilitata a runtime
//! (`--no-fallback`).

use super::CompressionStrategy;
use crate::{error::CompressError, quality::QualityTier};
use async_trait::async_trait;
use std::path::Path;
#[cfg(feature = "fallback")]
use tracing::debug;

/// Weaker in-process optimizer used when Ghostscript fails
#[derive(Debug, Clone)]
pub struct LopdfOptimizer {
    enabled: bool,
}

impl LopdfOptimizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether the crate was built with the `fallback` feature
    pub const fn compiled_in() -> bool {
        cfg!(feature = "fallback")
    }

    #[cfg(feature = "fallback")]
    fn optimize(source: &Path, output: &Path) -> Result<(), String> {
        let mut doc = lopdf::Document::load(source).map_err(|e| e.to_string())?;

        let pruned = doc.prune_objects();
        let empty_streams = doc.delete_zero_length_streams();
        debug!(
            "lopdf: pruned {} unreferenced objects, {} empty streams in {}",
            pruned.len(),
            empty_streams.len(),
            source.display()
        );

        doc.renumber_objects();
        doc.compress();
        doc.save(output).map_err(|e| e.to_string())?;
        Ok(())
    }

    #[cfg(not(feature = "fallback"))]
    fn optimize(_source: &Path, _output: &Path) -> Result<(), String> {
        Err("built without the `fallback` feature".to_string())
    }
}

impl Default for LopdfOptimizer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl CompressionStrategy for LopdfOptimizer {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn is_available(&self) -> bool {
        self.enabled && Self::compiled_in()
    }

    async fn compress(&self, source: &Path, output: &Path, _quality: QualityTier) -> Result<String, CompressError> {
        if !self.is_available() {
            return Err(CompressError::FallbackUnavailable("lopdf".to_string()));
        }

        let source = source.to_path_buf();
        let output = output.to_path_buf();
        run_blocking(move || Self::optimize(&source, &output)).await?;

        Ok("Optimized with lopdf (structure/streams).".to_string())
    }
}

/// Run a lopdf job off the async runtime; a panic in the job is a strategy failure
async fn run_blocking<F>(job: F) -> Result<(), CompressError>
where
    F: FnOnce() -> Result<(), String> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| CompressError::FallbackExecutionFailed(format!("lopdf task panicked: {}", e)))?
        .map_err(|e| CompressError::FallbackExecutionFailed(format!("lopdf failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "fallback")]
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_panicking_job_becomes_execution_failure() {
        let err = run_blocking(|| panic!("malformed xref")).await.unwrap_err();
        assert!(matches!(err, CompressError::FallbackExecutionFailed(_)));
        assert!(err.to_string().contains("lopdf task panicked"));

        let err = run_blocking(|| Err("bad header".to_string())).await.unwrap_err();
        assert!(err.to_string().contains("lopdf failed: bad header"));

        assert!(run_blocking(|| Ok(())).await.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_optimizer_is_unavailable() {
        let optimizer = LopdfOptimizer::new(false);
        assert!(!optimizer.is_available());

        let err = optimizer
            .compress(Path::new("a.pdf"), Path::new("b.pdf"), QualityTier::Ebook)
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::FallbackUnavailable(_)));
    }

    #[cfg(feature = "fallback")]
    #[tokio::test]
    async fn test_garbage_input_fails_without_output() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("broken.pdf");
        let output = temp.path().join("out.pdf");
        std::fs::write(&source, b"this is not a pdf").unwrap();

        let err = LopdfOptimizer::default()
            .compress(&source, &output, QualityTier::Ebook)
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::FallbackExecutionFailed(_)));
        assert!(err.to_string().starts_with("lopdf failed"));
        assert!(!output.exists());
    }

    #[cfg(not(feature = "fallback"))]
    #[test]
    fn test_not_compiled_in() {
        assert!(!LopdfOptimizer::default().is_available());
    }
}
