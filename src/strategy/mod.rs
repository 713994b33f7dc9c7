//! # Compression Strategies
//!
//! Ogni strategia è una capability opaca: dato un PDF sorgente, un path
//! temporaneo e un preset di qualità, produce un file candidato oppure
//! fallisce con un motivo leggibile.
//!
//! - `ghostscript`: compressore esterno di alta qualità (primario)
//! - `lopdf_optimizer`: ottimizzazione strutturale in-process (fallback)
//!
//! L'orchestratore non sa se una strategia lancia un processo o usa una
//! libreria nativa: conosce solo questo trait.

pub mod ghostscript;
pub mod lopdf_optimizer;

use crate::{error::CompressError, quality::QualityTier};
use async_trait::async_trait;
use std::path::Path;

pub use ghostscript::GhostscriptCompressor;
pub use lopdf_optimizer::LopdfOptimizer;

/// A way of producing a compressed candidate for one PDF
#[async_trait]
pub trait CompressionStrategy: Send + Sync {
    /// Short identifier used in result lines (`ghostscript`, `lopdf`)
    fn name(&self) -> &str;

    /// Runtime capability flag; an unavailable strategy is never invoked
    fn is_available(&self) -> bool {
        true
    }

    /// Write a candidate to `output`.
    ///
    /// `Ok` carries a human-readable success message and guarantees nothing
    /// beyond the strategy's own claim: callers still check that `output`
    /// exists. Never retried.
    async fn compress(&self, source: &Path, output: &Path, quality: QualityTier) -> Result<String, CompressError>;
}
