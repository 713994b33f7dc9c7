//! # Optimizer Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `batch_runner`: Enumerazione dei file e aggregazione dei totali
//! - `compression_orchestrator`: Strategie, controllo dimensione e commit per singolo file
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod batch_runner;
pub mod compression_orchestrator;
pub mod path_resolver;

pub use batch_runner::{BatchReport, BatchRunner};
pub use compression_orchestrator::CompressionOrchestrator;
pub use path_resolver::PathResolver;
