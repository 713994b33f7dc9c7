//! # PDF Compressor Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `quality`: Preset di qualità Ghostscript
//! - `result`: `CompressionResult` per singolo file
//! - `file_manager`: Discovery dei PDF e utilità sulle dimensioni
//! - `tool_resolver`: Ricerca dell'eseguibile Ghostscript
//! - `strategy`: Compressore primario (Ghostscript) e fallback (lopdf)
//! - `optimizer`: Orchestratore per file e batch runner
//! - `progress`: Progress bar e totali del batch
//! - `report`: Sink di reporting (console / JSON)
//! - `json_output`: Messaggi JSON-lines
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use pdf_compressor::{BatchRunner, CompressionOrchestrator, Config, ConsoleReporter};
//! use std::sync::Arc;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::default();
//! let runner = BatchRunner::new(CompressionOrchestrator::new(config), Arc::new(ConsoleReporter::new()));
//! let report = runner.run_folder(std::path::Path::new("/path/to/pdfs")).await?;
//! println!("{}", report.totals.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod optimizer;
pub mod progress;
pub mod quality;
pub mod report;
pub mod result;
pub mod strategy;
pub mod tool_resolver;
pub mod utils;

pub use config::Config;
pub use error::CompressError;
pub use optimizer::{BatchReport, BatchRunner, CompressionOrchestrator, PathResolver};
pub use progress::BatchTotals;
pub use quality::QualityTier;
pub use report::{ConsoleReporter, JsonReporter, Reporter};
pub use result::{CompressionResult, StrategyUsed};
