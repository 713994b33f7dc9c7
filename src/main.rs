//! # PDF Compressor - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Validazione degli input dell'utente
//! - Creazione della configurazione e avvio del batch
//! - Conversione dell'esito in exit code
//!
//! ## Exit code:
//! - `0`: successo (incluso "niente da fare" e dry run)
//! - `1`: modalità file singolo, file saltato o fallito
//! - `2`: input non valido (file/cartella mancante, estensione errata)
//!
//! ## Esempio di utilizzo:
//! ```bash
//! pdfcompress --folder ~/scans --out ~/scans-small --recursive --quality screen
//! ```

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use pdf_compressor::{
    config::{expand_home, prepare_output_dir}, BatchRunner, CompressError, CompressionOrchestrator, Config, ConsoleReporter, JsonReporter,
    QualityTier, Reporter, StrategyUsed,
};

#[derive(Parser)]
#[command(name = "pdfcompress")]
#[command(about = "Offline PDF compressor (Ghostscript preferred, lopdf fallback)")]
#[command(group(ArgGroup::new("input").required(true).args(["file", "folder"])))]
struct Args {
    /// Path to a single PDF file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Path to a folder containing PDFs
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Output folder
    #[arg(long)]
    out: PathBuf,

    /// Compression quality (Ghostscript)
    #[arg(long, value_enum, default_value_t = QualityTier::Ebook)]
    quality: QualityTier,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// Recursively scan subfolders (only with --folder)
    #[arg(long, requires = "folder")]
    recursive: bool,

    /// Show what would happen without writing files
    #[arg(long)]
    dry_run: bool,

    /// Do not fall back to the in-process optimizer when Ghostscript fails
    #[arg(long)]
    no_fallback: bool,

    /// Kill Ghostscript if it runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Emit JSON lines instead of human-readable output
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose);

    let reporter: Arc<dyn Reporter> = if args.json {
        Arc::new(JsonReporter::new())
    } else {
        Arc::new(ConsoleReporter::new())
    };

    match run(args, reporter.clone()).await {
        Ok(code) => code,
        Err(e) => {
            reporter.fatal(&format!("{:#}", e));
            match e.downcast_ref::<CompressError>() {
                Some(err) if err.is_fatal() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args, reporter: Arc<dyn Reporter>) -> Result<ExitCode> {
    let output_dir = prepare_output_dir(&args.out, args.dry_run)?;

    let config = Config {
        quality: args.quality,
        output_dir,
        overwrite: args.overwrite,
        recursive: args.recursive,
        dry_run: args.dry_run,
        fallback_enabled: !args.no_fallback,
        tool_timeout_secs: args.timeout,
    };
    config.validate()?;

    let runner = BatchRunner::new(CompressionOrchestrator::new(config), reporter);

    if let Some(file) = args.file {
        let source = absolute(&expand_home(&file))?;
        let result = runner.run_file(&source).await?;
        let code = if result.is_committed() || *result.strategy_used() == StrategyUsed::DryRun {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        };
        return Ok(code);
    }

    if let Some(folder) = args.folder {
        let folder = absolute(&expand_home(&folder))?;
        let folder = folder.canonicalize().unwrap_or(folder);
        runner.run_folder(&folder).await?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve `path` against the current directory without requiring it to exist
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
