//! Drives the real `GhostscriptCompressor` against shell-script stand-ins for `gs`.
//!
//! Kept to a single test so no other thread forks while a script is still open
//! for writing.
#![cfg(unix)]

use pdf_compressor::{
    strategy::{GhostscriptCompressor, LopdfOptimizer},
    BatchTotals, CompressionOrchestrator, CompressionResult, Config, QualityTier, Reporter, StrategyUsed,
};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

struct Quiet;

impl Reporter for Quiet {
    fn strategy_failed(&self, _source: &Path, _strategy: &str, _reason: &str) {}
    fn file_finished(&self, _result: &CompressionResult) {}
    fn batch_finished(&self, _totals: &BatchTotals, _files_scanned: usize, _dry_run: bool) {}
    fn fatal(&self, _message: &str) {}
}

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

async fn compress_with(gs: GhostscriptCompressor, source: &Path, destination: &Path) -> CompressionResult {
    let config = Config {
        quality: QualityTier::Screen,
        output_dir: destination.parent().unwrap().to_path_buf(),
        overwrite: true,
        ..Default::default()
    };
    CompressionOrchestrator::with_strategies(config, Box::new(gs), Box::new(LopdfOptimizer::new(false)))
        .compress_one(source, destination, &Quiet)
        .await
}

#[tokio::test]
async fn ghostscript_stub_scenarios() {
    let temp = TempDir::new().unwrap();
    let bin = temp.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();

    let source = temp.path().join("scan.pdf");
    std::fs::write(&source, vec![b'p'; 4096]).unwrap();
    let destination = temp.path().join("out").join("scan.pdf");

    let good = script(
        &bin,
        "gs-good",
        r#"out=""; ok=0
for a in "$@"; do
  case "$a" in
    -sOutputFile=*) out="${a#-sOutputFile=}" ;;
    -dPDFSETTINGS=/screen) ok=1 ;;
  esac
done
[ "$ok" = 1 ] || { echo "wrong preset" >&2; exit 3; }
printf 'tiny pdf' > "$out""#,
    );
    let failing = script(&bin, "gs-fail", "echo 'Error: /undefined in --run--' >&2\nexit 1");
    let silent = script(&bin, "gs-silent", "exit 0");
    let slow = script(&bin, "gs-slow", "sleep 10");

    // Success: candidate committed and attributed to the primary.
    let res = compress_with(GhostscriptCompressor::with_binary(&good), &source, &destination).await;
    assert!(!res.skipped(), "{}", res.message());
    assert_eq!(
        res.strategy_used(),
        &StrategyUsed::Primary { tool: "ghostscript".into(), quality: QualityTier::Screen }
    );
    assert_eq!(std::fs::read(&destination).unwrap(), b"tiny pdf");
    std::fs::remove_file(&destination).unwrap();

    // Non-zero exit: stderr surfaces in the message alongside the fallback reason.
    let res = compress_with(GhostscriptCompressor::with_binary(&failing), &source, &destination).await;
    assert!(res.is_failed());
    assert!(res.message().contains("/undefined in --run--"), "{}", res.message());
    assert!(res.message().contains("fallback unavailable"), "{}", res.message());
    assert!(!destination.exists());

    // Exit zero without writing anything.
    let res = compress_with(GhostscriptCompressor::with_binary(&silent), &source, &destination).await;
    assert!(res.is_failed());
    assert_eq!(res.message(), "Compression produced no output file.");

    // Bounded wait kills a hung process.
    let gs = GhostscriptCompressor::with_binary(&slow).with_timeout(Some(Duration::from_secs(1)));
    let started = std::time::Instant::now();
    let res = compress_with(gs, &source, &destination).await;
    assert!(started.elapsed() < Duration::from_secs(8));
    assert!(res.is_failed());
    assert!(res.message().contains("terminated"), "{}", res.message());
}
