//! Fallback path end to end: Ghostscript missing, lopdf rewrites a bloated PDF.
#![cfg(feature = "fallback")]

use lopdf::{dictionary, Document, Object, Stream};
use pdf_compressor::{
    strategy::{GhostscriptCompressor, LopdfOptimizer},
    BatchTotals, CompressionOrchestrator, CompressionResult, Config, Reporter, StrategyUsed,
};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct Warnings(Mutex<Vec<String>>);

impl Reporter for Warnings {
    fn strategy_failed(&self, _source: &Path, strategy: &str, reason: &str) {
        self.0.lock().unwrap().push(format!("{}: {}", strategy, reason));
    }
    fn file_finished(&self, _result: &CompressionResult) {}
    fn batch_finished(&self, _totals: &BatchTotals, _files_scanned: usize, _dry_run: bool) {}
    fn fatal(&self, _message: &str) {}
}

/// One page with a large uncompressed content stream plus an orphaned stream
fn bloated_pdf(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = "BT /F1 12 Tf 72 720 Td (Hello compression) Tj ET\n".repeat(2000);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    doc.add_object(Stream::new(dictionary! {}, vec![b'z'; 64 * 1024]));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[tokio::test]
async fn fallback_shrinks_bloated_pdf() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("bloated.pdf");
    bloated_pdf(&source);
    let before = std::fs::metadata(&source).unwrap().len();

    let destination = temp.path().join("out").join("bloated.pdf");
    let config = Config {
        output_dir: temp.path().join("out"),
        ..Default::default()
    };
    let reporter = Warnings::default();

    let res = CompressionOrchestrator::with_strategies(
        config,
        Box::new(GhostscriptCompressor::with_binary(temp.path().join("no-such-gs"))),
        Box::new(LopdfOptimizer::default()),
    )
    .compress_one(&source, &destination, &reporter)
    .await;

    assert!(!res.skipped(), "{}", res.message());
    assert_eq!(res.strategy_used(), &StrategyUsed::Fallback { tool: "lopdf".into() });
    assert_eq!(res.bytes_before(), before);
    assert!(res.bytes_after() < before);

    let warnings = reporter.0.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("ghostscript"));

    let rewritten = Document::load(&destination).unwrap();
    assert_eq!(rewritten.get_pages().len(), 1);
}

#[tokio::test]
async fn fallback_disabled_at_runtime() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("bloated.pdf");
    bloated_pdf(&source);
    let destination = temp.path().join("out").join("bloated.pdf");

    let config = Config {
        output_dir: temp.path().join("out"),
        fallback_enabled: false,
        ..Default::default()
    };
    let res = CompressionOrchestrator::with_strategies(
        config,
        Box::new(GhostscriptCompressor::with_binary(temp.path().join("no-such-gs"))),
        Box::new(LopdfOptimizer::new(false)),
    )
    .compress_one(&source, &destination, &Warnings::default())
    .await;

    assert!(res.is_failed());
    assert!(res.message().contains("fallback unavailable"));
    assert!(!destination.exists());
}
