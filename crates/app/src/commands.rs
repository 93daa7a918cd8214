use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{info, warn};

use payscan_core::PayscanConfig;
use payscan_ocr::{
    receive_shared_file, spawn_share_receiver, ExtractionResult, Extractor, MockRecognizer,
    OcrBackend, PreprocessOptions, ScanPipeline, ScanResult, SharedImageSlot, SHARE_QUEUE_CAPACITY,
};

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Include the rule and confidence behind each field
    #[arg(long)]
    explain: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Text file holding OCR output; `-` reads stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Screenshot to scan (PNG, JPEG, WEBP, …); with `--base64`, `-` reads stdin
    image: PathBuf,

    /// The input holds a base64-encoded image or a `data:` URL
    #[arg(long)]
    base64: bool,

    /// Use the text in this file as the recognizer output instead of running OCR
    #[arg(long, value_name = "FILE")]
    recognized_text: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Inbox directory; defaults to `[share] inbox_dir` from the config
    dir: Option<PathBuf>,

    /// Use the text in this file as the recognizer output instead of running OCR
    #[arg(long, value_name = "FILE")]
    recognized_text: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

// ── Commands ──────────────────────────────────────────────────────────────────

pub fn extract(args: ExtractArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input)?;
    let extracted = Extractor::extract_utf8(&bytes)
        .with_context(|| format!("Cannot extract from {}", args.input.display()))?;
    let raw_text = String::from_utf8_lossy(&bytes);
    emit(&raw_text, &extracted, &args.output)
}

pub async fn scan(args: ScanArgs, config: &PayscanConfig) -> anyhow::Result<()> {
    let recognizer = build_recognizer(config, args.recognized_text.as_deref())?;
    let pipeline = ScanPipeline::new(recognizer, PreprocessOptions::from(&config.ocr));

    info!("Scanning: {}", args.image.display());
    let result = if args.base64 {
        let encoded = String::from_utf8(read_input(&args.image)?)
            .context("Base64 input must be text")?;
        pipeline.scan_base64(&encoded).await
    } else {
        pipeline.scan_file(&args.image).await
    }
    .with_context(|| format!("Failed to scan {}", args.image.display()))?;
    emit_result(&result, &args.output)
}

pub async fn watch(args: WatchArgs, config: &PayscanConfig) -> anyhow::Result<()> {
    let inbox = args
        .dir
        .or_else(|| config.share.inbox_dir.clone())
        .context("No share inbox: pass a directory or set `inbox_dir` under [share]")?;
    std::fs::create_dir_all(&inbox)
        .with_context(|| format!("Failed to create share inbox {}", inbox.display()))?;

    let recognizer = build_recognizer(config, args.recognized_text.as_deref())?;
    let pipeline = ScanPipeline::new(recognizer, PreprocessOptions::from(&config.ocr));

    // The watcher queues finished files; each one passes through the slot
    // and is scanned before the next is read.
    let slot = SharedImageSlot::new();
    let (tx, mut rx) = mpsc::channel::<PathBuf>(SHARE_QUEUE_CAPACITY);
    let _watcher = spawn_share_receiver(&inbox, tx)
        .with_context(|| format!("Failed to watch {}", inbox.display()))?;

    info!("Watching share inbox: {}", inbox.display());

    loop {
        tokio::select! {
            ready = rx.recv() => {
                let Some(path) = ready else { break };
                info!("Scanning shared image: {}", path.display());
                if let Err(e) = receive_shared_file(&path, &slot).await {
                    warn!("Could not read shared file {}: {e}", path.display());
                    continue;
                }
                let Some(image) = slot.take() else { continue };
                match pipeline.scan_bytes(image).await {
                    Ok(result) => emit_result(&result, &args.output)?,
                    Err(e) => warn!("Shared image scan failed: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping share inbox watcher");
                break;
            }
        }
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_recognizer(
    config: &PayscanConfig,
    recognized_text: Option<&Path>,
) -> anyhow::Result<Box<dyn OcrBackend>> {
    if let Some(path) = recognized_text {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recognized text {}", path.display()))?;
        return Ok(Box::new(MockRecognizer::new(text)));
    }

    #[cfg(feature = "tesseract")]
    {
        Ok(Box::new(payscan_ocr::TesseractRecognizer::from_config(&config.ocr)))
    }

    #[cfg(not(feature = "tesseract"))]
    {
        let _ = config;
        Err(payscan_ocr::OcrError::NotAvailable.into())
    }
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if input == Path::new("-") {
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
    } else {
        bytes = std::fs::read(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
    }
    Ok(bytes)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainedReport<'a> {
    raw_text: &'a str,
    #[serde(flatten)]
    extracted: &'a ExtractionResult,
    /// The amount as a number, when it parses as one.
    amount_value: Option<Decimal>,
}

fn emit_result(result: &ScanResult, output: &OutputArgs) -> anyhow::Result<()> {
    emit(&result.raw_text, &result.extracted, output)
}

fn emit(raw_text: &str, extracted: &ExtractionResult, output: &OutputArgs) -> anyhow::Result<()> {
    let value = if output.explain {
        let amount_value = extracted.amount.as_ref().and_then(|f| f.value.to_decimal());
        serde_json::to_value(ExplainedReport { raw_text, extracted, amount_value })?
    } else {
        serde_json::to_value(payscan_ocr::ScanReport::new(raw_text, extracted))?
    };
    let json = if output.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;
    Ok(())
}
