use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::extract::Extractor;
use crate::preprocess::{self, PreprocessError, PreprocessOptions};
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::{ExtractionResult, ScanReport};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode failed: {0}")]
    DecodeFailed(#[source] PreprocessError),
    #[error("Could not prepare image for OCR: {0}")]
    PrepareFailed(#[source] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    RecognitionFailed(#[from] OcrError),
    #[error("Scan worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<PreprocessError> for ScanError {
    /// Only undecodable input counts as a decode failure.
    fn from(err: PreprocessError) -> Self {
        match err {
            PreprocessError::Decode(_) => Self::DecodeFailed(err),
            PreprocessError::Encode(_) => Self::PrepareFailed(err),
        }
    }
}

/// The result of one successful scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Text exactly as the backend recognized it.
    pub raw_text: String,
    pub extracted: ExtractionResult,
}

impl ScanResult {
    pub fn report(&self) -> ScanReport {
        ScanReport::new(self.raw_text.clone(), &self.extracted)
    }
}

/// Orchestrates: decode → normalize → OCR → extract.
///
/// Decode and recognition run on the blocking pool. Extraction runs once per
/// successful recognition and never after a failure.
pub struct ScanPipeline<R: OcrBackend> {
    recognizer: Arc<R>,
    options: PreprocessOptions,
}

impl<R: OcrBackend + 'static> ScanPipeline<R> {
    pub fn new(recognizer: R, options: PreprocessOptions) -> Self {
        Self { recognizer: Arc::new(recognizer), options }
    }

    /// Scan an image file on disk.
    pub async fn scan_file(&self, path: &Path) -> Result<ScanResult, ScanError> {
        let bytes = tokio::fs::read(path).await?;
        self.scan_bytes(bytes).await
    }

    /// Scan a base64-encoded image. Whitespace (line-wrapped encoders) and a
    /// leading `data:image/...;base64,` prefix are tolerated.
    pub async fn scan_base64(&self, encoded: &str) -> Result<ScanResult, ScanError> {
        let payload = strip_data_url(encoded.trim());
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if compact.is_empty() {
            return Err(ScanError::InvalidArgument("No image provided".to_string()));
        }
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| ScanError::InvalidArgument(format!("Image is not valid base64: {e}")))?;
        self.scan_bytes(bytes).await
    }

    /// Scan raw encoded image bytes (PNG / JPEG / …).
    pub async fn scan_bytes(&self, data: Vec<u8>) -> Result<ScanResult, ScanError> {
        if data.is_empty() {
            return Err(ScanError::InvalidArgument("No image provided".to_string()));
        }

        let recognizer = Arc::clone(&self.recognizer);
        let options = self.options;
        let raw_text = tokio::task::spawn_blocking(move || -> Result<String, ScanError> {
            let image_bytes = preprocess::prepare_for_ocr_from_bytes(&data, &options)?;
            Ok(recognizer.recognize(&image_bytes)?)
        })
        .await??;

        debug!(raw_text = %raw_text, "recognized text");
        let extracted = Extractor::extract(&raw_text);
        Ok(ScanResult { raw_text, extracted })
    }
}

fn strip_data_url(encoded: &str) -> &str {
    match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
