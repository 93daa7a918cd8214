use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend could not read image: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available: build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept PNG bytes (as produced by
/// [`crate::preprocess::prepare_for_ocr_from_bytes`]) and return the
/// recognized text, lines separated by `\n`.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

impl<T: OcrBackend + ?Sized> OcrBackend for Arc<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string, or a pre-set engine failure, for any image.
pub struct MockRecognizer {
    outcome: Result<String, String>,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { outcome: Ok(text.into()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        self.outcome.clone().map_err(OcrError::Engine)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;
    use payscan_core::OcrConfig;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }

        pub fn from_config(config: &OcrConfig) -> Self {
            let data_path = config
                .tessdata_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned());
            Self::new(data_path, &config.language)
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            // LepTess is not Sync, so each call gets its own engine.
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("To BAGAVATH MISSION\n₹500\nCompleted");
        assert_eq!(
            r.recognize(b"fake image data").unwrap(),
            "To BAGAVATH MISSION\n₹500\nCompleted"
        );
    }

    #[test]
    fn mock_failure_is_engine_error() {
        let r = MockRecognizer::failing("model not loaded");
        let err = r.recognize(b"anything").unwrap_err();
        assert!(matches!(err, OcrError::Engine(ref m) if m == "model not loaded"));
    }

    #[test]
    fn boxed_and_shared_backends_delegate() {
        let boxed: Box<dyn OcrBackend> = Box::new(MockRecognizer::new("boxed"));
        assert_eq!(boxed.recognize(b"").unwrap(), "boxed");

        let shared = Arc::new(MockRecognizer::new("shared"));
        assert_eq!(shared.recognize(b"").unwrap(), "shared");
    }
}
