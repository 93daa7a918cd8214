pub mod extract;
pub mod handoff;
pub mod intake;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod types;

pub use extract::{ExtractError, Extractor, Rule};
pub use handoff::SharedImageSlot;
pub use intake::{receive_shared_file, spawn_share_receiver, SHARE_QUEUE_CAPACITY};
pub use pipeline::{ScanError, ScanPipeline, ScanResult};
pub use preprocess::{prepare_for_ocr_from_bytes, PreprocessError, PreprocessOptions};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
pub use types::{ExtractedField, ExtractionResult, ScanReport};
