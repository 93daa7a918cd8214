//! Field extraction from recognized payment-screenshot text.
//!
//! Each field is recovered by an ordered cascade of named [`Rule`]s. The first
//! rule that produces a value wins; later rules are never consulted. Nothing
//! here does I/O or keeps state, so the same text always yields the same
//! result.

use payscan_core::Amount;
use thiserror::Error;

use crate::types::{ExtractedField, ExtractionResult};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod amount;
mod normalize;
pub mod rules;
pub mod transaction_id;

pub use amount::AMOUNT_RULES;
pub use rules::{first_match, Rule};
pub use transaction_id::TRANSACTION_ID_RULES;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Recognized text must be valid UTF-8: {0}")]
    InvalidText(#[from] std::str::Utf8Error),
}

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Extract the payment amount and transaction ID from raw OCR text.
    pub fn extract(ocr_text: &str) -> ExtractionResult {
        ExtractionResult {
            amount: Self::extract_amount(ocr_text),
            transaction_id: Self::extract_transaction_id(ocr_text),
        }
    }

    pub fn extract_amount(ocr_text: &str) -> Option<ExtractedField<Amount>> {
        first_match(&AMOUNT_RULES, ocr_text)
    }

    pub fn extract_transaction_id(ocr_text: &str) -> Option<ExtractedField<String>> {
        first_match(&TRANSACTION_ID_RULES, ocr_text)
    }

    /// Like [`Extractor::extract`], for callers holding undecoded bytes.
    /// Anything that is not UTF-8 text is rejected up front.
    pub fn extract_utf8(ocr_bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
        let text = std::str::from_utf8(ocr_bytes)?;
        Ok(Self::extract(text))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
