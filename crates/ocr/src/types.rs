use payscan_core::Amount;
use serde::Serialize;

/// A single extracted value, tagged with the rule that produced it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtractedField<T> {
    pub value: T,
    /// Name of the cascade rule that matched.
    pub rule: &'static str,
    /// Fixed confidence of that rule (0.0 = guessed, 1.0 = certain).
    pub confidence: f32,
}

impl<T> ExtractedField<T> {
    pub fn new(value: T, rule: &'static str, confidence: f32) -> Self {
        Self { value, rule, confidence: confidence.clamp(0.0, 1.0) }
    }
}

/// Fields recovered from one block of recognized text.
/// Either side may be absent; that is the common case, not an error.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub amount: Option<ExtractedField<Amount>>,
    pub transaction_id: Option<ExtractedField<String>>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.transaction_id.is_none()
    }

    pub fn amount_str(&self) -> Option<&str> {
        self.amount.as_ref().map(|f| f.value.as_str())
    }

    pub fn transaction_id_str(&self) -> Option<&str> {
        self.transaction_id.as_ref().map(|f| f.value.as_str())
    }
}

/// What a scan hands back to its consumer: the two fields plus the raw text
/// for diagnostics.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub raw_text: String,
    pub amount: Option<String>,
    pub transaction_id: Option<String>,
}

impl ScanReport {
    pub fn new(raw_text: impl Into<String>, extracted: &ExtractionResult) -> Self {
        Self {
            raw_text: raw_text.into(),
            amount: extracted.amount_str().map(str::to_string),
            transaction_id: extracted.transaction_id_str().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_field_clamps_confidence() {
        let f = ExtractedField::new("x", "test", 1.5);
        assert_eq!(f.confidence, 1.0);
        let f = ExtractedField::new("x", "test", -0.1);
        assert_eq!(f.confidence, 0.0);
    }

    #[test]
    fn default_result_is_empty() {
        let r = ExtractionResult::default();
        assert!(r.is_empty());
        assert_eq!(r.amount_str(), None);
        assert_eq!(r.transaction_id_str(), None);
    }

    #[test]
    fn report_uses_camel_case_keys_and_nulls() {
        let r = ExtractionResult {
            amount: Some(ExtractedField::new(Amount::from_grouped("500"), "currency_marked", 0.95)),
            transaction_id: None,
        };
        let json = serde_json::to_value(ScanReport::new("₹500", &r)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "rawText": "₹500", "amount": "500", "transactionId": null })
        );
    }
}
