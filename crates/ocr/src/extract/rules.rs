use crate::types::ExtractedField;

/// One tier of an extraction cascade: a named, pure matcher over the whole
/// recognized text.
pub struct Rule<T> {
    pub name: &'static str,
    pub confidence: f32,
    matcher: fn(&str) -> Option<T>,
}

impl<T> Rule<T> {
    pub const fn new(name: &'static str, confidence: f32, matcher: fn(&str) -> Option<T>) -> Self {
        Self { name, confidence, matcher }
    }

    pub fn apply(&self, text: &str) -> Option<T> {
        (self.matcher)(text)
    }
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("confidence", &self.confidence)
            .finish()
    }
}

/// Run `rules` in order and return the first value any of them produces.
pub fn first_match<T>(rules: &[Rule<T>], text: &str) -> Option<ExtractedField<T>> {
    rules.iter().find_map(|rule| {
        let value = rule.apply(text)?;
        tracing::debug!(rule = rule.name, "extraction rule matched");
        Some(ExtractedField::new(value, rule.name, rule.confidence))
    })
}
