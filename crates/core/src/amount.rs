use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A payment amount as read off a screenshot: digits with at most one decimal
/// point, grouping commas removed, no currency symbol.
///
/// The value stays a string. Turning it into a number (and deciding whether
/// `"0"` or `"999999.999"` is plausible) is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Strip grouping commas from a numeral that is already known to be
    /// digits, commas and an optional decimal tail.
    pub fn from_grouped(numeral: &str) -> Self {
        Amount(numeral.replace(',', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the value carries at least one digit.
    pub fn has_digits(&self) -> bool {
        self.0.bytes().any(|b| b.is_ascii_digit())
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(&self.0).ok()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Amount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Amount {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_grouped_strips_commas() {
        assert_eq!(Amount::from_grouped("1,200.50"), "1200.50");
        assert_eq!(Amount::from_grouped("12,34,567"), "1234567");
        assert_eq!(Amount::from_grouped("750"), "750");
    }

    #[test]
    fn has_digits_rejects_separator_only_values() {
        assert!(!Amount::from_grouped(",,").has_digits());
        assert!(!Amount::from_grouped(".").has_digits());
        assert!(Amount::from_grouped("1").has_digits());
    }

    #[test]
    fn to_decimal_parses_normalized_value() {
        let a = Amount::from_grouped("1,200.50");
        assert_eq!(a.to_decimal(), Some(Decimal::from_str("1200.50").unwrap()));
        assert_eq!(Amount::from_grouped("1.2.3").to_decimal(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Amount::from_grouped("4,500")).unwrap();
        assert_eq!(json, "\"4500\"");
    }
}
