//! Transaction-ID cascade: labels used by specific payment apps first, then
//! the generic "Transaction ID" label. The label and the ID may sit on
//! different lines. The ID is returned exactly as recognized.

use super::rules::Rule;

re!(re_payment_app_label,
    r"(?i:Google transaction ID|UPI transaction ID|UPI Ref\.? No\.|Ref No\.)\s*[:\-]?\s*([a-zA-Z0-9]+)");
re!(re_generic_label,
    r"(?i:Transaction ID)\s*[:\-]?\s*([a-zA-Z0-9]+)");

pub static TRANSACTION_ID_RULES: [Rule<String>; 2] = [
    Rule::new("payment_app_label", 0.90, payment_app_label),
    Rule::new("generic_label", 0.75, generic_label),
];

pub fn payment_app_label(text: &str) -> Option<String> {
    capture_id(re_payment_app_label(), text)
}

pub fn generic_label(text: &str) -> Option<String> {
    capture_id(re_generic_label(), text)
}

fn capture_id(re: &regex::Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}
