//! Amount cascade.
//!
//! Tiers, in order:
//! 1. `currency_marked`: `₹`, `Rs`/`Rs.` or `INR` followed by a numeral, over the
//!    whole text. `I`, `l` and `|` inside the numeral are read as `1`.
//! 2. `contextual_keyword`: `Paid` or `Amount` followed by a numeral.
//! 3. `lonely_unit_line`: a line that is nothing but an optional currency
//!    marker and a single glyph that looks like `1`.
//! 4. `stripped_line_numeral`: the first low-noise line whose stripped numeral
//!    has an amount shape (see [`LINE_SHAPES`]).

use payscan_core::Amount;
use tracing::trace;

use super::normalize::{lines, replace_one_lookalikes, ScannedLine};
use super::rules::Rule;

re!(re_currency_marked,
    r"(?i:₹|Rs\.?|INR)\s*([0-9,Il|]+\.?[0-9]*)");
re!(re_contextual_keyword,
    r"(?i:Paid|Amount)\s*[:\-]?\s*([0-9,]+\.?[0-9]*)");
re!(re_lonely_unit,
    r"^(?i:₹|Rs\.?|INR)?\s*[1Il|!]\s*$");
re!(re_glyph_one_run,
    r"^[Il|!]+$");
re!(re_grouped_thousands,
    r"^[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?$");
re!(re_strict_decimal,
    r"^[0-9]+\.[0-9]+$");
re!(re_short_integer,
    r"^[0-9]{1,3}$");

pub static AMOUNT_RULES: [Rule<Amount>; 4] = [
    Rule::new("currency_marked", 0.95, currency_marked),
    Rule::new("contextual_keyword", 0.85, contextual_keyword),
    Rule::new("lonely_unit_line", 0.70, lonely_unit_line),
    Rule::new("stripped_line_numeral", 0.60, stripped_line_numeral),
];

fn unit() -> Amount {
    Amount::from_grouped("1")
}

// ── Whole-text tiers ──────────────────────────────────────────────────────────

pub fn currency_marked(text: &str) -> Option<Amount> {
    re_currency_marked()
        .captures_iter(text)
        .map(|c| Amount::from_grouped(&replace_one_lookalikes(&c[1])))
        .find(Amount::has_digits)
}

pub fn contextual_keyword(text: &str) -> Option<Amount> {
    re_contextual_keyword()
        .captures_iter(text)
        .map(|c| Amount::from_grouped(&c[1]))
        .find(Amount::has_digits)
}

// ── Line tiers ────────────────────────────────────────────────────────────────

/// A bare `₹1` is often recognized as a lone `I` or `l`, sometimes with the
/// rupee sign lost. On its own line that glyph is the amount.
pub fn lonely_unit_line(text: &str) -> Option<Amount> {
    lines(text)
        .map(str::trim)
        .any(|line| re_lonely_unit().is_match(line))
        .then(unit)
}

pub fn stripped_line_numeral(text: &str) -> Option<Amount> {
    lines(text)
        .map(ScannedLine::new)
        .filter(|line| {
            trace!(
                line = line.trimmed,
                stripped = line.stripped,
                noise = line.noise,
                "amount line scan"
            );
            !line.is_noisy()
        })
        .find_map(|line| LINE_SHAPES.iter().find_map(|shape| shape(&line)))
}

/// Shapes a low-noise line may take, tried in order.
pub(crate) const LINE_SHAPES: [fn(&ScannedLine<'_>) -> Option<Amount>; 4] =
    [glyph_one_run, grouped_thousands, strict_decimal, short_integer];

/// No digits at all, but the line is made of `1` look-alikes.
fn glyph_one_run(line: &ScannedLine<'_>) -> Option<Amount> {
    (line.stripped.is_empty() && re_glyph_one_run().is_match(line.trimmed)).then(unit)
}

/// `1,000`, `4,500`, `12,345.00`.
fn grouped_thousands(line: &ScannedLine<'_>) -> Option<Amount> {
    re_grouped_thousands()
        .is_match(line.stripped)
        .then(|| Amount::from_grouped(line.stripped))
}

/// `4500.00`, `1.0`.
fn strict_decimal(line: &ScannedLine<'_>) -> Option<Amount> {
    re_strict_decimal()
        .is_match(line.stripped)
        .then(|| Amount::from_grouped(line.stripped))
}

/// Up to three digits. Longer bare integers are phone numbers, card tails,
/// years and clock times far more often than they are amounts.
fn short_integer(line: &ScannedLine<'_>) -> Option<Amount> {
    re_short_integer()
        .is_match(line.stripped)
        .then(|| Amount::from_grouped(line.stripped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(a: Option<Amount>) -> Option<String> {
        a.map(Amount::into_inner)
    }

    // ── currency_marked ───────────────────────────────────────────────────────

    #[test]
    fn currency_marked_variants() {
        assert_eq!(s(currency_marked("₹500")).as_deref(), Some("500"));
        assert_eq!(s(currency_marked("₹ 500")).as_deref(), Some("500"));
        assert_eq!(s(currency_marked("Rs 250")).as_deref(), Some("250"));
        assert_eq!(s(currency_marked("Rs. 1,200.50")).as_deref(), Some("1200.50"));
        assert_eq!(s(currency_marked("INR 3,000")).as_deref(), Some("3000"));
        assert_eq!(s(currency_marked("inr 75")).as_deref(), Some("75"));
        assert_eq!(s(currency_marked("RS.99")).as_deref(), Some("99"));
    }

    #[test]
    fn currency_marked_repairs_lookalike_ones() {
        assert_eq!(s(currency_marked("₹ I")).as_deref(), Some("1"));
        assert_eq!(s(currency_marked("₹l0")).as_deref(), Some("10"));
        assert_eq!(s(currency_marked("₹|,I00")).as_deref(), Some("1100"));
    }

    #[test]
    fn currency_marked_lowercase_lookalikes_are_not_digits() {
        // Only the uppercase I is a look-alike; "₹ i" is not an amount.
        assert_eq!(currency_marked("₹ i"), None);
    }

    #[test]
    fn currency_marked_skips_separator_only_capture() {
        assert_eq!(s(currency_marked("INR ,\nthen ₹40")).as_deref(), Some("40"));
        assert_eq!(currency_marked("₹ ,"), None);
    }

    #[test]
    fn currency_marked_first_occurrence_wins() {
        assert_eq!(s(currency_marked("₹120\n₹5,000")).as_deref(), Some("120"));
    }

    // ── contextual_keyword ────────────────────────────────────────────────────

    #[test]
    fn contextual_keyword_variants() {
        assert_eq!(s(contextual_keyword("Paid: 750")).as_deref(), Some("750"));
        assert_eq!(s(contextual_keyword("Amount - 1,500.75")).as_deref(), Some("1500.75"));
        assert_eq!(s(contextual_keyword("AMOUNT 42")).as_deref(), Some("42"));
        assert_eq!(s(contextual_keyword("paid 9999")).as_deref(), Some("9999"));
    }

    #[test]
    fn contextual_keyword_needs_a_numeral() {
        assert_eq!(contextual_keyword("Paid to BAGAVATH MISSION"), None);
        assert_eq!(contextual_keyword("Amount: ,"), None);
    }

    // ── lonely_unit_line ──────────────────────────────────────────────────────

    #[test]
    fn lonely_unit_line_glyphs() {
        for text in ["1", "I", "l", "|", "!", "₹1", "₹ I", "Rs 1", "Rs. l", "INR |", "  !  "] {
            assert_eq!(s(lonely_unit_line(text)).as_deref(), Some("1"), "text {text:?}");
        }
    }

    #[test]
    fn lonely_unit_line_rejects_longer_lines() {
        assert_eq!(lonely_unit_line("II"), None);
        assert_eq!(lonely_unit_line("₹ 10"), None);
        assert_eq!(lonely_unit_line("I paid"), None);
    }

    #[test]
    fn lonely_unit_line_glyphs_are_case_sensitive() {
        // Only the marker ignores case. `i` and `L` are never read as 1.
        assert_eq!(lonely_unit_line("i"), None);
        assert_eq!(lonely_unit_line("L"), None);
        assert_eq!(lonely_unit_line("rs. i"), None);
        assert_eq!(s(lonely_unit_line("rs. l")).as_deref(), Some("1"));
    }

    #[test]
    fn lonely_unit_line_finds_line_among_others() {
        assert_eq!(
            s(lonely_unit_line("Payment successful\nl\nBAGAVATH MISSION")).as_deref(),
            Some("1")
        );
    }

    // ── stripped_line_numeral ─────────────────────────────────────────────────

    #[test]
    fn stripped_line_grouped_thousands() {
        assert_eq!(s(stripped_line_numeral("? 4,500")).as_deref(), Some("4500"));
        assert_eq!(s(stripped_line_numeral("12,345.00 /-")).as_deref(), Some("12345.00"));
    }

    #[test]
    fn stripped_line_strict_decimal() {
        assert_eq!(s(stripped_line_numeral("4500.00")).as_deref(), Some("4500.00"));
        assert_eq!(s(stripped_line_numeral("Sum 1.0")).as_deref(), Some("1.0"));
    }

    #[test]
    fn stripped_line_short_integer() {
        assert_eq!(s(stripped_line_numeral("Sent 250")).as_deref(), Some("250"));
        assert_eq!(s(stripped_line_numeral("7")).as_deref(), Some("7"));
    }

    #[test]
    fn stripped_line_rejects_long_bare_integers() {
        assert_eq!(stripped_line_numeral("4505"), None);
        assert_eq!(stripped_line_numeral("9876543210"), None);
        assert_eq!(stripped_line_numeral("2024"), None);
    }

    #[test]
    fn stripped_line_rejects_times_and_indian_grouping() {
        assert_eq!(stripped_line_numeral("7:27 pm"), None);
        assert_eq!(stripped_line_numeral("1,00,000"), None);
    }

    #[test]
    fn stripped_line_skips_prose() {
        assert_eq!(stripped_line_numeral("Your payment of 250 was received"), None);
        assert_eq!(
            s(stripped_line_numeral("Your payment of 250 was received\n80")).as_deref(),
            Some("80")
        );
    }

    #[test]
    fn stripped_line_glyph_run_reads_as_one() {
        assert_eq!(s(stripped_line_numeral("||")).as_deref(), Some("1"));
        assert_eq!(s(stripped_line_numeral("Il!")).as_deref(), Some("1"));
    }

    #[test]
    fn stripped_line_first_acceptable_line_wins() {
        let text = "9:41\nBAGAVATH MISSION\n4505\n35\n1,000";
        assert_eq!(s(stripped_line_numeral(text)).as_deref(), Some("35"));
    }

    #[test]
    fn stripped_line_ignores_blank_lines() {
        assert_eq!(stripped_line_numeral("\n\n   \n"), None);
    }

    // ── Table ─────────────────────────────────────────────────────────────────

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<&str> = AMOUNT_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["currency_marked", "contextual_keyword", "lonely_unit_line", "stripped_line_numeral"]
        );
    }

    #[test]
    fn keyword_beats_line_scan() {
        let hit = crate::extract::first_match(&AMOUNT_RULES, "35\nAmount: 1,999").unwrap();
        assert_eq!(hit.value, "1999");
        assert_eq!(hit.rule, "contextual_keyword");
    }

    #[test]
    fn currency_marker_beats_earlier_keyword() {
        let hit = crate::extract::first_match(&AMOUNT_RULES, "Paid 750\n₹500").unwrap();
        assert_eq!(hit.value, "500");
        assert_eq!(hit.rule, "currency_marked");
    }

    #[test]
    fn lonely_unit_beats_earlier_numeral_line() {
        let hit = crate::extract::first_match(&AMOUNT_RULES, "35\nl").unwrap();
        assert_eq!(hit.value, "1");
        assert_eq!(hit.rule, "lonely_unit_line");
    }
}
