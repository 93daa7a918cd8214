//! Line-level helpers shared by the amount rules.

/// Glyphs OCR engines return in place of the digit `1` inside a numeral.
pub(crate) const ONE_LOOKALIKES: [char; 3] = ['I', 'l', '|'];

/// A line with more than this many non-digit characters around its numeral
/// is treated as prose that happens to contain a number.
pub(crate) const NOISE_THRESHOLD: usize = 10;

/// Split recognized text into lines. Only `\n` separates lines; a trailing
/// `\r` is removed by the per-line trim.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

pub(crate) fn replace_one_lookalikes(numeral: &str) -> String {
    numeral
        .chars()
        .map(|c| if ONE_LOOKALIKES.contains(&c) { '1' } else { c })
        .collect()
}

/// Drop every non-digit character before the first digit and after the last
/// one. Interior punctuation (`,` `.` `:`) is kept.
pub(crate) fn strip_non_digit_ends(line: &str) -> &str {
    line.trim_matches(|c: char| !c.is_ascii_digit())
}

/// A trimmed line together with its stripped numeral and noise score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScannedLine<'a> {
    pub trimmed: &'a str,
    pub stripped: &'a str,
    /// Characters removed from the ends of `trimmed` to get `stripped`.
    pub noise: usize,
}

impl<'a> ScannedLine<'a> {
    pub fn new(line: &'a str) -> Self {
        let trimmed = line.trim();
        let stripped = strip_non_digit_ends(trimmed);
        let noise = trimmed.chars().count() - stripped.chars().count();
        Self { trimmed, stripped, noise }
    }

    pub fn is_noisy(&self) -> bool {
        self.noise > NOISE_THRESHOLD
    }
}
