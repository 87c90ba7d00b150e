//! Parsing of human-written statistics like `12,9 Mio.` or `57%`.
//!
//! Stat elements on the site carry their final value as authored text. To
//! count up to it we need the number, the text around it, and how many
//! decimals to show while counting. Parsing runs in two stages:
//!
//! 1. [`tokenize`] finds the first run of digits, commas and periods and
//!    splits the text into the token and everything else.
//! 2. [`interpret`] turns the token into a number: the first comma becomes a
//!    decimal point, and a comma anywhere in the token means one decimal
//!    place.
//!
//! ## Examples
//!
//! - `"12,9 Mio."` → value `12.9`, suffix `"Mio."`, 1 decimal
//! - `"57%"` → value `57`, suffix `"%"`, 0 decimals
//! - `"1.234"` → value `1.234`, suffix `""`, 0 decimals (period is not a
//!   thousands separator here; the authored text is restored at the end)
//! - `"N/A"` → no match
//!
//! Only the first numeric run counts. In `"10 of 20"` the token is `10` and
//! the suffix is `"of 20"`.

use serde::Serialize;

/// A statistic split into its numeric value and surrounding text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedStat {
    /// Numeric magnitude of the first numeric token.
    pub value: f64,
    /// Text outside the token (before and after, joined), trimmed.
    pub suffix: String,
    /// Digits after the decimal separator while counting: 1 when the token
    /// contained a comma, 0 otherwise.
    pub decimal_places: u8,
    /// The source text, untouched. Displayed verbatim once counting ends.
    pub original: String,
}

/// First numeric run found in a stat string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatToken<'a> {
    /// Text before the run.
    pub before: &'a str,
    /// The run of digits, commas and periods (contains at least one digit).
    pub number: &'a str,
    /// Text after the run.
    pub after: &'a str,
}

impl StatToken<'_> {
    /// Everything outside the numeric run, trimmed.
    pub fn suffix(&self) -> String {
        format!("{}{}", self.before, self.after).trim().to_string()
    }

    /// Whether the token uses a decimal comma.
    pub fn has_decimal_comma(&self) -> bool {
        self.number.contains(',')
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

/// Find the first maximal run of `[0-9,.]` that contains a digit.
///
/// Runs made only of punctuation (the period in `"ca."`, a lone comma) are
/// skipped and stay part of the surrounding text.
pub fn tokenize(text: &str) -> Option<StatToken<'_>> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if !is_number_char(bytes[pos] as char) {
            pos += 1;
            continue;
        }
        let start = pos;
        while pos < bytes.len() && is_number_char(bytes[pos] as char) {
            pos += 1;
        }
        let run = &text[start..pos];
        if run.bytes().any(|b| b.is_ascii_digit()) {
            return Some(StatToken {
                before: &text[..start],
                number: run,
                after: &text[pos..],
            });
        }
    }
    None
}

/// Convert a numeric token to a float.
///
/// The first comma is read as a decimal point. Conversion then takes the
/// longest leading `digits[.digits]` prefix, so `"1.234,5"` reads as
/// `1.234`. Returns `None` when no digits lead the prefix (e.g. `".,5"`).
pub fn token_value(number: &str) -> Option<f64> {
    let normalized = number.replacen(',', ".", 1);
    let bytes = normalized.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end;
    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - end - 1;
        end = frac_end;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    let prefix = normalized[..end].trim_end_matches('.');
    let prefix = if prefix.starts_with('.') {
        format!("0{prefix}")
    } else {
        prefix.to_string()
    };
    prefix.parse::<f64>().ok()
}

/// Build a [`ParsedStat`] from a token found in `original`.
pub fn interpret(token: &StatToken<'_>, original: &str) -> Option<ParsedStat> {
    let value = token_value(token.number)?;
    Some(ParsedStat {
        value,
        suffix: token.suffix(),
        decimal_places: if token.has_decimal_comma() { 1 } else { 0 },
        original: original.to_string(),
    })
}

/// Parse a stat display string. `None` means there is nothing to animate.
pub fn parse_stat_value(text: &str) -> Option<ParsedStat> {
    let token = tokenize(text)?;
    interpret(&token, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decimal_comma_with_unit() {
        let p = parse_stat_value("12,9 Mio.").unwrap();
        assert_eq!(p.value, 12.9);
        assert_eq!(p.suffix, "Mio.");
        assert_eq!(p.decimal_places, 1);
        assert_eq!(p.original, "12,9 Mio.");
    }

    #[test]
    fn integer_percent() {
        let p = parse_stat_value("57%").unwrap();
        assert_eq!(p.value, 57.0);
        assert_eq!(p.suffix, "%");
        assert_eq!(p.decimal_places, 0);
    }

    #[test]
    fn no_digits_is_no_match() {
        assert_eq!(parse_stat_value("N/A"), None);
        assert_eq!(parse_stat_value(""), None);
        assert_eq!(parse_stat_value("..., ,"), None);
    }

    #[test]
    fn period_reads_as_decimal_point() {
        let p = parse_stat_value("1.234").unwrap();
        assert_eq!(p.value, 1.234);
        assert_eq!(p.decimal_places, 0);
        assert_eq!(p.suffix, "");
    }

    #[test]
    fn only_first_comma_becomes_decimal_point() {
        assert_eq!(token_value("1,2,3"), Some(1.2));
        assert_eq!(token_value("1.234,5"), Some(1.234));
    }

    #[test]
    fn leading_separator() {
        assert_eq!(token_value(",5"), Some(0.5));
        assert_eq!(token_value(".,5"), None);
        assert_eq!(token_value("5."), Some(5.0));
    }

    #[test]
    fn tokenize_splits_around_first_run() {
        let t = tokenize("über 250 Kunden").unwrap();
        assert_eq!(t.before, "über ");
        assert_eq!(t.number, "250");
        assert_eq!(t.after, " Kunden");
        assert_eq!(t.suffix(), "über  Kunden");
    }

    #[test]
    fn punctuation_only_runs_are_skipped() {
        let t = tokenize("ca. 57%").unwrap();
        assert_eq!(t.number, "57");
        assert_eq!(t.suffix(), "ca. %");
    }

    #[test]
    fn second_number_stays_in_suffix() {
        let p = parse_stat_value("10 of 20").unwrap();
        assert_eq!(p.value, 10.0);
        assert_eq!(p.suffix, "of 20");
    }

    #[test]
    fn comma_presence_decides_precision() {
        let with = tokenize("3,0 h").unwrap();
        let without = tokenize("3.0 h").unwrap();
        assert!(with.has_decimal_comma());
        assert!(!without.has_decimal_comma());
        assert_eq!(interpret(&with, "3,0 h").unwrap().decimal_places, 1);
        assert_eq!(interpret(&without, "3.0 h").unwrap().decimal_places, 0);
    }

    #[test]
    fn suffix_is_trimmed() {
        let p = parse_stat_value("  42   Projekte  ").unwrap();
        assert_eq!(p.suffix, "Projekte");
        assert_eq!(p.original, "  42   Projekte  ");
    }

    proptest! {
        #[test]
        fn prop_integers_parse_exactly(n in 0u32..1_000_000, unit in "[a-zA-Z%]{0,6}") {
            let text = format!("{n} {unit}");
            let p = parse_stat_value(&text).unwrap();
            prop_assert_eq!(p.value, n as f64);
            prop_assert_eq!(p.decimal_places, 0);
            prop_assert_eq!(p.suffix, unit.trim().to_string());
            prop_assert_eq!(p.original, text);
        }

        #[test]
        fn prop_text_without_digits_never_matches(s in "[^0-9]{0,30}") {
            prop_assert_eq!(parse_stat_value(&s), None);
        }
    }
}
