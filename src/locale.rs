//! German number formatting (`1.234,5`).
//!
//! Stats on the site are authored in German notation, so intermediate
//! counter frames are rendered the same way through ICU's `de` decimal
//! formatter: `.` groups thousands, `,` separates decimals. The fraction is
//! always padded to the requested number of digits, and rounding is half
//! away from zero.

use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_locale_core::locale;

thread_local! {
    static GERMAN: Option<DecimalFormatter> =
        match DecimalFormatter::try_new(locale!("de").into(), Default::default()) {
            Ok(formatter) => Some(formatter),
            Err(err) => {
                log::warn!("no German decimal data: {err}");
                None
            }
        };
}

/// Round half away from zero to `decimals` places. Values too large to
/// scale have no fractional part left to round.
fn round_half_away(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // No "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Format `value` with exactly `decimals` fractional digits.
pub fn format_number(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let plain = format!(
        "{:.*}",
        usize::from(decimals),
        round_half_away(value, decimals)
    );
    let Ok(decimal) = plain.parse::<Decimal>() else {
        return plain;
    };
    GERMAN.with(|formatter| match formatter {
        Some(formatter) => formatter.format(&decimal).to_string(),
        None => plain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(57.0, 0), "57");
        assert_eq!(format_number(999.0, 0), "999");
    }

    #[test]
    fn grouping() {
        assert_eq!(format_number(1234.0, 0), "1.234");
        assert_eq!(format_number(1234567.0, 0), "1.234.567");
        assert_eq!(format_number(100000.0, 0), "100.000");
    }

    #[test]
    fn one_decimal() {
        assert_eq!(format_number(12.9, 1), "12,9");
        assert_eq!(format_number(12.0, 1), "12,0");
        assert_eq!(format_number(1234.56, 1), "1.234,6");
    }

    #[test]
    fn rounding() {
        assert_eq!(format_number(56.5, 0), "57");
        assert_eq!(format_number(0.4, 0), "0");
        assert_eq!(format_number(0.25, 1), "0,3");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.0, 0), "0");
        assert_eq!(format_number(-0.04, 1), "0,0");
        assert_eq!(format_number(-1500.0, 0), "-1.500");
    }

    #[test]
    fn values_beyond_integer_range_keep_their_digits() {
        // 1e40 is not exactly representable; Rust prints its exact binary value.
        let formatted = format_number(1e40, 0);
        assert!(formatted.starts_with("10.000.000.000.000.000"), "{formatted}");
        assert_eq!(formatted.matches('.').count(), 13);

        let with_fraction = format_number(9.99e38, 1);
        assert!(with_fraction.ends_with(",0"), "{with_fraction}");
        let back: f64 = with_fraction.replace('.', "").replace(',', ".").parse().unwrap();
        assert!((back / 9.99e38 - 1.0).abs() < 1e-12, "{with_fraction}");
    }
}
