//! Lenient money amounts for page and grand totals.
//!
//! Amounts are held as whole paise so that summing per page and then
//! across pages gives exactly the same result as summing every entry.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_paise(paise: i64) -> Self {
        Amount(paise)
    }

    /// Parse the decimal rupee value a rate starts with, ignoring whatever
    /// follows it (`12abc` is 12, `1,000` is 1). Text with no leading
    /// number, or one that overflows, counts as zero; this never fails.
    pub fn parse_lenient(raw: &str) -> Self {
        let Some(m) = leading_number().find(raw.trim_start()) else {
            return Amount::ZERO;
        };
        match m.as_str().parse::<f64>() {
            Ok(v) if v.is_finite() => Amount((v * 100.0).round() as i64),
            _ => Amount::ZERO,
        }
    }
}

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid number pattern")
    })
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
    }
}

impl From<Amount> for String {
    fn from(a: Amount) -> String {
        a.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fractional_values() {
        assert_eq!(Amount::parse_lenient("625"), Amount::from_paise(62_500));
        assert_eq!(Amount::parse_lenient(" 12.5 "), Amount::from_paise(1_250));
        assert_eq!(Amount::parse_lenient("0.125"), Amount::from_paise(13));
    }

    #[test]
    fn text_without_a_leading_number_counts_as_zero() {
        for raw in ["", "   ", "abc", "Rs. 625", "NaN", "inf", "-inf", "Infinity", ".", "-", "1e999"] {
            assert_eq!(Amount::parse_lenient(raw), Amount::ZERO, "{raw:?}");
        }
    }

    #[test]
    fn trailing_text_after_a_number_is_ignored() {
        assert_eq!(Amount::parse_lenient("12abc"), Amount::from_paise(1_200));
        assert_eq!(Amount::parse_lenient("1,000"), Amount::from_paise(100));
        assert_eq!(Amount::parse_lenient("625/-"), Amount::from_paise(62_500));
        assert_eq!(Amount::parse_lenient(" 12.50 Rs"), Amount::from_paise(1_250));
        assert_eq!(Amount::parse_lenient("3."), Amount::from_paise(300));
        assert_eq!(Amount::parse_lenient(".5x"), Amount::from_paise(50));
        assert_eq!(Amount::parse_lenient("-40 refund"), Amount::from_paise(-4_000));
        assert_eq!(Amount::parse_lenient("1e3"), Amount::from_paise(100_000));
        assert_eq!(Amount::parse_lenient("2e"), Amount::from_paise(200));
    }

    #[test]
    fn display_has_two_decimals() {
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!(Amount::from_paise(130_000).to_string(), "1300.00");
        assert_eq!(Amount::from_paise(-5).to_string(), "-0.05");
    }

    #[test]
    fn sums_are_exact() {
        let total: Amount = ["0.1", "0.2", "0.3"]
            .iter()
            .map(|r| Amount::parse_lenient(r))
            .sum();
        assert_eq!(total.to_string(), "0.60");
    }
}
