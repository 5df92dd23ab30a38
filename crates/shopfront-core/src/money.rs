//! Whole-unit currency amounts and their rendered text form.
//!
//! Storefront prices are whole VND, so an [`Amount`] is a plain count of
//! the smallest currency unit. The server may send amounts as JSON numbers
//! or as decimal strings (`"150000.00"`); both deserialize, rounded half
//! away from zero. Rendered text uses `,` as the thousands separator and a
//! trailing currency label: `"450,000 VND"`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_CURRENCY_LABEL: &str = "VND";

/// Digits with optional comma grouping, followed by an optional
/// alphabetic currency label.
static RENDERED_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,3}(?:,\d{3})+|\d+)\s*\p{L}*\s*$").expect("valid regex")
});

/// A non-negative amount in the smallest currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[must_use]
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    #[must_use]
    pub const fn units(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn times(self, quantity: u32) -> Amount {
        Amount(self.0.saturating_mul(u64::from(quantity)))
    }

    #[must_use]
    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    /// Renders the amount with grouped thousands and a currency label,
    /// e.g. `"450,000 VND"`.
    #[must_use]
    pub fn display(self, currency_label: &str) -> String {
        let grouped = group_thousands(self.0);
        if currency_label.is_empty() {
            grouped
        } else {
            format!("{grouped} {currency_label}")
        }
    }

    /// Converts a decimal value to whole units.
    ///
    /// Returns `None` for negative values or values beyond `u64`.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Amount> {
        let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            return None;
        }
        rounded.to_u64().map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Amount(units)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Amount::saturating_add)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decimal = deserialize_decimal(deserializer)?;
        Amount::from_decimal(decimal)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {decimal}")))
    }
}

/// Reads a JSON number or decimal string (`"10.00"`) as a [`Decimal`].
///
/// Django serialises `DecimalField` values as strings, while computed values
/// arrive as plain numbers.
///
/// # Errors
///
/// Fails when the value is neither a number nor a parseable decimal string.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    match RawNumber::deserialize(deserializer)? {
        RawNumber::Unsigned(n) => Ok(Decimal::from(n)),
        RawNumber::Signed(n) => Ok(Decimal::from(n)),
        RawNumber::Float(value) => Decimal::try_from(value)
            .map_err(|e| serde::de::Error::custom(format!("invalid number {value}: {e}"))),
        RawNumber::Text(text) => Decimal::from_str(text.trim())
            .map_err(|e| serde::de::Error::custom(format!("invalid number \"{text}\": {e}"))),
    }
}

/// Inserts a `,` between every group of three digits, counting from the right.
#[must_use]
pub fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses rendered amount text such as `"450,000 VND"` or `"450000"`.
///
/// Returns `None` for anything that is not a well-formed amount: markers
/// like `"N/A"`, error strings, blanks, or misplaced separators.
#[must_use]
pub fn parse_rendered_amount(text: &str) -> Option<Amount> {
    let caps = RENDERED_AMOUNT_RE.captures(text)?;
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok().map(Amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(450_000), "450,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn display_appends_currency_label() {
        assert_eq!(Amount::new(450_000).display("VND"), "450,000 VND");
        assert_eq!(Amount::new(15).display(""), "15");
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Amount::new(150_000).times(3), Amount::new(450_000));
        assert_eq!(Amount::new(150_000).times(0), Amount::ZERO);
    }

    #[test]
    fn saturating_sub_clamps_at_zero() {
        assert_eq!(Amount::new(10).saturating_sub(Amount::new(25)), Amount::ZERO);
    }

    #[test]
    fn parses_rendered_text() {
        assert_eq!(parse_rendered_amount("450,000 VND"), Some(Amount::new(450_000)));
        assert_eq!(parse_rendered_amount("  900000 "), Some(Amount::new(900_000)));
        assert_eq!(parse_rendered_amount("30,000đ"), Some(Amount::new(30_000)));
        assert_eq!(parse_rendered_amount("0 VND"), Some(Amount::ZERO));
    }

    #[test]
    fn rejects_non_amount_text() {
        assert_eq!(parse_rendered_amount("N/A"), None);
        assert_eq!(parse_rendered_amount(""), None);
        assert_eq!(parse_rendered_amount("NaN"), None);
        assert_eq!(parse_rendered_amount("Error fetching price"), None);
        assert_eq!(parse_rendered_amount("45,00 VND"), None);
        assert_eq!(parse_rendered_amount("-5 VND"), None);
    }

    #[test]
    fn deserializes_numbers_and_decimal_strings() {
        let n: Amount = serde_json::from_str("150000").unwrap();
        assert_eq!(n, Amount::new(150_000));
        let s: Amount = serde_json::from_str("\"150000.00\"").unwrap();
        assert_eq!(s, Amount::new(150_000));
        let f: Amount = serde_json::from_str("99.5").unwrap();
        assert_eq!(f, Amount::new(100));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(serde_json::from_str::<Amount>("-1").is_err());
        assert!(serde_json::from_str::<Amount>("\"-20\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
    }

    #[test]
    fn sums_amounts() {
        let total: Amount = [Amount::new(1), Amount::new(2), Amount::new(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Amount::new(6));
    }
}
