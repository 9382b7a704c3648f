//! Fixed-point token amounts.
//!
//! 1 token = 100 hundredths (2 decimal places), stored as `u64`.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::AutopayError;

/// Token amount stored as hundredths of a token.
///
/// # Examples
///
/// ```
/// use autopay_types::TokenAmount;
///
/// let rate = TokenAmount::from_decimal_str("2.5").unwrap();
/// let total = rate.checked_mul_units(100).unwrap();
/// assert_eq!(total.to_display_string(), "250.00 tokens");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = TokenAmount(0);

    const DECIMALS: usize = 2;
    const SCALE: u64 = 100;

    /// Create from raw hundredths.
    #[inline]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        TokenAmount(hundredths)
    }

    /// Create from whole tokens (`1000` → `1000.00`).
    #[inline]
    pub const fn from_tokens(tokens: u64) -> Self {
        TokenAmount(tokens.saturating_mul(Self::SCALE))
    }

    /// Parse a decimal string like `"194.4"` or `"1000"`.
    ///
    /// Up to 2 decimal places. Negative or malformed input is rejected.
    pub fn from_decimal_str(s: &str) -> Result<Self, AutopayError> {
        let s = s.trim();
        let invalid = |reason: String| AutopayError::invalid_input("amount", reason);
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if frac.len() > Self::DECIMALS {
            return Err(invalid(format!("too many decimal places in '{}' (max 2)", s)));
        }
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("'{}' is not a non-negative number", s)));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("invalid fractional part: '{}'", frac)));
        }
        let whole_val: u64 = whole
            .parse()
            .map_err(|_| invalid(format!("invalid whole part: '{}'", whole)))?;
        let frac_val: u64 = if frac.is_empty() {
            0
        } else {
            format!("{:0<2}", frac)
                .parse()
                .map_err(|_| invalid(format!("invalid fractional part: '{}'", frac)))?
        };
        whole_val
            .checked_mul(Self::SCALE)
            .and_then(|v| v.checked_add(frac_val))
            .map(TokenAmount)
            .ok_or_else(|| invalid("amount overflow".to_string()))
    }

    /// Raw hundredths value.
    #[inline]
    pub fn hundredths(&self) -> u64 {
        self.0
    }

    /// Whole-token part, fraction dropped.
    #[inline]
    pub fn whole_tokens(&self) -> u64 {
        self.0 / Self::SCALE
    }

    /// Lossy conversion for percentage math and charts.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// `"250.00"`
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }

    /// `"250.00 tokens"`
    pub fn to_display_string(&self) -> String {
        format!("{} tokens", self.to_decimal_string())
    }

    /// Whole tokens with thousands separators, e.g. `"124,890"`.
    pub fn to_grouped_string(&self) -> String {
        group_thousands(self.whole_tokens())
    }

    #[inline]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(TokenAmount)
    }

    /// Multiply a per-unit rate by a unit count.
    #[inline]
    pub fn checked_mul_units(&self, units: u64) -> Option<Self> {
        self.0.checked_mul(units).map(TokenAmount)
    }

    #[inline]
    pub fn saturating_add(&self, rhs: &Self) -> Self {
        TokenAmount(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

impl Add for TokenAmount {
    type Output = TokenAmount;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(&rhs)
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TokenAmount::ZERO, |acc, x| acc.saturating_add(&x))
    }
}

impl<'a> Sum<&'a TokenAmount> for TokenAmount {
    fn sum<I: Iterator<Item = &'a TokenAmount>>(iter: I) -> Self {
        iter.fold(TokenAmount::ZERO, |acc, x| acc.saturating_add(x))
    }
}

/// Format an integer with comma thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(TokenAmount::from_decimal_str("1000").unwrap().hundredths(), 100_000);
        assert_eq!(TokenAmount::from_decimal_str("194.4").unwrap().hundredths(), 19_440);
        assert_eq!(TokenAmount::from_decimal_str(" 2.50 ").unwrap().hundredths(), 250);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(TokenAmount::from_decimal_str("-5").is_err());
        assert!(TokenAmount::from_decimal_str("1.234").is_err());
        assert!(TokenAmount::from_decimal_str("abc").is_err());
        assert!(TokenAmount::from_decimal_str("").is_err());
        assert!(TokenAmount::from_decimal_str(".5").is_err());
    }

    #[test]
    fn test_display_forms() {
        let amount = TokenAmount::from_hundredths(23_750);
        assert_eq!(amount.to_string(), "237.50");
        assert_eq!(amount.to_display_string(), "237.50 tokens");
        assert_eq!(TokenAmount::from_tokens(124_890).to_grouped_string(), "124,890");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(8534), "8,534");
        assert_eq!(group_thousands(2_847_521), "2,847,521");
    }

    #[test]
    fn test_sum_and_rate_multiplication() {
        let rate = TokenAmount::from_hundredths(180);
        assert_eq!(rate.checked_mul_units(200), Some(TokenAmount::from_tokens(360)));
        let total: TokenAmount = [TokenAmount::from_tokens(1), TokenAmount::from_hundredths(50)]
            .iter()
            .sum();
        assert_eq!(total.hundredths(), 150);
    }
}
