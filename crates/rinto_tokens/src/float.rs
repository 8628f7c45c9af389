//! The value of a numeric literal.
//!
//! Literals are kept as exact rationals, so no precision is lost to a machine float before a
//! backend decides how wide its numbers are.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// The precision, in bits, literal values carry by default
pub const DEFAULT_PRECISION: u32 = 256;

/// log10(2) scaled by 10^5
const LOG10_2_SCALED: u64 = 30_103;

/// An arbitrary precision numeric literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatValue {
    value: BigRational,
    precision: u32,
}

impl FloatValue {
    /// Creates a value with the [default precision](DEFAULT_PRECISION)
    pub fn new(value: BigRational) -> Self {
        Self::with_precision(value, DEFAULT_PRECISION)
    }

    pub fn with_precision(value: BigRational, precision: u32) -> Self {
        Self { value, precision }
    }

    /// Parses the spelling of a numeric literal, `\d+(\.\d+)?f?`
    pub fn parse(spelling: &str) -> Result<Self, ParseFloatError> {
        let invalid = || ParseFloatError(spelling.to_string());
        let digits = spelling.strip_suffix('f').unwrap_or(spelling);
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if digits.contains('.') && fraction.is_empty() {
            return Err(invalid());
        }

        let numerator = BigInt::parse_bytes(format!("{whole}{fraction}").as_bytes(), 10)
            .ok_or_else(invalid)?;
        let denominator = num_traits::pow(BigInt::from(10), fraction.len());
        Ok(Self::new(BigRational::new(numerator, denominator)))
    }

    /// The exact value
    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// The closest machine float to this value, if it is in range
    pub fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }

    /// The number of significant decimal digits this value's precision can hold
    pub fn significant_digits(&self) -> usize {
        (u64::from(self.precision) * LOG10_2_SCALED / 100_000).max(1) as usize
    }
}

impl FromStr for FloatValue {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for FloatValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let numer = self.value.numer();
        let denom = self.value.denom();
        if numer < &BigInt::zero() {
            f.write_str("-")?;
        }
        let numer = numer.magnitude().clone();
        let denom = denom.magnitude().clone();
        let whole = &numer / &denom;
        let mut remainder = &numer % &denom;
        write!(f, "{whole}")?;
        if remainder.is_zero() {
            return Ok(());
        }

        let whole_digits = if whole.is_zero() {
            0
        } else {
            whole.to_string().len()
        };
        let budget = self.significant_digits().saturating_sub(whole_digits).max(1);
        let mut fraction = String::new();
        while !remainder.is_zero() && fraction.len() < budget {
            remainder *= 10u32;
            let digit = &remainder / &denom;
            remainder %= &denom;
            fraction.push_str(&digit.to_string());
        }
        write!(f, ".{fraction}")
    }
}

/// The spelling given was not a numeric literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a valid numeric literal")]
pub struct ParseFloatError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_spelling() {
        let value = FloatValue::parse("42").unwrap();
        assert_eq!(value.value(), &BigRational::from_integer(BigInt::from(42)));
        assert_eq!(value.precision(), DEFAULT_PRECISION);
        assert_eq!(value.to_string(), "42");
    }

    #[test]
    fn test_parse_decimal() {
        let value = FloatValue::parse("1.5").unwrap();
        assert_eq!(
            value.value(),
            &BigRational::new(BigInt::from(3), BigInt::from(2))
        );
        assert_eq!(value.to_string(), "1.5");
        assert_eq!(value.to_f64(), Some(1.5));
    }

    #[test]
    fn test_parse_suffix() {
        assert_eq!(
            FloatValue::parse("2f").unwrap(),
            FloatValue::parse("2").unwrap()
        );
        assert_eq!(FloatValue::parse("0.25f").unwrap().to_string(), "0.25");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "f", "1.", ".5", "1.2.3", "1x", "1.5ff", "-1"] {
            assert!(FloatValue::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_zero() {
        assert!(FloatValue::parse("0.000").unwrap().is_zero());
        assert!(!FloatValue::parse("0.001").unwrap().is_zero());
    }

    #[test]
    fn test_display_is_bounded_by_precision() {
        let third = FloatValue::with_precision(
            BigRational::new(BigInt::from(1), BigInt::from(3)),
            16,
        );
        assert_eq!(third.significant_digits(), 4);
        assert_eq!(third.to_string(), "0.3333");
    }

    #[test]
    fn test_clone_is_deep() {
        let value = FloatValue::parse("3.25").unwrap();
        let copy = value.clone();
        drop(value);
        assert_eq!(copy.to_string(), "3.25");
    }
}
