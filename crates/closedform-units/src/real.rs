//! Arbitrary precision real numbers.
//!
//! This module provides a wrapper around `dashu::float::DBig` (a base-10
//! binary-coded float) with the operations the search engine needs:
//! integer detection, integer and real powers, and `%g`-style formatting.

use dashu::base::SquareRoot;
use dashu::float::DBig;
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::precision::Precision;

/// Digits used by `Display` when the formatter carries no precision.
pub const DEFAULT_DISPLAY_DIGITS: usize = 10;

/// An arbitrary precision decimal real.
///
/// Every constructor rounds to the working digits of a [`Precision`];
/// arithmetic keeps the larger precision of its operands.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Real(DBig);

impl Real {
    /// Creates a real from an integer.
    #[must_use]
    pub fn from_i64(value: i64, precision: Precision) -> Self {
        Self::from_parts(IBig::from(value), 0, precision)
    }

    /// Creates `significand * 10^exponent`, rounded to `precision`.
    #[must_use]
    pub fn from_parts(significand: IBig, exponent: isize, precision: Precision) -> Self {
        Self(
            DBig::from_parts(significand, exponent)
                .with_precision(precision.working_digits())
                .value(),
        )
    }

    /// Parses a decimal numeral such as `-12`, `6.2832` or `9.109e-31`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumber`] if `text` is not a numeral.
    pub fn parse_numeral(text: &str, precision: Precision) -> Result<Self> {
        let invalid = || Error::InvalidNumber(text.to_string());

        let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent: isize = text[pos + 1..].parse().map_err(|_| invalid())?;
                (&text[..pos], exponent)
            }
            None => (text, 0),
        };

        let (negative, mantissa) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let mut significand = IBig::from_str_radix(&digits, 10).map_err(|_| invalid())?;
        if negative {
            significand = -significand;
        }
        let frac_len = isize::try_from(frac_part.len()).map_err(|_| invalid())?;

        Ok(Self::from_parts(significand, exponent - frac_len, precision))
    }

    /// Creates an integer carrying the same precision as `self`.
    #[must_use]
    pub fn integer_like(&self, value: i64) -> Self {
        Self(
            DBig::from(IBig::from(value))
                .with_precision(self.precision().max(1))
                .value(),
        )
    }

    /// Rounds to a different precision.
    #[must_use]
    pub fn with_precision(self, precision: Precision) -> Self {
        Self(self.0.with_precision(precision.working_digits()).value())
    }

    /// Significant digits carried by this value.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.0.precision()
    }

    /// Returns true if this value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < DBig::ZERO
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            Self(-self.0.clone())
        } else {
            self.clone()
        }
    }

    /// Decimal order of magnitude: `n` with `10^(n-1) <= |x| < 10^n`.
    ///
    /// Zero has order zero.
    #[must_use]
    pub fn decimal_order(&self) -> isize {
        if self.is_zero() {
            return 0;
        }
        let repr = self.0.repr();
        let digits = repr.significand().to_string().trim_start_matches('-').len();
        repr.exponent() + digits as isize
    }

    /// Returns true if this value has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.repr().exponent() >= 0 || self.to_integer().is_some()
    }

    /// Converts to an integer if there is no fractional part.
    ///
    /// The result has `decimal_order()` digits; callers bound the order
    /// before converting large values.
    #[must_use]
    pub fn to_integer(&self) -> Option<IBig> {
        let repr = self.0.repr();
        let significand = repr.significand();
        let exponent = repr.exponent();
        if exponent >= 0 {
            return Some(significand * IBig::from(10u8).pow(exponent.unsigned_abs()));
        }
        if self.decimal_order() <= 0 {
            // 0 < |x| < 1
            return None;
        }
        let scale = IBig::from(10u8).pow(exponent.unsigned_abs());
        if (significand % &scale) == IBig::ZERO {
            Some(significand / &scale)
        } else {
            None
        }
    }

    /// Raises to an integer power, including negative powers.
    ///
    /// # Panics
    ///
    /// Panics if `self` is zero and `exponent` is negative.
    #[must_use]
    pub fn powi(&self, exponent: &IBig) -> Self {
        if *exponent < IBig::ZERO {
            let positive = self.0.powi(-exponent.clone());
            Self(self.integer_like(1).0 / positive)
        } else {
            Self(self.0.powi(exponent.clone()))
        }
    }

    /// Raises a positive value to a real power.
    #[must_use]
    pub fn powf(&self, exponent: &Self) -> Self {
        Self(self.0.powf(&exponent.0))
    }

    /// Square root of a non-negative value.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        Self(self.0.sqrt())
    }

    /// Natural logarithm of a positive value.
    #[must_use]
    pub fn ln(&self) -> Self {
        Self(self.0.ln())
    }

    /// Natural exponential.
    #[must_use]
    pub fn exp(&self) -> Self {
        Self(self.0.exp())
    }

    /// Formats with `digits` significant digits, like C's `%g`.
    ///
    /// Positional notation is used for decimal exponents in `[-5, digits)`,
    /// scientific notation otherwise. Trailing zeros are dropped.
    #[must_use]
    pub fn to_string_sig(&self, digits: usize) -> String {
        let digits = digits.max(1);
        if self.is_zero() {
            return "0".to_string();
        }

        let rounded = self.0.clone().with_precision(digits).value();
        let repr = rounded.repr();
        let text = repr.significand().to_string();
        let (negative, raw) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        let mantissa = raw.trim_end_matches('0');
        let exponent = repr.exponent() + (raw.len() - mantissa.len()) as isize;
        let scientific = exponent + mantissa.len() as isize - 1;

        let mut out = String::with_capacity(mantissa.len() + 8);
        if negative {
            out.push('-');
        }
        if scientific < -5 || scientific >= digits as isize {
            out.push_str(&mantissa[..1]);
            if mantissa.len() > 1 {
                out.push('.');
                out.push_str(&mantissa[1..]);
            }
            let sign = if scientific < 0 { '-' } else { '+' };
            out.push_str(&format!("e{sign}{:02}", scientific.unsigned_abs()));
        } else if exponent >= 0 {
            out.push_str(mantissa);
            out.extend(std::iter::repeat('0').take(exponent.unsigned_abs()));
        } else {
            let point = mantissa.len() as isize + exponent;
            if point > 0 {
                let (int_part, frac_part) = mantissa.split_at(point.unsigned_abs());
                out.push_str(int_part);
                out.push('.');
                out.push_str(frac_part);
            } else {
                out.push_str("0.");
                out.extend(std::iter::repeat('0').take(point.unsigned_abs()));
                out.push_str(mantissa);
            }
        }
        out
    }

    /// Returns the inner `dashu::float::DBig`.
    #[must_use]
    pub fn into_inner(self) -> DBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::float::DBig`.
    #[must_use]
    pub fn as_inner(&self) -> &DBig {
        &self.0
    }
}

// The operand that alone decides a rounded sum: the other is zero or lies
// more than `digits + 1` decimal orders below it.
fn dominant(lhs: &Real, rhs: &Real) -> Option<Ordering> {
    if rhs.is_zero() {
        return Some(Ordering::Greater);
    }
    if lhs.is_zero() {
        return Some(Ordering::Less);
    }
    let digits = lhs.precision().max(rhs.precision());
    if digits == 0 {
        return None;
    }
    let limit = isize::try_from(digits).ok()?.saturating_add(1);
    let gap = lhs.decimal_order().saturating_sub(rhs.decimal_order());
    if gap > limit {
        Some(Ordering::Greater)
    } else if gap < -limit {
        Some(Ordering::Less)
    } else {
        None
    }
}

fn rounded(value: &Real, digits: usize) -> Real {
    if digits == 0 {
        value.clone()
    } else {
        Real(value.0.clone().with_precision(digits).value())
    }
}

fn sum(lhs: &Real, rhs: &Real) -> Real {
    let digits = lhs.precision().max(rhs.precision());
    match dominant(lhs, rhs) {
        Some(Ordering::Greater) => rounded(lhs, digits),
        Some(Ordering::Less) => rounded(rhs, digits),
        _ => Real(&lhs.0 + &rhs.0),
    }
}

fn difference(lhs: &Real, rhs: &Real) -> Real {
    let digits = lhs.precision().max(rhs.precision());
    match dominant(lhs, rhs) {
        Some(Ordering::Greater) => rounded(lhs, digits),
        Some(Ordering::Less) => -rounded(rhs, digits),
        _ => Real(&lhs.0 - &rhs.0),
    }
}

impl From<DBig> for Real {
    fn from(value: DBig) -> Self {
        Self(value)
    }
}

impl Default for Real {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Real {
    fn zero() -> Self {
        Self(DBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == DBig::ZERO
    }
}

impl One for Real {
    fn one() -> Self {
        Self(DBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == DBig::ONE
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Real({})", self.to_string_sig(self.precision().max(1)))
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(DEFAULT_DISPLAY_DIGITS);
        f.write_str(&self.to_string_sig(digits))
    }
}

// Arithmetic operations
impl Add for Real {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        sum(&self, &rhs)
    }
}

impl Add for &Real {
    type Output = Real;

    fn add(self, rhs: Self) -> Self::Output {
        sum(self, rhs)
    }
}

impl Sub for Real {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        difference(&self, &rhs)
    }
}

impl Sub for &Real {
    type Output = Real;

    fn sub(self, rhs: Self) -> Self::Output {
        difference(self, rhs)
    }
}

impl Mul for Real {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Real {
    type Output = Real;

    fn mul(self, rhs: Self) -> Self::Output {
        Real(&self.0 * &rhs.0)
    }
}

/// Division panics on a zero divisor; callers check first.
impl Div for Real {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div for &Real {
    type Output = Real;

    fn div(self, rhs: Self) -> Self::Output {
        Real(&self.0 / &rhs.0)
    }
}

impl Neg for Real {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Self::Output {
        Real(-self.0.clone())
    }
}
