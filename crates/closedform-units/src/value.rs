//! Dimension-checked arithmetic on arbitrary precision values.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use dashu::integer::IBig;
use num_traits::{One, Zero};

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::precision::Precision;
use crate::real::{Real, DEFAULT_DISPLAY_DIGITS};
use crate::unit::parse_unit_at;

/// Largest decimal order of magnitude a power may produce.
pub const MAX_POWER_ORDER: u64 = 10_000;

/// Largest decimal order of magnitude of an exponent.
pub const MAX_EXPONENT_ORDER: isize = 18;

// Conservative bound on the order of `base ^ exponent`.
fn power_in_range(base: &Real, exponent: &Real) -> bool {
    if base.is_zero() || base.abs().is_one() {
        return true;
    }
    let Ok(exponent_order) = u32::try_from(exponent.decimal_order()) else {
        return true;
    };
    let base_order = u64::try_from(base.decimal_order().unsigned_abs()).unwrap_or(u64::MAX);
    10u64
        .checked_pow(exponent_order)
        .and_then(|scale| scale.checked_mul(base_order.saturating_add(1)))
        .is_some_and(|order| order <= MAX_POWER_ORDER)
}

/// An arbitrary precision magnitude paired with a physical dimension.
///
/// Unit scale factors are folded into the magnitude when text is parsed,
/// so the dimension is a pure exponent vector and `1 km == 1000 m`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DimValue {
    magnitude: Real,
    dimension: Dimension,
}

impl DimValue {
    /// Creates a value from a magnitude and a dimension.
    #[must_use]
    pub fn new(magnitude: Real, dimension: Dimension) -> Self {
        Self {
            magnitude,
            dimension,
        }
    }

    /// Creates a dimensionless value.
    #[must_use]
    pub fn dimensionless(magnitude: Real) -> Self {
        Self::new(magnitude, Dimension::DIMENSIONLESS)
    }

    /// Creates an integer value carrying `dimension`.
    #[must_use]
    pub fn from_i64(value: i64, dimension: Dimension, precision: Precision) -> Self {
        Self::new(Real::from_i64(value, precision), dimension)
    }

    /// The magnitude in coherent SI units.
    #[must_use]
    pub fn magnitude(&self) -> &Real {
        &self.magnitude
    }

    /// The physical dimension.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Splits into magnitude and dimension.
    #[must_use]
    pub fn into_parts(self) -> (Real, Dimension) {
        (self.magnitude, self.dimension)
    }

    /// Returns true if the dimension is trivial.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Returns true if the magnitude is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Returns true if the magnitude has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.magnitude.is_integer()
    }

    /// Returns true for the dimensionless number zero.
    #[must_use]
    pub fn is_dimensionless_zero(&self) -> bool {
        self.is_dimensionless() && self.is_zero()
    }

    /// Returns true for the dimensionless number one.
    #[must_use]
    pub fn is_dimensionless_one(&self) -> bool {
        self.is_dimensionless() && self.magnitude.is_one()
    }

    fn check_same_dimension(&self, other: &Self) -> Result<()> {
        if self.dimension == other.dimension {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                left: self.dimension,
                right: other.dimension,
            })
        }
    }

    /// Adds two values of equal dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the dimensions differ.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_dimension(other)?;
        Ok(Self::new(&self.magnitude + &other.magnitude, self.dimension))
    }

    /// Subtracts two values of equal dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the dimensions differ.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_same_dimension(other)?;
        Ok(Self::new(&self.magnitude - &other.magnitude, self.dimension))
    }

    /// Multiplies two values; dimensions multiply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExponentOutOfRange`] if a dimension exponent of the
    /// product would exceed [`MAX_EXPONENT`](crate::dimension::MAX_EXPONENT).
    pub fn mul(&self, other: &Self) -> Result<Self> {
        let dimension = self
            .dimension
            .checked_mul(&other.dimension)
            .ok_or(Error::ExponentOutOfRange)?;
        Ok(Self::new(&self.magnitude * &other.magnitude, dimension))
    }

    /// Divides two values; dimensions divide.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] if `other` is zero, or
    /// [`Error::ExponentOutOfRange`] if a dimension exponent of the quotient
    /// would exceed [`MAX_EXPONENT`](crate::dimension::MAX_EXPONENT).
    pub fn div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let dimension = self
            .dimension
            .checked_div(&other.dimension)
            .ok_or(Error::ExponentOutOfRange)?;
        Ok(Self::new(&self.magnitude / &other.magnitude, dimension))
    }

    /// Absolute difference `|self - other|` of two values of equal dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the dimensions differ.
    pub fn abs_diff(&self, other: &Self) -> Result<Real> {
        Ok(self.sub(other)?.magnitude.abs())
    }

    /// Checks whether `base ^ exponent` is defined without computing it.
    ///
    /// # Errors
    ///
    /// - [`Error::NonDimensionlessExponent`] for a dimensioned exponent
    /// - [`Error::FractionalExponentOnDimensionedBase`] for a non-integer
    ///   power of a dimensioned base
    /// - [`Error::FractionalExponentOnNegativeBase`] for a non-integer power
    ///   of a negative base
    /// - [`Error::DivisionByZero`] for a negative power of zero
    /// - [`Error::ExponentOutOfRange`] if the exponent, or the resulting
    ///   dimension or magnitude, is too large
    pub fn check_pow(base: &Self, exponent: &Self) -> Result<()> {
        if !exponent.is_dimensionless() {
            return Err(Error::NonDimensionlessExponent(exponent.dimension));
        }
        if exponent.magnitude.decimal_order() > MAX_EXPONENT_ORDER {
            return Err(Error::ExponentOutOfRange);
        }
        let negative_power = exponent.magnitude.is_negative();
        match exponent.magnitude.to_integer() {
            Some(n) => {
                if !base.is_dimensionless() {
                    let n = i64::try_from(n).map_err(|_| Error::ExponentOutOfRange)?;
                    base.dimension.powi(n).ok_or(Error::ExponentOutOfRange)?;
                }
            }
            None => {
                if !base.is_dimensionless() {
                    return Err(Error::FractionalExponentOnDimensionedBase(base.dimension));
                }
                if base.magnitude.is_negative() {
                    return Err(Error::FractionalExponentOnNegativeBase);
                }
            }
        }
        if base.is_zero() && negative_power {
            return Err(Error::DivisionByZero);
        }
        if !power_in_range(&base.magnitude, &exponent.magnitude) {
            return Err(Error::ExponentOutOfRange);
        }
        Ok(())
    }

    /// Raises `self` to a dimensionless power.
    ///
    /// Integer powers use repeated squaring and keep the base's dimension
    /// raised to the power; non-integer powers go through `exp(y ln x)`.
    ///
    /// # Errors
    ///
    /// See [`DimValue::check_pow`].
    pub fn pow(&self, exponent: &Self) -> Result<Self> {
        Self::check_pow(self, exponent)?;

        match exponent.magnitude.to_integer() {
            Some(n) => {
                let dimension = if self.is_dimensionless() {
                    Dimension::DIMENSIONLESS
                } else {
                    let k = i64::try_from(n.clone()).map_err(|_| Error::ExponentOutOfRange)?;
                    self.dimension.powi(k).ok_or(Error::ExponentOutOfRange)?
                };
                let magnitude = if self.is_zero() {
                    let power = i64::from(n == IBig::ZERO);
                    exponent.magnitude.integer_like(power)
                } else {
                    self.magnitude.powi(&n)
                };
                Ok(Self::new(magnitude, dimension))
            }
            None if self.is_zero() => Ok(Self::dimensionless(exponent.magnitude.integer_like(0))),
            None => Ok(Self::dimensionless(self.magnitude.powf(&exponent.magnitude))),
        }
    }

    /// Renders the magnitude with `digits` significant digits followed by
    /// the SI unit, e.g. `9.109e-31 kg` or `6.2832`.
    #[must_use]
    pub fn format(&self, digits: usize) -> String {
        let magnitude = self.magnitude.to_string_sig(digits);
        if self.is_dimensionless() {
            magnitude
        } else {
            format!("{magnitude} {}", self.dimension)
        }
    }

    /// Parses a numeral followed by an optional unit expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumber`] if the text does not start with a
    /// numeral, or a unit error from the unit expression.
    pub fn parse(text: &str, precision: Precision) -> Result<Self> {
        let start = text.len() - text.trim_start().len();
        let end = start + numeral_len(&text[start..]);
        let magnitude = Real::parse_numeral(&text[start..end], precision)
            .map_err(|_| Error::InvalidNumber(text.trim().to_string()))?;

        if text[end..].trim().is_empty() {
            return Ok(Self::dimensionless(magnitude));
        }
        let unit = parse_unit_at(text, end, precision)?;
        Ok(Self::new(magnitude * unit.scale, unit.dimension))
    }
}

// Length of the `[+-]digits[.digits][e[+-]digits]` prefix. An `e` not
// followed by digits belongs to the unit, as in `5 eV`.
fn numeral_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    i = digits_from(i);
    if bytes.get(i) == Some(&b'.') {
        i = digits_from(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exponent_end = digits_from(j);
        if exponent_end > j {
            i = exponent_end;
        }
    }
    i
}

impl Neg for DimValue {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.magnitude, self.dimension)
    }
}

impl Neg for &DimValue {
    type Output = DimValue;

    fn neg(self) -> Self::Output {
        DimValue::new(-&self.magnitude, self.dimension)
    }
}

impl FromStr for DimValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, Precision::default())
    }
}

impl fmt::Display for DimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(DEFAULT_DISPLAY_DIGITS);
        f.write_str(&self.format(digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::BaseQuantity;

    fn p() -> Precision {
        Precision::new(20)
    }

    fn v(text: &str) -> DimValue {
        DimValue::parse(text, p()).unwrap()
    }

    #[test]
    fn test_add_requires_equal_dimensions() {
        assert_eq!(v("1 m").add(&v("2 m")).unwrap(), v("3 m"));
        assert_eq!(v("1 km").add(&v("1 m")).unwrap(), v("1001 m"));
        let err = v("1 m").add(&v("1 s")).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
        assert!(v("1 m").sub(&v("1")).is_err());
    }

    #[test]
    fn test_mul_div_dimensions() {
        let speed = v("10 m").div(&v("2 s")).unwrap();
        assert_eq!(speed, v("5 m/s"));
        assert_eq!(speed.mul(&v("2 s")).unwrap(), v("10 m"));
        assert_eq!(v("1 m").div(&v("0 s")), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_mul_div_dimension_overflow() {
        let big = v("1 m").pow(&v("32767")).unwrap();
        assert_eq!(big.mul(&v("2 m")), Err(Error::ExponentOutOfRange));
        assert_eq!(big.div(&v("2 m^-1")), Err(Error::ExponentOutOfRange));
        assert_eq!(big.div(&v("2 m")).unwrap().dimension(), v("1 m").pow(&v("32766")).unwrap().dimension());
    }

    #[test]
    fn test_neg() {
        assert_eq!(-v("3 kg"), v("-3 kg"));
        assert_eq!(-&v("0"), v("0"));
    }

    #[test]
    fn test_pow_integer() {
        assert_eq!(v("2").pow(&v("2")).unwrap(), v("4"));
        assert_eq!(v("3 m").pow(&v("2")).unwrap(), v("9 m^2"));
        assert_eq!(v("2 s").pow(&v("-1")).unwrap(), v("0.5 Hz"));
        assert_eq!(v("-2").pow(&v("3")).unwrap(), v("-8"));
        assert_eq!(v("5 m").pow(&v("0")).unwrap(), v("1"));
        assert_eq!(v("0").pow(&v("0")).unwrap(), v("1"));
        assert_eq!(v("0 m").pow(&v("2")).unwrap(), v("0 m^2"));
    }

    #[test]
    fn test_pow_fractional() {
        let root = v("4").pow(&v("0.5")).unwrap();
        assert!(root.abs_diff(&v("2")).unwrap() < Real::parse_numeral("1e-20", p()).unwrap());
        assert_eq!(v("0").pow(&v("0.5")).unwrap(), v("0"));
    }

    #[test]
    fn test_pow_errors() {
        assert!(matches!(
            v("2").pow(&v("1 m")),
            Err(Error::NonDimensionlessExponent(_))
        ));
        assert!(matches!(
            v("2 m").pow(&v("0.5")),
            Err(Error::FractionalExponentOnDimensionedBase(_))
        ));
        assert_eq!(
            v("-2").pow(&v("0.5")),
            Err(Error::FractionalExponentOnNegativeBase)
        );
        assert_eq!(v("0").pow(&v("-1")), Err(Error::DivisionByZero));
        assert_eq!(v("0").pow(&v("-0.5")), Err(Error::DivisionByZero));
        assert_eq!(v("2 m").pow(&v("40000")), Err(Error::ExponentOutOfRange));
        assert_eq!(v("10").pow(&v("1e10")), Err(Error::ExponentOutOfRange));
        assert_eq!(v("0.5").pow(&v("-1e12")), Err(Error::ExponentOutOfRange));
    }

    #[test]
    fn test_pow_unit_base_large_exponent() {
        assert_eq!(v("1").pow(&v("1e17")).unwrap(), v("1"));
        assert_eq!(v("-1").pow(&v("1e17")).unwrap(), v("1"));
        assert_eq!(v("1").pow(&v("1e900000000")), Err(Error::ExponentOutOfRange));
        assert_eq!(v("0").pow(&v("-1e-900000000")), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_check_pow_range_boundary() {
        // 10^3 * (9 + 1) orders is exactly the limit.
        assert!(DimValue::check_pow(&v("123456789"), &v("999")).is_ok());
        assert!(DimValue::check_pow(&v("0.5"), &v("-999")).is_ok());
        assert_eq!(
            DimValue::check_pow(&v("1234567890"), &v("999")),
            Err(Error::ExponentOutOfRange)
        );
        assert_eq!(
            DimValue::check_pow(&v("9"), &v("43046721")),
            Err(Error::ExponentOutOfRange)
        );
        assert_eq!(
            DimValue::check_pow(&v("2"), &v("1e19")),
            Err(Error::ExponentOutOfRange)
        );
    }

    #[test]
    fn test_power_at_limit_compares_cheaply() {
        let large = v("123456789").pow(&v("999")).unwrap();
        assert_eq!(large.magnitude().decimal_order(), 8084);
        assert_eq!(large.abs_diff(&v("1")).unwrap(), large.magnitude().clone());
        let small = v("123456789").pow(&v("-999")).unwrap();
        assert_eq!(small.abs_diff(&v("1")).unwrap(), Real::from_i64(1, p()));
    }

    #[test]
    fn test_abs_diff_across_large_gap() {
        let huge = v("1e900000000");
        assert_eq!(huge.abs_diff(&v("1")).unwrap(), huge.magnitude().clone());
        assert_eq!(v("1").abs_diff(&huge).unwrap(), huge.magnitude().clone());
        assert_eq!(v("1").abs_diff(&v("1e-900000000")).unwrap(), Real::from_i64(1, p()));
        assert_eq!(v("2 m").abs_diff(&v("1e-50 m")).unwrap(), Real::from_i64(2, p()));
    }

    #[test]
    fn test_check_pow_matches_pow() {
        for (base, exp) in [("2", "3"), ("2 m", "0.5"), ("-1", "0.5"), ("0", "-2"), ("3", "1 s")] {
            let base = v(base);
            let exp = v(exp);
            assert_eq!(
                DimValue::check_pow(&base, &exp).is_ok(),
                base.pow(&exp).is_ok()
            );
        }
    }

    #[test]
    fn test_parse_units() {
        let electron = v("9.109e-31 kg");
        assert_eq!(electron.dimension(), Dimension::base(BaseQuantity::Mass));
        assert_eq!(v("1 eV"), v("1.602176634e-19 J"));
        assert_eq!(v("5eV"), v("5 eV"));
        assert_eq!(v("2.5 g"), v("0.0025 kg"));
        assert_eq!(v("  7  "), v("7"));
        assert_eq!(v("1 h"), v("3600 s"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(DimValue::parse("m", p()), Err(Error::InvalidNumber(_))));
        assert!(matches!(DimValue::parse("", p()), Err(Error::InvalidNumber(_))));
        assert!(matches!(
            DimValue::parse("3 parsec", p()),
            Err(Error::UnknownUnit(_))
        ));
        assert!(matches!(
            DimValue::parse("3 m^", p()),
            Err(Error::Syntax { pos: 3, .. })
        ));
    }

    #[test]
    fn test_format() {
        assert_eq!(v("6.2832").format(10), "6.2832");
        assert_eq!(v("9.109e-31 kg").format(10), "9.109e-31 kg");
        assert_eq!(v("2 kg*m^2/s^2").format(10), "2 J");
        assert_eq!(v("1.5 m/s").format(10), "1.5 m/s");
        assert_eq!(format!("{:.3}", v("3.14159 m")), "3.14 m");
    }

    #[test]
    fn test_format_parse_agree() {
        for text in ["9.109e-31 kg", "2 J", "1.5 m/s", "3 kg*m^2/s", "4 m^-2", "0.5"] {
            assert_eq!(v(text).format(10), text);
            assert_eq!(v(&v(text).format(10)), v(text));
        }
    }
}
