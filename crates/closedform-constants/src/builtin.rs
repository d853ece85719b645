//! Built-in mathematical constants.
//!
//! Every constant is computed at the requested precision plus internal guard
//! digits, then rounded. Series are summed until adding the next term no
//! longer changes the partial sum.

use closedform_core::NamedConstant;
use closedform_units::{DimValue, Precision, Real};

/// Extra digits carried by the internal computations.
const INTERNAL_GUARD: u32 = 10;

/// CODATA 2018 fine-structure constant, as `significand * 10^exponent`.
const FINE_STRUCTURE: (i64, isize) = (72_973_525_693, -13);

/// The built-in constants, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Archimedes' constant.
    Pi,
    /// Euler's number.
    E,
    /// The Euler–Mascheroni constant.
    Euler,
    /// The natural logarithm of two.
    Ln2,
    /// Catalan's constant.
    Catalan,
    /// The golden ratio.
    Phi,
    /// The fine-structure constant.
    FineStructure,
}

impl Builtin {
    /// Every built-in, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Pi,
        Self::E,
        Self::Euler,
        Self::Ln2,
        Self::Catalan,
        Self::Phi,
        Self::FineStructure,
    ];

    /// Name used in expressions and constants files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Euler => "euler",
            Self::Ln2 => "ln2",
            Self::Catalan => "catalan",
            Self::Phi => "phi",
            Self::FineStructure => "fine-structure",
        }
    }

    /// Looks up a built-in by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// The dimensionless value at `precision`.
    #[must_use]
    pub fn value(self, precision: Precision) -> DimValue {
        let internal = Precision::new(precision.digits() + INTERNAL_GUARD);
        let magnitude = match self {
            Self::Pi => pi(internal),
            Self::E => Real::from_i64(1, internal).exp(),
            Self::Euler => euler_gamma(internal),
            Self::Ln2 => Real::from_i64(2, internal).ln(),
            Self::Catalan => catalan(internal),
            Self::Phi => {
                let one = Real::from_i64(1, internal);
                (&one + &Real::from_i64(5, internal).sqrt()) / Real::from_i64(2, internal)
            }
            Self::FineStructure => {
                let (significand, exponent) = FINE_STRUCTURE;
                Real::from_parts(significand.into(), exponent, internal)
            }
        };
        DimValue::dimensionless(magnitude.with_precision(precision))
    }

    /// The built-in as a named constant at `precision`.
    #[must_use]
    pub fn constant(self, precision: Precision) -> NamedConstant {
        NamedConstant::builtin(self.name(), self.value(precision))
    }
}

// Adds `term` to `sum`, returning false once the sum stops changing.
fn accumulate(sum: &mut Real, term: &Real) -> bool {
    let next = &*sum + term;
    let changed = next != *sum;
    *sum = next;
    changed
}

/// `atan(1/n)` by its Taylor series.
fn atan_inv(n: i64, precision: Precision) -> Real {
    let n = Real::from_i64(n, precision);
    let n_squared = &n * &n;
    let mut power = Real::from_i64(1, precision) / n;
    let mut sum = power.clone();
    let mut k = 1;
    loop {
        power = power / n_squared.clone();
        let term = &power / &Real::from_i64(2 * k + 1, precision);
        let term = if k % 2 == 1 { -term } else { term };
        if !accumulate(&mut sum, &term) {
            break;
        }
        k += 1;
    }
    sum
}

/// Machin's formula: `pi = 16 atan(1/5) - 4 atan(1/239)`.
fn pi(precision: Precision) -> Real {
    let sixteen = Real::from_i64(16, precision);
    let four = Real::from_i64(4, precision);
    &sixteen * &atan_inv(5, precision) - &four * &atan_inv(239, precision)
}

/// Ramanujan's series:
/// `G = pi/8 ln(2 + sqrt 3) + 3/8 sum (n!)^2 / ((2n)! (2n+1)^2)`.
fn catalan(precision: Precision) -> Real {
    let int = |v: i64| Real::from_i64(v, precision);

    let mut a = int(1);
    let mut sum = int(1);
    let mut n = 0;
    loop {
        // a_{n+1} = a_n (n+1) / (2 (2n+1))
        a = &a * &int(n + 1) / int(2 * (2 * n + 1));
        n += 1;
        let odd = int(2 * n + 1);
        let term = &a / &(&odd * &odd);
        if !accumulate(&mut sum, &term) {
            break;
        }
    }

    let log_term = pi(precision) / int(8) * (int(2) + int(3).sqrt()).ln();
    log_term + int(3) / int(8) * sum
}

/// Brent–McMillan algorithm B1.
///
/// With `A_0 = -ln n`, `B_0 = 1`, `B_k = B_{k-1} n^2 / k^2` and
/// `A_k = (A_{k-1} n^2 / k + B_k) / k`, gamma is `sum A_k / sum B_k` with an
/// error of order `e^(-4n)`. The partial sums peak near `e^(2n)`, so the
/// working precision is raised by `n` digits.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn euler_gamma(precision: Precision) -> Real {
    let digits = f64::from(precision.digits());
    // n ln(10)^-1 * 4 > digits
    let n = (digits * std::f64::consts::LN_10 / 4.0).ceil() as i64 + 1;
    let terms = (3.5911 * n as f64).ceil() as i64 + 1;
    let working = Precision::new(precision.digits() + u32::try_from(n).unwrap_or(u32::MAX / 2));

    let int = |v: i64| Real::from_i64(v, working);
    let n_squared = int(n * n);

    let mut a = -int(n).ln();
    let mut b = int(1);
    let mut u = a.clone();
    let mut v = b.clone();
    for k in 1..=terms {
        let k_real = int(k);
        b = &b * &n_squared / (&k_real * &k_real);
        a = (&a * &n_squared / k_real.clone() + b.clone()) / k_real;
        u = u + a.clone();
        v = v + b.clone();
    }

    (u / v).with_precision(precision)
}

/// Every built-in constant at `precision`, in catalog order.
#[must_use]
pub fn builtins(precision: Precision) -> Vec<NamedConstant> {
    Builtin::ALL
        .into_iter()
        .map(|b| b.constant(precision))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_digits(builtin: Builtin, expected: &str) {
        let precision = Precision::new(25);
        let value = builtin.value(precision);
        let expected = DimValue::parse(expected, precision).unwrap();
        let tolerance = Real::parse_numeral("1e-19", precision).unwrap();
        let diff = value.abs_diff(&expected).unwrap();
        assert!(
            diff < tolerance,
            "{}: got {:.25}, diff {}",
            builtin.name(),
            value,
            diff
        );
    }

    #[test]
    fn test_pi() {
        assert_digits(Builtin::Pi, "3.14159265358979323846");
    }

    #[test]
    fn test_e() {
        assert_digits(Builtin::E, "2.71828182845904523536");
    }

    #[test]
    fn test_euler() {
        assert_digits(Builtin::Euler, "0.57721566490153286060");
    }

    #[test]
    fn test_ln2() {
        assert_digits(Builtin::Ln2, "0.69314718055994530941");
    }

    #[test]
    fn test_catalan() {
        assert_digits(Builtin::Catalan, "0.91596559417721901505");
    }

    #[test]
    fn test_phi() {
        assert_digits(Builtin::Phi, "1.61803398874989484820");
    }

    #[test]
    fn test_fine_structure() {
        let value = Builtin::FineStructure.value(Precision::default());
        assert_eq!(value.format(15), "0.0072973525693");
    }

    #[test]
    fn test_all_dimensionless() {
        assert!(builtins(Precision::default())
            .iter()
            .all(|c| c.value().is_dimensionless() && c.is_builtin()));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Builtin::from_name("catalan"), Some(Builtin::Catalan));
        assert_eq!(Builtin::from_name("fine-structure"), Some(Builtin::FineStructure));
        assert_eq!(Builtin::from_name("tau"), None);
    }

    #[test]
    fn test_higher_precision() {
        let value = Builtin::Pi.value(Precision::new(60));
        let reference = DimValue::parse(
            "3.14159265358979323846264338327950288419716939937510582097494",
            Precision::new(60),
        )
        .unwrap();
        let tolerance = Real::parse_numeral("1e-58", Precision::new(60)).unwrap();
        assert!(value.abs_diff(&reference).unwrap() < tolerance);
    }
}
