//! Physical dimensions as exponent vectors over the SI base quantities.

use std::fmt;

/// Number of SI base quantities.
pub const BASE_COUNT: usize = 7;

/// Largest absolute exponent a dimension may carry.
pub const MAX_EXPONENT: i32 = i16::MAX as i32;

/// The seven SI base quantities, in exponent vector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseQuantity {
    /// Length (metre).
    Length,
    /// Mass (kilogram).
    Mass,
    /// Time (second).
    Time,
    /// Electric current (ampere).
    Current,
    /// Thermodynamic temperature (kelvin).
    Temperature,
    /// Amount of substance (mole).
    Amount,
    /// Luminous intensity (candela).
    Luminosity,
}

impl BaseQuantity {
    /// All base quantities in the order they are rendered.
    pub const RENDER_ORDER: [Self; BASE_COUNT] = [
        Self::Mass,
        Self::Length,
        Self::Time,
        Self::Current,
        Self::Temperature,
        Self::Amount,
        Self::Luminosity,
    ];

    /// Position in the exponent vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Coherent SI unit symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Length => "m",
            Self::Mass => "kg",
            Self::Time => "s",
            Self::Current => "A",
            Self::Temperature => "K",
            Self::Amount => "mol",
            Self::Luminosity => "cd",
        }
    }
}

/// A physical dimension: integer exponents of the SI base quantities.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimension([i32; BASE_COUNT]);

impl Dimension {
    /// The dimension of pure numbers.
    pub const DIMENSIONLESS: Self = Self([0; BASE_COUNT]);

    /// Creates a dimension from its exponent vector.
    #[must_use]
    pub const fn new(exponents: [i32; BASE_COUNT]) -> Self {
        Self(exponents)
    }

    /// The dimension of a single base quantity.
    #[must_use]
    pub fn base(quantity: BaseQuantity) -> Self {
        let mut exponents = [0; BASE_COUNT];
        exponents[quantity.index()] = 1;
        Self(exponents)
    }

    /// Exponent of one base quantity.
    #[must_use]
    pub const fn exponent(&self, quantity: BaseQuantity) -> i32 {
        self.0[quantity.index()]
    }

    /// The full exponent vector.
    #[must_use]
    pub const fn exponents(&self) -> [i32; BASE_COUNT] {
        self.0
    }

    /// Returns true if every exponent is zero.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Raises the dimension to an integer power.
    ///
    /// Returns `None` if any exponent would exceed [`MAX_EXPONENT`].
    #[must_use]
    pub fn powi(&self, n: i64) -> Option<Self> {
        let mut out = [0; BASE_COUNT];
        for (slot, &e) in out.iter_mut().zip(&self.0) {
            let scaled = i64::from(e).checked_mul(n)?;
            if scaled.abs() > i64::from(MAX_EXPONENT) {
                return None;
            }
            *slot = i32::try_from(scaled).ok()?;
        }
        Some(Self(out))
    }

    /// The reciprocal dimension.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.map(i32::saturating_neg))
    }

    /// The product dimension: exponents add.
    ///
    /// Returns `None` if any exponent would exceed [`MAX_EXPONENT`].
    #[must_use]
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let mut out = self.0;
        for (slot, e) in out.iter_mut().zip(rhs.0) {
            *slot = slot
                .checked_add(e)
                .filter(|sum| sum.unsigned_abs() <= MAX_EXPONENT.unsigned_abs())?;
        }
        Some(Self(out))
    }

    /// The quotient dimension: exponents subtract.
    ///
    /// Returns `None` if any exponent would exceed [`MAX_EXPONENT`].
    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        self.checked_mul(&rhs.inverse())
    }

    /// Named coherent SI unit with exactly this dimension, if there is one.
    #[must_use]
    pub fn named_unit(&self) -> Option<&'static str> {
        NAMED_UNITS
            .iter()
            .find(|(_, dim)| dim == self)
            .map(|(name, _)| *name)
    }
}

// L, M, T, I, Θ, N, J
const NAMED_UNITS: &[(&str, Dimension)] = &[
    ("N", Dimension([1, 1, -2, 0, 0, 0, 0])),
    ("J", Dimension([2, 1, -2, 0, 0, 0, 0])),
    ("W", Dimension([2, 1, -3, 0, 0, 0, 0])),
    ("Pa", Dimension([-1, 1, -2, 0, 0, 0, 0])),
    ("C", Dimension([0, 0, 1, 1, 0, 0, 0])),
    ("V", Dimension([2, 1, -3, -1, 0, 0, 0])),
    ("F", Dimension([-2, -1, 4, 2, 0, 0, 0])),
    ("Ohm", Dimension([2, 1, -3, -2, 0, 0, 0])),
    ("S", Dimension([-2, -1, 3, 2, 0, 0, 0])),
    ("Wb", Dimension([2, 1, -2, -1, 0, 0, 0])),
    ("T", Dimension([0, 1, -2, -1, 0, 0, 0])),
    ("H", Dimension([2, 1, -2, -2, 0, 0, 0])),
    ("Hz", Dimension([0, 0, -1, 0, 0, 0, 0])),
];

fn write_factor(f: &mut fmt::Formatter<'_>, symbol: &str, exponent: i32) -> fmt::Result {
    if exponent == 1 {
        f.write_str(symbol)
    } else {
        write!(f, "{symbol}^{exponent}")
    }
}

/// Renders `kg*m^2/s^2`-style text, or a named unit such as `J`.
///
/// A dimension with no positive exponent is written with negative
/// exponents (`s^-1*...`) so the output never needs a leading `1/`.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        if let Some(name) = self.named_unit() {
            return f.write_str(name);
        }

        let has_numerator = self.0.iter().any(|&e| e > 0);
        let mut first = true;
        for quantity in BaseQuantity::RENDER_ORDER {
            let e = self.exponent(quantity);
            if e == 0 || (has_numerator && e < 0) {
                continue;
            }
            if !first {
                f.write_str("*")?;
            }
            write_factor(f, quantity.symbol(), e)?;
            first = false;
        }
        if has_numerator {
            for quantity in BaseQuantity::RENDER_ORDER {
                let e = self.exponent(quantity);
                if e < 0 {
                    f.write_str("/")?;
                    write_factor(f, quantity.symbol(), -e)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimension({self})")
    }
}
