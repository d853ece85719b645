//! Working precision for magnitude arithmetic.
//!
//! Magnitudes are base-10 floating point numbers. A [`Precision`] maps the
//! number of decimal digits a caller asks for onto the number of significant
//! digits every constructor rounds to. The mapping adds a fixed number of
//! guard digits so that the requested digits survive a handful of chained
//! operations.

/// Requested decimal precision, threaded explicitly through constructors.
///
/// Values created with one `Precision` keep it: building a new `Precision`
/// never rescales magnitudes that already exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision {
    digits: u32,
}

impl Precision {
    /// Guard digits carried on top of the requested digits.
    pub const GUARD_DIGITS: u32 = 10;

    /// Default number of requested digits.
    pub const DEFAULT_DIGITS: u32 = 15;

    /// Creates a precision of `digits` significant decimal digits.
    ///
    /// A request for zero digits is treated as one digit.
    #[must_use]
    pub const fn new(digits: u32) -> Self {
        Self {
            digits: if digits == 0 { 1 } else { digits },
        }
    }

    /// The digits the caller asked for. Used when formatting.
    #[must_use]
    pub const fn digits(self) -> u32 {
        self.digits
    }

    /// The significant digits every magnitude is rounded to.
    #[must_use]
    pub const fn working_digits(self) -> usize {
        (self.digits + Self::GUARD_DIGITS) as usize
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIGITS)
    }
}
