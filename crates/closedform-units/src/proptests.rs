//! Property-based tests for dimensioned arithmetic.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use proptest::prelude::*;

    use crate::{Dimension, DimValue, Error, Precision, Real};

    fn precision() -> Precision {
        Precision::new(20)
    }

    // Decimals with at most three fractional digits
    fn decimal() -> impl Strategy<Value = Real> {
        (-1_000_000i64..1_000_000i64)
            .prop_map(|n| Real::from_parts(IBig::from(n), -3, precision()))
    }

    fn dimension() -> impl Strategy<Value = Dimension> {
        prop::array::uniform7(-3i32..=3i32).prop_map(Dimension::new)
    }

    fn value() -> impl Strategy<Value = DimValue> {
        (decimal(), dimension()).prop_map(|(m, d)| DimValue::new(m, d))
    }

    proptest! {
        #[test]
        fn add_commutative(a in decimal(), b in decimal(), d in dimension()) {
            let a = DimValue::new(a, d);
            let b = DimValue::new(b, d);
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        }

        #[test]
        fn mul_commutative(a in value(), b in value()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn add_then_sub_roundtrips(a in decimal(), b in decimal(), d in dimension()) {
            let a = DimValue::new(a, d);
            let b = DimValue::new(b, d);
            prop_assert_eq!(a.add(&b).unwrap().sub(&b).unwrap(), a);
        }

        #[test]
        fn add_rejects_unequal_dimensions(a in value(), b in value()) {
            prop_assume!(a.dimension() != b.dimension());
            let is_mismatch = matches!(a.add(&b), Err(Error::DimensionMismatch { .. }));
            prop_assert!(is_mismatch);
        }

        #[test]
        fn pow_rejects_dimensioned_exponent(a in value(), b in value()) {
            prop_assume!(!b.is_dimensionless());
            let is_rejected = matches!(a.pow(&b), Err(Error::NonDimensionlessExponent(_)));
            prop_assert!(is_rejected);
        }

        #[test]
        fn check_pow_agrees_with_pow(a in value(), n in -4i64..=4i64) {
            let exponent = DimValue::from_i64(n, Dimension::DIMENSIONLESS, precision());
            prop_assert_eq!(
                DimValue::check_pow(&a, &exponent).is_ok(),
                a.pow(&exponent).is_ok()
            );
        }

        #[test]
        fn div_undoes_mul(a in value(), b in value()) {
            prop_assume!(!b.is_zero());
            let quotient = a.mul(&b).unwrap().div(&b).unwrap();
            prop_assert_eq!(quotient.dimension(), a.dimension());
            let tolerance = Real::from_parts(IBig::from(1), -18, precision());
            prop_assert!(quotient.abs_diff(&a).unwrap() <= tolerance);
        }
    }
}
