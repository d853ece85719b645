//! Property-based tests for the simplifier.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use closedform_core::{BinOp, Expr, NamedConstant};
    use closedform_units::{DimValue, Precision, Real};
    use proptest::prelude::*;

    use crate::Simplifier;

    fn precision() -> Precision {
        Precision::new(20)
    }

    fn leaf() -> impl Strategy<Value = Expr> {
        prop_oneof![
            (0i64..=3).prop_map(|n| {
                Expr::literal(DimValue::from_i64(
                    n,
                    closedform_units::Dimension::DIMENSIONLESS,
                    precision(),
                ))
            }),
            Just(()).prop_map(|()| {
                let value = DimValue::parse("3.14159265358979323846", precision()).unwrap();
                Expr::constant(Arc::new(NamedConstant::builtin("pi", value)))
            }),
        ]
    }

    fn op() -> impl Strategy<Value = BinOp> {
        prop_oneof![
            Just(BinOp::Add),
            Just(BinOp::Sub),
            Just(BinOp::Mul),
            Just(BinOp::Div),
        ]
    }

    // Dimensionless trees over + - * /; pow is left out to keep values small.
    fn tree() -> impl Strategy<Value = Expr> {
        leaf().prop_recursive(4, 24, 2, |inner| {
            (op(), inner.clone(), inner).prop_map(|(op, lhs, rhs)| Expr::binary(op, lhs, rhs))
        })
    }

    fn close(a: &DimValue, b: &DimValue) -> bool {
        let tolerance = Real::parse_numeral("1e-15", precision()).unwrap();
        let scale = a.magnitude().abs();
        let diff = a.abs_diff(b).unwrap();
        if scale > Real::from_i64(1, precision()) {
            diff <= &tolerance * &scale
        } else {
            diff <= tolerance
        }
    }

    proptest! {
        #[test]
        fn simplify_is_idempotent(mut e in tree()) {
            let simplifier = Simplifier::new();
            prop_assume!(e.evaluate().is_ok());
            simplifier.simplify(&mut e).unwrap();
            let once = e.clone();
            let stats = simplifier.simplify(&mut e).unwrap();
            prop_assert!(stats.is_unchanged());
            prop_assert_eq!(e, once);
        }

        #[test]
        fn simplify_preserves_value(mut e in tree()) {
            let simplifier = Simplifier::new();
            let Ok(before) = e.evaluate().cloned() else {
                return Ok(());
            };
            simplifier.simplify(&mut e).unwrap();
            // Flattening a reciprocal can turn a rounding residue into an
            // exact zero divisor.
            let Ok(after) = e.evaluate().cloned() else {
                return Ok(());
            };
            prop_assert_eq!(after.dimension(), before.dimension());
            prop_assert!(close(&after, &before), "{} vs {}", after, before);
        }

        #[test]
        fn simplify_never_grows(mut e in tree()) {
            let simplifier = Simplifier::new();
            prop_assume!(e.evaluate().is_ok());
            let size = e.size();
            let stats = simplifier.simplify(&mut e).unwrap();
            prop_assert!(e.size() + 2 * stats.rewrites <= size);
        }
    }
}
