//! Property-based tests for generation and selection.

#[cfg(test)]
mod tests {
    use closedform_constants::ConstantSet;
    use closedform_core::{BinOp, Expr, NamedConstant};
    use closedform_units::{DimValue, Dimension, Precision, Real};
    use proptest::prelude::*;

    use crate::{Generator, SearchConfig, SearchResult, Selector};

    fn precision() -> Precision {
        Precision::new(20)
    }

    fn value(text: &str) -> DimValue {
        DimValue::parse(text, precision()).unwrap()
    }

    fn constants(with_pi: bool, with_g: bool) -> ConstantSet {
        let mut set = ConstantSet::new();
        if with_pi {
            set.push(NamedConstant::new("pi", value("3.14159265358979323846")))
                .unwrap();
        }
        if with_g {
            set.push(NamedConstant::new("g", value("9.80665 m/s^2"))).unwrap();
        }
        set
    }

    // Small trees of a given size: literal chains of additions.
    fn expr_of_size(leaves: usize) -> Expr {
        let leaf = || Expr::literal(DimValue::from_i64(1, Dimension::DIMENSIONLESS, precision()));
        (1..leaves).fold(leaf(), |acc, _| Expr::binary(BinOp::Add, acc, leaf()))
    }

    fn result() -> impl Strategy<Value = SearchResult> {
        (0u8..6, 1usize..4).prop_map(|(error, leaves)| SearchResult {
            error: Real::from_i64(i64::from(error), precision()),
            expr: expr_of_size(leaves),
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn generated_size_is_bounded(
            n in 1usize..=2,
            max_int in 0usize..=2,
            with_pi in any::<bool>(),
            with_g in any::<bool>(),
            target in prop_oneof![Just("1.5"), Just("2 m/s^2"), Just("0.25 kg")],
        ) {
            let set = constants(with_pi, with_g);
            let target = value(target);
            let config = SearchConfig::new(n, max_int).with_precision(precision());
            let mut results = Vec::new();
            Generator::new(&set, &target, &config).run(&mut results).unwrap();
            for r in &results {
                prop_assert!(r.expr.size() <= 2 * n + 1);
                prop_assert_eq!(r.expr.clone().evaluate().unwrap().dimension(), target.dimension());
            }
        }
    }

    proptest! {
        #[test]
        fn selector_keeps_one_smallest_per_error(results in prop::collection::vec(result(), 0..40)) {
            let ranked = Selector::select(results.clone(), usize::MAX);

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].error < pair[1].error);
            }
            for r in &ranked {
                let smallest = results
                    .iter()
                    .filter(|c| c.error == r.error)
                    .map(|c| c.expr.size())
                    .min();
                prop_assert_eq!(Some(r.expr.size()), smallest);
            }
            let mut distinct: Vec<_> = results.iter().map(|r| r.error.clone()).collect();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(ranked.len(), distinct.len());
        }

        #[test]
        fn merge_matches_single_pass(
            results in prop::collection::vec(result(), 0..40),
            split in 0usize..40,
            top in 1usize..5,
        ) {
            let split = split.min(results.len());
            let single = Selector::select(results.clone(), top);

            let mut left = Selector::new(top);
            let mut right = Selector::new(top);
            for r in &results[..split] {
                left.offer(r.error.clone(), &r.expr);
            }
            for r in &results[split..] {
                right.offer(r.error.clone(), &r.expr);
            }
            left.merge(right);
            prop_assert_eq!(left.into_results(), single);
        }
    }
}
