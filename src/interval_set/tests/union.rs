#[cfg(test)]
mod tests {
    use crate::{
        ExtendedTime, Interval, IntervalSet,
        interval_set::tests::{
            arb_interval, arb_small_set, assert_canonical, at, minutes, set_a, set_b, set_c,
            to_flat_set,
        },
    };
    use proptest::prelude::ProptestConfig;
    use proptest::proptest;
    use std::collections::BTreeSet;

    #[test]
    fn test_union() {
        let set_a = set_a();
        let set_b = set_b();

        let logic_result = set_a.union(&set_b);
        assert_canonical(&logic_result);

        let expected: BTreeSet<_> = to_flat_set(&set_a)
            .union(&to_flat_set(&set_b))
            .cloned()
            .collect();

        assert_eq!(
            to_flat_set(&logic_result),
            expected,
            "IntervalSet::union result should match BTreeSet::union"
        );
        assert_eq!(
            logic_result,
            IntervalSet::new([minutes(0, 70), minutes(90, 100)])
        );
    }

    #[test]
    fn test_union_with_unbounded() {
        let logic_result = set_c().union(&set_a());
        assert_eq!(
            logic_result,
            IntervalSet::new([
                Interval::new(ExtendedTime::NegInf, at(30)).unwrap(),
                minutes(45, 100),
            ])
        );
        assert!(logic_result.is_unbounded());
    }

    #[test]
    fn test_union_adjacent_sets_merge() {
        let left = IntervalSet::new([minutes(0, 10), minutes(20, 30)]);
        let right = IntervalSet::new([minutes(10, 20)]);
        assert_eq!(left.union(&right), minutes(0, 30));
    }

    #[test]
    fn test_union_with_everything() {
        assert_eq!(set_a().union(&IntervalSet::all()), IntervalSet::all());
        assert_eq!(set_a().union(&IntervalSet::empty()), set_a());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn random_test_union(
            set_a in arb_small_set(8),
            set_b in arb_small_set(8)
        ) {
            let logic_result = set_a.union(&set_b);
            assert_canonical(&logic_result);

            let expected: BTreeSet<_> = to_flat_set(&set_a)
                .union(&to_flat_set(&set_b))
                .cloned()
                .collect();

            assert_eq!(
                to_flat_set(&logic_result), expected,
                "Union result consistency check failed.\n\
                 Set A size: {}, Set B size: {}, Result size: {}",
                 set_a.len(), set_b.len(), logic_result.len()
            );
        }

        #[test]
        fn random_test_interval_union(a in arb_interval(), b in arb_interval()) {
            let logic_result = a.union(&b);
            assert_canonical(&logic_result);
            if a.overlaps(&b) || (a.continuous(&b) && !a.is_empty() && !b.is_empty()) {
                assert_eq!(logic_result.len(), 1);
            }
            assert_eq!(logic_result, IntervalSet::new([a, b]));
        }
    }
}
