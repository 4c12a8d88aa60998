#[cfg(test)]
mod tests {
    use crate::{
        Error, ExtendedTime, Interval, IntervalSet, TimeSpan, Unit,
        interval_set::tests::{at, base, minutes, set_a, set_c},
    };
    use chrono::TimeDelta;

    #[test]
    fn contains_is_half_open() {
        let set = set_a();
        assert!(set.contains(at(0)));
        assert!(set.contains(at(29)));
        assert!(!set.contains(at(30)));
        assert!(!set.contains(at(40)));
        assert!(set.contains(at(45)));
        assert!(!set.contains(at(100)));
        assert!(!set.contains(ExtendedTime::NegInf));
        assert!(set_c().contains(ExtendedTime::NegInf));
        assert!(!IntervalSet::empty().contains(at(0)));
    }

    #[test]
    fn duration_sums_members() {
        assert_eq!(set_a().duration(), TimeSpan::Finite(TimeDelta::minutes(55)));
        assert_eq!(set_c().duration(), TimeSpan::Infinite);
        assert_eq!(IntervalSet::empty().duration(), TimeSpan::ZERO);
    }

    #[test]
    fn enumerate_concatenates_members() {
        let set = IntervalSet::new([minutes(0, 2), minutes(10, 12)]);
        let got = set.enumerate("m").unwrap();
        let expected: Vec<_> = [0, 1, 10, 11]
            .into_iter()
            .map(|m| base() + TimeDelta::minutes(m))
            .collect();
        assert_eq!(got, expected);

        // 両端は単位の境界に切り捨ててから列挙する
        assert!(set.enumerate(Unit::Hour).unwrap().is_empty());
        let hours = IntervalSet::new([minutes(0, 70), minutes(80, 130)])
            .enumerate(Unit::Hour)
            .unwrap();
        assert_eq!(hours, vec![base(), base() + TimeDelta::hours(1)]);
    }

    #[test]
    fn enumerate_rejects_unbounded_and_bad_units() {
        assert_eq!(set_c().enumerate("D"), Err(Error::UnboundedRange));
        assert!(matches!(
            set_a().enumerate("fortnight"),
            Err(Error::InvalidUnit { .. })
        ));
        assert!(matches!(
            set_a().enumerate("fs"),
            Err(Error::UnsupportedResolution { .. })
        ));
    }

    #[test]
    fn shift_moves_every_member() {
        let shifted = set_a().shift(TimeDelta::minutes(5)).unwrap();
        assert_eq!(
            shifted,
            IntervalSet::new([minutes(5, 35), minutes(50, 65), minutes(95, 105)])
        );
        assert_eq!(
            shifted.shift(TimeDelta::minutes(-5)).unwrap(),
            set_a()
        );
        assert_eq!(set_c().shift(TimeDelta::minutes(5)), Err(Error::UnboundedRange));
    }

    #[test]
    fn insert_keeps_canonical_form() {
        let mut set = IntervalSet::empty();
        set.insert(minutes(30, 40));
        set.insert(minutes(0, 10));
        set.insert(minutes(10, 30));
        assert_eq!(set, minutes(0, 40));

        set.insert(Interval::empty());
        assert_eq!(set.len(), 1);

        set.extend([minutes(50, 60), minutes(35, 45)]);
        assert_eq!(
            set,
            IntervalSet::new([minutes(0, 45), minutes(50, 60)])
        );
    }

    #[test]
    fn display() {
        let set = IntervalSet::new([minutes(0, 60)]);
        assert_eq!(
            set.to_string(),
            "IntervalSet[Interval(2024-01-01T00:00:00, 2024-01-01T01:00:00)]"
        );
        assert_eq!(IntervalSet::empty().to_string(), "IntervalSet[]");
    }
}
