use crate::{ExtendedTime, Instant, Interval, IntervalSet, instant::parse_instant};
use std::collections::BTreeSet;

#[cfg(any(test))]
use proptest::prelude::*;

pub mod measure;
pub mod union;

/// テストで使う時刻の原点
#[cfg(any(test))]
pub fn base() -> Instant {
    parse_instant("2024-01-01").unwrap()
}

/// 原点から `minutes` 分後の時刻
#[cfg(any(test))]
pub fn at(minutes: i64) -> ExtendedTime {
    ExtendedTime::Finite(base() + chrono::TimeDelta::minutes(minutes))
}

#[cfg(any(test))]
pub fn minutes(start: i64, end: i64) -> Interval {
    Interval::new(at(start), at(end)).unwrap()
}

///集合に含まれる標本点（30秒刻み）の番号を集める
/// 区間の端点はすべて分単位なので、30秒刻みで調べれば境界の扱いも含めて集合を判別できる
#[cfg(any(test))]
pub fn to_flat_set(set: &IntervalSet) -> BTreeSet<i64> {
    (-20..=220)
        .filter(|k| set.contains(base() + chrono::TimeDelta::seconds(30 * k)))
        .collect()
}

///正規形の条件を満たしているか確認する
#[cfg(any(test))]
pub fn assert_canonical(set: &IntervalSet) {
    for r in set.iter() {
        assert!(!r.is_empty(), "empty interval retained: {set}");
    }
    for pair in set.as_slice().windows(2) {
        assert!(
            pair[0].end() < pair[1].start(),
            "intervals not separated: {} {}",
            pair[0],
            pair[1]
        );
    }
}

///SetAを生成する
#[cfg(any(test))]
pub fn set_a() -> IntervalSet {
    IntervalSet::new([minutes(0, 30), minutes(45, 60), minutes(90, 100)])
}

///SetBを生成する
#[cfg(any(test))]
pub fn set_b() -> IntervalSet {
    IntervalSet::new([minutes(20, 50), minutes(60, 70)])
}

///SetCを生成する（非有界な区間を含む）
#[cfg(any(test))]
pub fn set_c() -> IntervalSet {
    IntervalSet::new([
        Interval::new(ExtendedTime::NegInf, at(10)).unwrap(),
        minutes(55, 95),
    ])
}

///テストのために、ランダムな区間を生成する
/// 端点は原点から0〜100分の範囲、または無限大
#[cfg(any(test))]
pub fn arb_interval() -> impl Strategy<Value = Interval> {
    let start = prop_oneof![
        1 => Just(ExtendedTime::NegInf),
        6 => (0i64..=100).prop_map(at),
    ];
    let end = prop_oneof![
        1 => Just(ExtendedTime::PosInf),
        6 => (0i64..=100).prop_map(at),
    ];
    (start, end).prop_map(|(s, e)| {
        let (s, e) = if s <= e { (s, e) } else { (e, s) };
        Interval::new(s, e).unwrap()
    })
}

///テストのために、ランダムなSetを生成する関数
#[cfg(any(test))]
pub fn arb_small_set(max_len: usize) -> impl Strategy<Value = IntervalSet> {
    proptest::collection::vec(arb_interval(), 0..=max_len).prop_map(IntervalSet::new)
}
