//! 互いに素な時間区間の集合
//!
//! [`IntervalSet`] は常に正規形（ソート済み・重なりなし・接する区間は結合済み・空区間なし）で保持される。
//! 構造を変える操作のたびに [`consolidate`] を通すので、`==` や反復は正規形を前提にできる。

mod consolidate;
mod ops;

#[cfg(test)]
mod tests;

use std::fmt;

use chrono::TimeDelta;
#[cfg(feature = "random")]
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, ExtendedTime, Instant, Interval,
    interval::{IntoUnit, TimeSpan},
};
pub(crate) use consolidate::consolidate;

/// 区間の集合として振る舞えるトレイト
///
/// [`Interval`] と [`IntervalSet`] に実装されており、集合演算の引数はどちらでもよい。
/// 演算は必ず集合表現に揃えてから行うので、アルゴリズムの実装は1つだけになる。
pub trait Intervals {
    fn intervals(&self) -> impl Iterator<Item = Interval>;

    /// 正規形の集合に変換する
    fn to_interval_set(&self) -> IntervalSet {
        IntervalSet::new(self.intervals())
    }
}

impl Intervals for Interval {
    fn intervals(&self) -> impl Iterator<Item = Interval> {
        std::iter::once(*self)
    }
}

impl Intervals for IntervalSet {
    fn intervals(&self) -> impl Iterator<Item = Interval> {
        self.intervals.iter().copied()
    }

    fn to_interval_set(&self) -> IntervalSet {
        self.clone()
    }
}

/// 正規形で保持される時間区間の集合
///
/// 要素が0個なら空集合、`(-inf, inf)` の1個なら全時間を表す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<Interval>", into = "Vec<Interval>")
)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// 任意の区間の列から正規形の集合を作成する
    pub fn new<I: IntoIterator<Item = Interval>>(intervals: I) -> Self {
        Self {
            intervals: consolidate(intervals.into_iter().collect()),
        }
    }

    /// 空集合
    pub fn empty() -> Self {
        Self::default()
    }

    /// 全時間
    pub fn all() -> Self {
        Self {
            intervals: vec![Interval::all()],
        }
    }

    ///内部にある区間の個数を返す
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn first(&self) -> Option<Interval> {
        self.intervals.first().copied()
    }

    pub fn last(&self) -> Option<Interval> {
        self.intervals.last().copied()
    }

    /// 1つの区間だけからなる場合にその区間を返す
    pub fn as_single(&self) -> Option<Interval> {
        match self.intervals.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// 非有界な区間を含むかどうか
    pub fn is_unbounded(&self) -> bool {
        self.intervals.iter().any(Interval::is_unbounded)
    }

    /// 区間を追加し、正規形に戻す
    pub fn insert(&mut self, interval: Interval) {
        let mut intervals = std::mem::take(&mut self.intervals);
        intervals.push(interval);
        self.intervals = consolidate(intervals);
    }

    /// いずれかの区間が `t` を含むかどうか
    pub fn contains(&self, t: impl Into<ExtendedTime>) -> bool {
        let t = t.into();
        // 正規形なので終点も昇順に並んでいる
        let i = self.intervals.partition_point(|r| r.end() <= t);
        self.intervals.get(i).is_some_and(|r| r.contains(t))
    }

    /// other のいずれかの区間と重なるかどうか
    pub fn overlaps<T: Intervals>(&self, other: &T) -> bool {
        other.intervals().any(|o| {
            let i = self.intervals.partition_point(|r| r.end() <= o.start());
            self.intervals.get(i).is_some_and(|r| r.overlaps(&o))
        })
    }

    /// 和集合
    pub fn union<T: Intervals>(&self, other: &T) -> Self {
        Self::new(self.intervals().chain(other.intervals()))
    }

    /// 共通部分
    ///
    /// 双方とも正規形なので、区間を先頭から同時に走査して重なる組だけを取り出す。
    pub fn intersection<T: Intervals>(&self, other: &T) -> Self {
        let other = other.to_interval_set();
        let (a, b) = (&self.intervals, &other.intervals);

        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let ix = a[i].intersection(&b[j]);
            if !ix.is_empty() {
                result.push(ix);
            }
            if a[i].end() < b[j].end() {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self::new(result)
    }

    /// selfからotherを引いた残り
    ///
    /// selfの各区間について、重なるotherの区間を順に取り除いた隙間を集める。
    pub fn difference<T: Intervals>(&self, other: &T) -> Self {
        let other = other.to_interval_set();
        let b = &other.intervals;

        let mut result = Vec::new();
        let mut j = 0;
        for r in &self.intervals {
            while j < b.len() && b[j].end() <= r.start() {
                j += 1;
            }

            let mut cursor = r.start();
            for o in b[j..].iter().take_while(|o| o.start() < r.end()) {
                if o.start() > cursor {
                    result.push(Interval::new_unchecked(cursor, o.start()));
                }
                cursor = cursor.max(o.end());
            }
            if cursor < r.end() {
                result.push(Interval::new_unchecked(cursor, r.end()));
            }
        }
        Self::new(result)
    }

    /// どちらか一方だけに含まれる部分
    pub fn symmetric_difference<T: Intervals>(&self, other: &T) -> Self {
        let other = other.to_interval_set();
        self.difference(&other).union(&other.difference(self))
    }

    /// 各区間の長さの合計。非有界な区間を含めば `Infinite`
    pub fn duration(&self) -> TimeSpan {
        self.intervals.iter().map(Interval::duration).sum()
    }

    /// 各区間を `unit` 刻みで列挙して区間の順に連結する
    pub fn enumerate<U: IntoUnit>(&self, unit: U) -> Result<Vec<Instant>, Error> {
        if self.is_unbounded() {
            return Err(Error::UnboundedRange);
        }
        let unit = unit.into_unit()?;

        let mut instants = Vec::new();
        for r in &self.intervals {
            instants.extend(r.enumerate(unit)?);
        }
        Ok(instants)
    }

    /// すべての区間を `delta` だけずらす
    pub fn shift(&self, delta: TimeDelta) -> Result<Self, Error> {
        let shifted = self
            .intervals
            .iter()
            .map(|r| r.shift(delta))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(shifted))
    }

    /// 指定範囲 `[origin, origin + span)` の中にランダムな区間を `len` 個生成し、集合にします。
    #[cfg(feature = "random")]
    pub fn random_using<R: Rng>(rng: &mut R, len: usize, origin: Instant, span: TimeDelta) -> Self {
        Self::new((0..len).map(|_| Interval::random_within_using(rng, origin, span)))
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> Self {
        Self::new([interval])
    }
}

impl From<Vec<Interval>> for IntervalSet {
    fn from(intervals: Vec<Interval>) -> Self {
        Self {
            intervals: consolidate(intervals),
        }
    }
}

impl From<IntervalSet> for Vec<Interval> {
    fn from(set: IntervalSet) -> Self {
        set.intervals
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<I: IntoIterator<Item = Interval>>(&mut self, iter: I) {
        let mut intervals = std::mem::take(&mut self.intervals);
        intervals.extend(iter);
        self.intervals = consolidate(intervals);
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// 区間と集合は、正規形が一致すれば等しい
impl PartialEq<Interval> for IntervalSet {
    fn eq(&self, other: &Interval) -> bool {
        *self == IntervalSet::from(*other)
    }
}

impl PartialEq<IntervalSet> for Interval {
    fn eq(&self, other: &IntervalSet) -> bool {
        other == self
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalSet[")?;
        for (i, r) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, "]")
    }
}
