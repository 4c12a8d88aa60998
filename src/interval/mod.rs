//! 半開区間 `[start, end)` を表すモジュール
//!
//! 両端は [`ExtendedTime`] なので、過去方向・未来方向に無限に伸びる区間も表現できる。
//! 左閉右開という非対称性はすべての演算で保たれる。`end` と等しい時刻は区間に含まれない。

mod relation;
mod span;
mod unit;

use std::fmt;

use chrono::TimeDelta;
#[cfg(feature = "random")]
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use relation::IntervalRelation;
pub use span::TimeSpan;
pub use unit::{IntoUnit, Unit};

use crate::{
    Error, ExtendedTime, Instant, IntervalSet,
    instant::{self, IntoInstant},
};

/// 時間区間 `[start, end)`
///
/// `start <= end` が常に保証される。
/// フィールドの宣言順により、`Ord` は `(start, end)` の辞書順になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        try_from = "(ExtendedTime, ExtendedTime)",
        into = "(ExtendedTime, ExtendedTime)"
    )
)]
pub struct Interval {
    start: ExtendedTime,
    end: ExtendedTime,
}

impl Interval {
    /// 新しい時間区間を作成
    ///
    /// `start > end` の場合、および `(-inf, -inf)` や `(inf, inf)` のような
    /// 無限大だけからなる退化した区間は [`Error::InvalidBounds`] を返す。
    /// `start == end` の有限区間は空区間として作成できる。
    pub fn new(start: impl Into<ExtendedTime>, end: impl Into<ExtendedTime>) -> Result<Self, Error> {
        let (start, end) = (start.into(), end.into());
        let degenerate = start == end && start.is_infinite();
        if start > end || degenerate {
            return Err(Error::InvalidBounds { start, end });
        }
        Ok(Self { start, end })
    }

    /// 文字列の両端から区間を作成する。`-inf` / `inf` は無限大として扱う
    ///
    /// 空文字列（空白のみを含む）の端は、始点なら `-inf`、終点なら `inf` になる。
    ///
    /// ```
    /// # use toki_logic::{ExtendedTime, Interval};
    /// let jan = Interval::parse("2024-01-01", "2024-02-01").unwrap();
    /// let t: ExtendedTime = "2024-01-31T23:59".parse().unwrap();
    /// assert!(jan.contains(t));
    ///
    /// let past = Interval::parse("", "2024-01-01").unwrap();
    /// assert_eq!(past.start(), ExtendedTime::NegInf);
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        let bound = |text: &str, missing: ExtendedTime| {
            if text.trim().is_empty() {
                Ok(missing)
            } else {
                text.parse::<ExtendedTime>()
            }
        };
        Self::new(
            bound(start, ExtendedTime::NegInf)?,
            bound(end, ExtendedTime::PosInf)?,
        )
    }

    /// 全時間を表す区間 `(-inf, inf)`
    pub fn all() -> Self {
        Self {
            start: ExtendedTime::NegInf,
            end: ExtendedTime::PosInf,
        }
    }

    /// `[t, inf)`
    pub fn since<T: IntoInstant>(t: T) -> Result<Self, Error> {
        Ok(Self {
            start: ExtendedTime::at(t)?,
            end: ExtendedTime::PosInf,
        })
    }

    /// `(-inf, t)`
    pub fn until<T: IntoInstant>(t: T) -> Result<Self, Error> {
        Ok(Self {
            start: ExtendedTime::NegInf,
            end: ExtendedTime::at(t)?,
        })
    }

    /// 長さ0の空区間
    pub fn empty() -> Self {
        let epoch = ExtendedTime::Finite(instant::from_nanos(0));
        Self {
            start: epoch,
            end: epoch,
        }
    }

    pub fn start(&self) -> ExtendedTime {
        self.start
    }

    pub fn end(&self) -> ExtendedTime {
        self.end
    }

    /// 区間が空かどうか（両端が有限で `start >= end`）
    pub fn is_empty(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start >= self.end
    }

    /// どちらかの端が無限大かどうか
    pub fn is_unbounded(&self) -> bool {
        self.start.is_infinite() || self.end.is_infinite()
    }

    /// 区間の長さ
    pub fn duration(&self) -> TimeSpan {
        if self.is_empty() {
            return TimeSpan::ZERO;
        }
        match (self.start, self.end) {
            (ExtendedTime::Finite(s), ExtendedTime::Finite(e)) => TimeSpan::Finite(e - s),
            _ => TimeSpan::Infinite,
        }
    }

    /// `start <= t < end` かどうか
    pub fn contains(&self, t: impl Into<ExtendedTime>) -> bool {
        let t = t.into();
        self.start <= t && t < self.end
    }

    /// 二つの区間が重なるかどうか
    ///
    /// 一方の始点が他方に含まれるときだけ重なる。空区間はどの区間とも重ならない。
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.contains(other.start) || other.contains(self.start)
    }

    /// 二つの区間が境界を共有して接しているかどうか
    pub fn continuous(&self, other: &Self) -> bool {
        self.end == other.start || self.start == other.end
    }

    /// 二つの区間の共通部分を返す
    ///
    /// 重ならない場合は共通部分の始点における空区間を返す。
    pub fn intersection(&self, other: &Self) -> Self {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Self { start, end }
        } else {
            // start >= end となるのは start が有限のときだけ
            Self { start, end: start }
        }
    }

    /// 二つの区間の和集合を返す
    ///
    /// 重なるか接している場合は1つの区間、離れている場合は2つの区間からなる集合になる。
    pub fn union(&self, other: &Self) -> IntervalSet {
        if self.overlaps(other) || self.continuous(other) {
            IntervalSet::new([self.hull(other)])
        } else {
            IntervalSet::new([*self, *other])
        }
    }

    /// selfからotherを引いた残りの区間を返す
    pub fn difference(&self, other: &Self) -> IntervalSet {
        let ix = self.intersection(other);
        if ix.is_empty() {
            return IntervalSet::new([*self]);
        }

        let mut rest = Vec::with_capacity(2);
        // 左側の残り
        if self.start < ix.start {
            rest.push(Self {
                start: self.start,
                end: ix.start,
            });
        }
        // 右側の残り
        if self.end > ix.end {
            rest.push(Self {
                start: ix.end,
                end: self.end,
            });
        }
        IntervalSet::new(rest)
    }

    /// どちらか一方だけに含まれる部分
    pub fn symmetric_difference(&self, other: &Self) -> IntervalSet {
        self.difference(other).union(&other.difference(self))
    }

    /// 区間内の時刻を `unit` 刻みで列挙する
    ///
    /// 両端は `unit` の境界に切り捨ててから列挙する。
    /// 非有界な区間は [`Error::UnboundedRange`]、不明な単位は [`Error::InvalidUnit`] を返す。
    /// 時刻はナノ秒分解能なので、`ps` / `fs` / `as` は単位として認識されるが
    /// [`Error::UnsupportedResolution`] を返す。
    pub fn enumerate<U: IntoUnit>(&self, unit: U) -> Result<Vec<Instant>, Error> {
        let (start, end) = self.bounds()?;
        let unit = unit.into_unit()?;
        unit.range(start, end)
    }

    /// 両端を `delta` だけずらした区間を返す
    pub fn shift(&self, delta: TimeDelta) -> Result<Self, Error> {
        let (start, end) = self.bounds()?;
        let shift = |t: Instant| {
            t.checked_add_signed(delta)
                .map(ExtendedTime::Finite)
                .ok_or(Error::TimestampOverflow)
        };
        Ok(Self {
            start: shift(start)?,
            end: shift(end)?,
        })
    }

    /// 有限の両端を返す
    fn bounds(&self) -> Result<(Instant, Instant), Error> {
        match (self.start.as_finite(), self.end.as_finite()) {
            (Some(s), Some(e)) => Ok((s, e)),
            _ => Err(Error::UnboundedRange),
        }
    }

    /// 検証を行わずに区間を構築します。
    /// 呼び出し側は `start <= end` かつ退化した無限区間でないことを保証しなければなりません。
    pub(crate) fn new_unchecked(start: ExtendedTime, end: ExtendedTime) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// 両方を覆う最小の区間
    pub(crate) fn hull(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// 指定範囲 `[origin, origin + span)` の中からランダムな区間を生成します。
    /// 端点は秒単位に揃えます。
    #[cfg(feature = "random")]
    pub fn random_within_using<R: Rng>(rng: &mut R, origin: Instant, span: TimeDelta) -> Self {
        let seconds = span.num_seconds().max(1);
        let a = rng.random_range(0..seconds);
        let b = rng.random_range(0..seconds);
        let at = |s: i64| ExtendedTime::Finite(origin + TimeDelta::seconds(s));
        Self {
            start: at(a.min(b)),
            end: at(a.max(b)),
        }
    }
}

impl TryFrom<(ExtendedTime, ExtendedTime)> for Interval {
    type Error = Error;

    fn try_from((start, end): (ExtendedTime, ExtendedTime)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<Interval> for (ExtendedTime, ExtendedTime) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

impl fmt::Display for Interval {
    /// 形式は `Interval(start, end)`。空区間は `Interval()` と表示する。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Interval()")
        } else {
            write!(f, "Interval({}, {})", self.start, self.end)
        }
    }
}
