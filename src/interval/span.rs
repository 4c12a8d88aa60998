use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::TimeDelta;

/// 区間の長さ
///
/// 非有界な区間の長さは数値で表さず、必ず `Infinite` になる。
/// 宣言順により `Finite(_) < Infinite` となる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSpan {
    Finite(TimeDelta),
    Infinite,
}

impl TimeSpan {
    pub const ZERO: TimeSpan = TimeSpan::Finite(TimeDelta::zero());

    pub fn is_infinite(&self) -> bool {
        matches!(self, TimeSpan::Infinite)
    }

    pub fn as_finite(&self) -> Option<TimeDelta> {
        match self {
            TimeSpan::Finite(d) => Some(*d),
            TimeSpan::Infinite => None,
        }
    }
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for TimeSpan {
    type Output = TimeSpan;

    /// 有限同士の加算が表現範囲を超えた場合も `Infinite` に飽和する
    fn add(self, rhs: TimeSpan) -> TimeSpan {
        match (self, rhs) {
            (TimeSpan::Finite(a), TimeSpan::Finite(b)) => {
                a.checked_add(&b).map_or(TimeSpan::Infinite, TimeSpan::Finite)
            }
            _ => TimeSpan::Infinite,
        }
    }
}

impl Sum for TimeSpan {
    fn sum<I: Iterator<Item = TimeSpan>>(iter: I) -> Self {
        iter.fold(TimeSpan::ZERO, Add::add)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpan::Finite(d) => write!(f, "{d}"),
            TimeSpan::Infinite => write!(f, "inf"),
        }
    }
}
