use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    instant::{Instant, IntoInstant, parse_instant},
};

/// 正負の無限大を含む時刻
///
/// バリアントの宣言順がそのまま全順序になる。
/// `NegInf` が唯一の最小値、`PosInf` が唯一の最大値で、`Finite` 同士は時刻で比較する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExtendedTime {
    NegInf,
    Finite(Instant),
    PosInf,
}

impl ExtendedTime {
    /// 有限の時刻を作成する
    pub fn at<T: IntoInstant>(t: T) -> Result<Self, Error> {
        Ok(Self::Finite(t.into_instant()?))
    }

    /// 有限の時刻を返す。無限大の場合は `None`
    pub fn as_finite(&self) -> Option<Instant> {
        match self {
            Self::Finite(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }
}

impl From<Instant> for ExtendedTime {
    fn from(t: Instant) -> Self {
        Self::Finite(t)
    }
}

impl From<chrono::NaiveDate> for ExtendedTime {
    fn from(date: chrono::NaiveDate) -> Self {
        Self::Finite(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl PartialEq<Instant> for ExtendedTime {
    fn eq(&self, other: &Instant) -> bool {
        self.as_finite().is_some_and(|t| t == *other)
    }
}

impl PartialOrd<Instant> for ExtendedTime {
    fn partial_cmp(&self, other: &Instant) -> Option<std::cmp::Ordering> {
        Some(self.cmp(&Self::Finite(*other)))
    }
}

impl fmt::Display for ExtendedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegInf => write!(f, "-inf"),
            Self::PosInf => write!(f, "inf"),
            Self::Finite(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// `-inf`, `inf`, `+inf` は無限大、それ以外は時刻として解釈する
impl FromStr for ExtendedTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-inf" => Ok(Self::NegInf),
            "inf" | "+inf" => Ok(Self::PosInf),
            other => parse_instant(other).map(Self::Finite),
        }
    }
}
